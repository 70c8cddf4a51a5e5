use super::prelude::{Lexer, LexicalError, LexicalErrorType, Token};

fn lexer_for(input: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
    Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)))
}

fn assert_tokens(input: &str, tokens: Vec<Token>) {
    let mut lexer = lexer_for(input);

    for (idx, token) in tokens.iter().enumerate() {
        let (_, next_token, _) = match lexer.next_token() {
            Ok(next_token) => next_token,
            Err(err) => {
                println!("stopped at {token:?} ({idx})");
                panic!("{err:?}")
            }
        };

        assert_eq!(
            *token, next_token,
            "Next token does not match expected token ({:?}, {:?}) at {}",
            next_token, token, idx
        );
    }

    match lexer.next_token() {
        Ok((_, Token::Eof, _)) => {},
        other => panic!("Expected Eof after the token list, got {other:?}")
    }
}

#[test]
fn test_numbers() {
    assert_tokens(
        "
        10
        0
        1234567890
        1.5
        .5
        5.
        0.25
        ",
        vec![
            Token::Int(10),
            Token::Int(0),
            Token::Int(1234567890),
            Token::Float(1.5),
            Token::Float(0.5),
            Token::Float(5.0),
            Token::Float(0.25),
        ]
    );
}

#[test]
fn test_invalid_numbers() {
    let input = "
        1.2.3
        .
        99999999999999999999
    ";

    let mut lexer = lexer_for(input);

    let fails = vec![
        LexicalErrorType::MultipleFloatingPoints,
        LexicalErrorType::MissingDigitsInNumber,
        LexicalErrorType::NumberOutOfRange,
    ];

    for (idx, fail) in fails.iter().enumerate() {
        let err = loop {
            match lexer.next_token() {
                Err(err) => break err,
                Ok((_, Token::Eof, _)) => {
                    panic!("Stopped at {fail:?} ({idx}). Hit Eof before the error")
                },
                // `1.2.3` lexes an error and then trailing digits
                Ok(_) => continue
            }
        };

        assert_eq!(
            *fail, err.error,
            "Next error does not match expected error ({:?}, {:?}) at {}",
            fail, err.error, idx
        );
    }
}

#[test]
fn test_strings() {
    assert_tokens(
        r#""" "hello" "with space # not a comment""#,
        vec![
            Token::String(String::new()),
            Token::String(String::from("hello")),
            Token::String(String::from("with space # not a comment")),
        ]
    );
}

#[test]
fn test_unterminated_strings() {
    for input in ["\"runs off the end", "\"split\nacross lines\""] {
        let mut lexer = lexer_for(input);

        let err = loop {
            match lexer.next_token() {
                Err(err) => break err,
                Ok((_, Token::Eof, _)) => panic!("Expected an error for {input:?}"),
                Ok(_) => continue
            }
        };

        assert_eq!(err.error, LexicalErrorType::UnterminatedString);
    }
}

#[test]
fn test_operators_are_greedy() {
    assert_tokens(
        "= == != < <= > >=",
        vec![
            Token::Assign,
            Token::Equal,
            Token::NotEqual,
            Token::LessThan,
            Token::LessThanOrEqual,
            Token::GreaterThan,
            Token::GreaterThanOrEqual,
        ]
    );
}

#[test]
fn test_bare_bang_is_rejected() {
    let mut lexer = lexer_for("!true");

    match lexer.next_token() {
        Err(LexicalError {
            error: LexicalErrorType::UnrecognizedToken { tok: '!' },
            ..
        }) => {},
        other => panic!("Expected an error for `!`, got {other:?}")
    }
}

#[test]
fn test_keywords_and_idents() {
    assert_tokens(
        "let print if then else end while do func return and or not true false nil
         letter print_er _x x1",
        vec![
            Token::Let,
            Token::Print,
            Token::If,
            Token::Then,
            Token::Else,
            Token::End,
            Token::While,
            Token::Do,
            Token::Func,
            Token::Return,
            Token::And,
            Token::Or,
            Token::Not,
            Token::True,
            Token::False,
            Token::Nil,
            Token::Ident(String::from("letter")),
            Token::Ident(String::from("print_er")),
            Token::Ident(String::from("_x")),
            Token::Ident(String::from("x1")),
        ]
    );
}

#[test]
fn test_comments() {
    assert_tokens(
        "1 # everything to the end of the line, even \"quotes\"\n2",
        vec![
            Token::Int(1),
            Token::Comment,
            Token::Int(2),
        ]
    );
}

#[test]
fn test_input() {
    let input = r#"
        # greatest common divisor
        func gcd(a, b)
            while b != 0 do
                let t = b
                let b = a % b
                let a = t
            end
            return a
        end

        print gcd(48, 18)
        print [1.5, "x"][0] <= 2
    "#;

    assert_tokens(
        input,
        vec![
            Token::Comment,
            Token::Func,
            Token::Ident(String::from("gcd")),
            Token::LParen,
            Token::Ident(String::from("a")),
            Token::Comma,
            Token::Ident(String::from("b")),
            Token::RParen,
            Token::While,
            Token::Ident(String::from("b")),
            Token::NotEqual,
            Token::Int(0),
            Token::Do,
            Token::Let,
            Token::Ident(String::from("t")),
            Token::Assign,
            Token::Ident(String::from("b")),
            Token::Let,
            Token::Ident(String::from("b")),
            Token::Assign,
            Token::Ident(String::from("a")),
            Token::Percent,
            Token::Ident(String::from("b")),
            Token::Let,
            Token::Ident(String::from("a")),
            Token::Assign,
            Token::Ident(String::from("t")),
            Token::End,
            Token::Return,
            Token::Ident(String::from("a")),
            Token::End,
            Token::Print,
            Token::Ident(String::from("gcd")),
            Token::LParen,
            Token::Int(48),
            Token::Comma,
            Token::Int(18),
            Token::RParen,
            Token::Print,
            Token::LSBracket,
            Token::Float(1.5),
            Token::Comma,
            Token::String(String::from("x")),
            Token::RSBracket,
            Token::LSBracket,
            Token::Int(0),
            Token::RSBracket,
            Token::LessThanOrEqual,
            Token::Int(2),
        ]
    );
}

#[test]
fn test_spans_are_byte_offsets() {
    let mut lexer = lexer_for("let x = 10");

    assert_eq!(lexer.next_token(), Ok((0, Token::Let, 3)));
    assert_eq!(lexer.next_token(), Ok((4, Token::Ident(String::from("x")), 5)));
    assert_eq!(lexer.next_token(), Ok((6, Token::Assign, 7)));
    assert_eq!(lexer.next_token(), Ok((8, Token::Int(10), 10)));
}

#[test]
fn test_iterator_fuses_after_eof() {
    let mut lexer = lexer_for("1");

    assert_eq!(lexer.next(), Some(Ok((0, Token::Int(1), 1))));
    assert!(matches!(lexer.next(), Some(Ok((_, Token::Eof, _)))));
    assert_eq!(lexer.next(), None);
}
