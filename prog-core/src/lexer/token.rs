#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <letter> { <letter> | <digit> | _ }
    Ident(String),
    // digit sequence without a decimal point
    Int(i64),
    // digit sequence containing `.`, including `.5` and `5.`
    Float(f64),
    // double-quoted, single line
    String(String),
    // `#` to end of line
    Comment,

    // Keywords
    Let,
    Print,
    If,
    Then,
    Else,
    End,
    While,
    Do,
    Func,
    Return,
    And,
    Or,
    Not,
    True,
    False,
    Nil,

    // Operators
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Percent, // %
    Assign, // =
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // Delimiters
    LParen, // (
    RParen, // )
    LSBracket, // [
    RSBracket, // ]
    Comma, // ,

    Eof,
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        match self {
            Token::Let
            | Token::Print
            | Token::If
            | Token::Then
            | Token::Else
            | Token::End
            | Token::While
            | Token::Do
            | Token::Func
            | Token::Return
            | Token::And
            | Token::Or
            | Token::Not
            | Token::True
            | Token::False
            | Token::Nil => true,
            _ => false
        }
    }

    pub fn is_comparison(&self) -> bool {
        match self {
            Token::Equal
            | Token::NotEqual
            | Token::LessThan
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::GreaterThanOrEqual => true,
            _ => false
        }
    }

    pub fn is_infix_operator(&self) -> bool {
        match self {
            Token::Plus
            | Token::Minus
            | Token::Star
            | Token::Slash
            | Token::Percent
            | Token::And
            | Token::Or => true,
            _ => self.is_comparison()
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => format!("{}", value),
            Token::Float(value) => format!("{}", value),
            Token::String(value) => format!("\"{}\"", value),
            Token::Comment => "Comment".to_string(),

            Token::Let => "let".to_string(),
            Token::Print => "print".to_string(),
            Token::If => "if".to_string(),
            Token::Then => "then".to_string(),
            Token::Else => "else".to_string(),
            Token::End => "end".to_string(),
            Token::While => "while".to_string(),
            Token::Do => "do".to_string(),
            Token::Func => "func".to_string(),
            Token::Return => "return".to_string(),
            Token::And => "and".to_string(),
            Token::Or => "or".to_string(),
            Token::Not => "not".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::Nil => "nil".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::Assign => "=".to_string(),
            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LSBracket => "[".to_string(),
            Token::RSBracket => "]".to_string(),
            Token::Comma => ",".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}
