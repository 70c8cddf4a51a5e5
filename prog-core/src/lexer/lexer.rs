use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "let" => Token::Let,
        "print" => Token::Print,
        "if" => Token::If,
        "then" => Token::Then,
        "else" => Token::Else,
        "end" => Token::End,
        "while" => Token::While,
        "do" => Token::Do,
        "func" => Token::Func,
        "return" => Token::Return,
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "true" => Token::True,
        "false" => Token::False,
        "nil" => Token::Nil,

        _ => return None
    })
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
    position: u32,
    next_position: u32,
    ch: Option<char>,
    next_ch: Option<char>,
    input: T,
    eof_emitted: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
    pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
            next_ch: None,
            input,
            eof_emitted: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
        let span = match self.ch {
            Some(ch) => match ch {
                '#' => return self.lex_comment(),
                '"' => return self.lex_string(),
                '(' => self.eat_one_char(Token::LParen),
                ')' => self.eat_one_char(Token::RParen),
                '[' => self.eat_one_char(Token::LSBracket),
                ']' => self.eat_one_char(Token::RSBracket),
                ',' => self.eat_one_char(Token::Comma),
                '+' => self.eat_one_char(Token::Plus),
                '-' => self.eat_one_char(Token::Minus),
                '*' => self.eat_one_char(Token::Star),
                '/' => self.eat_one_char(Token::Slash),
                '%' => self.eat_one_char(Token::Percent),
                '=' => self.eat_compound('=', Token::Equal, Token::Assign),
                '<' => self.eat_compound('=', Token::LessThanOrEqual, Token::LessThan),
                '>' => self.eat_compound('=', Token::GreaterThanOrEqual, Token::GreaterThan),
                '!' => {
                    if self.next_ch == Some('=') {
                        let start = self.position;
                        self.next_char();
                        self.next_char();
                        (start, Token::NotEqual, self.position)
                    } else {
                        let location = self.position;
                        self.next_char();
                        return Err(LexicalError {
                            error: LexicalErrorType::UnrecognizedToken { tok: '!' },
                            location: SrcSpan {
                                start: location,
                                end: location + 1,
                            },
                        });
                    }
                },
                'a'..='z' | 'A'..='Z' | '_' => {
                    return Ok(self.lex_ident());
                },
                '0'..='9' | '.' => {
                    return self.lex_number();
                },
                // newlines carry no meaning of their own
                '\n' | ' ' | '\t' | '\x0C' | '\r' => {
                    let _ = self.next_char();
                    return self.next_token();
                }
                c => {
                    let location = self.position;
                    self.next_char();
                    return Err(LexicalError {
                        error: LexicalErrorType::UnrecognizedToken { tok: c },
                        location: SrcSpan {
                            start: location,
                            end: location + 1,
                        },
                    });
                }
            },
            None => self.eat_one_char(Token::Eof)
        };

        Ok(span)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.ch;

        let next = match self.input.next() {
            Some((pos, ch)) => {
                self.position = self.next_position;
                self.next_position = pos;

                Some(ch)
            },
            None => {
                self.position = self.next_position;
                self.next_position += 1;

                None
            }
        };

        self.ch = self.next_ch;
        self.next_ch = next;

        ch
    }

    fn eat_one_char(&mut self, token: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();
        let end_pos = self.position;

        (start_pos, token, end_pos)
    }

    fn eat_compound(&mut self, follow: char, long: Token, short: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();

        let token = if self.ch == Some(follow) {
            self.next_char();
            long
        } else {
            short
        };

        (start_pos, token, self.position)
    }

    fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
        let mut ident = String::new();

        loop {
            match self.ch {
                Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => {
                    ident.push(ch);
                    self.next_char();
                },
                _ => break
            }
        }

        let end_pos = self.position;

        let token = match str_to_keyword(&ident) {
            Some(tok) => tok,
            None => Token::Ident(ident)
        };

        (start_pos, token, end_pos)
    }

    fn lex_number(&mut self) -> LexResult {
        let start_pos = self.position;

        let mut value = String::new();
        let mut has_period = false;

        loop {
            match self.ch {
                Some(ch) if ch.is_ascii_digit() => {
                    value.push(ch);
                    self.next_char();
                },
                Some('.') => {
                    if has_period {
                        self.next_char();

                        return Err(LexicalError {
                            error: LexicalErrorType::MultipleFloatingPoints,
                            location: SrcSpan::from(start_pos, self.position)
                        });
                    }

                    has_period = true;
                    value.push('.');
                    self.next_char();
                },
                _ => break
            }
        }

        let end_pos = self.position;

        if value == "." {
            return Err(LexicalError {
                error: LexicalErrorType::MissingDigitsInNumber,
                location: SrcSpan::from(start_pos, end_pos)
            });
        }

        // `.5` and `5.` are floats, a plain digit run is an integer
        let token = if has_period {
            match value.parse::<f64>() {
                Ok(value) => Token::Float(value),
                Err(_) => return Err(LexicalError {
                    error: LexicalErrorType::MissingDigitsInNumber,
                    location: SrcSpan::from(start_pos, end_pos)
                })
            }
        } else {
            match value.parse::<i64>() {
                Ok(value) => Token::Int(value),
                Err(_) => return Err(LexicalError {
                    error: LexicalErrorType::NumberOutOfRange,
                    location: SrcSpan::from(start_pos, end_pos)
                })
            }
        };

        Ok((start_pos, token, end_pos))
    }

    fn lex_string(&mut self) -> LexResult {
        let start_pos = self.position;

        self.next_char(); // opening quote

        let mut value = String::new();

        loop {
            match self.ch {
                Some('"') => {
                    self.next_char();
                    break;
                },
                Some('\n') | None => {
                    return Err(LexicalError {
                        error: LexicalErrorType::UnterminatedString,
                        location: SrcSpan::from(start_pos, self.position)
                    });
                },
                Some(ch) => {
                    value.push(ch);
                    self.next_char();
                }
            }
        }

        let end_pos = self.position;

        Ok((start_pos, Token::String(value), end_pos))
    }

    fn lex_comment(&mut self) -> LexResult {
        let start_pos = self.position;

        while !matches!(self.ch, Some('\n') | None) {
            self.next_char();
        }

        let end_pos = self.position;

        Ok((start_pos, Token::Comment, end_pos))
    }
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
    type Item = LexResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_emitted {
            return None;
        }

        let token = self.next_token();

        if let Ok((_, Token::Eof, _)) = token {
            self.eof_emitted = true;
        }

        Some(token)
    }
}
