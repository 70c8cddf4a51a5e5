use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    ExpectedExpression { token: Token },
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    UnexpectedEof,
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected an identifier".into(), vec![]),
            ParseErrorType::ExpectedExpression { token } => {
                (format!("Expected an expression, found {}", describe(token)), vec![])
            },
            ParseErrorType::UnexpectedToken { token, expected } => {
                let messages = std::iter::once(format!("Found {}, expected one of: ", describe(token)))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this".into(), messages)
            },
            ParseErrorType::UnexpectedEof => ("Unexpected end of file".into(), vec![]),
            ParseErrorType::LexError { error } => error.details()
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Int(_) => "an Int".to_string(),
        Token::Float(_) => "a Float".to_string(),
        Token::String(_) => "a String".to_string(),
        Token::Ident(_) => "an Identifier".to_string(),
        Token::Eof => "the end of file".to_string(),
        _ if token.is_keyword() => format!("the keyword `{}`", token.as_literal()),
        _ => format!("`{}`", token.as_literal())
    }
}
