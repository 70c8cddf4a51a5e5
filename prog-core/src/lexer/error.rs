use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    UnterminatedString,
    MultipleFloatingPoints,
    MissingDigitsInNumber,
    NumberOutOfRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                (format!("Unexpected character `{tok}`"), vec![])
            },
            LexicalErrorType::UnterminatedString => {
                ("String is missing a closing `\"`".into(), vec![
                    "Strings cannot span multiple lines".into()
                ])
            },
            LexicalErrorType::MultipleFloatingPoints => {
                ("Found a second `.` in a number".into(), vec![])
            },
            LexicalErrorType::MissingDigitsInNumber => {
                ("Expected digits around `.`".into(), vec![])
            },
            LexicalErrorType::NumberOutOfRange => {
                ("Number does not fit in a 64 bit integer".into(), vec![])
            }
        }
    }
}
