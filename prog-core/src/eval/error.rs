use crate::{
    environment::prelude::ValueType,
    lexer::prelude::Token,
    utils::prelude::SrcSpan
};

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    UndefinedVariable { name: String },
    NotCallable { name: String },
    InvalidUnaryOperand { operator: Token, operand: ValueType },
    InvalidBinaryOperands { operator: Token, left: ValueType, right: ValueType },
    ConditionNotBoolean { got: ValueType },
    LogicalOperandNotBoolean { operator: Token, got: ValueType },
    ArityMismatch { name: String, expected: String, got: usize },
    InvalidArgument { function: String, expected: String, got: ValueType },
    NotIndexable { got: ValueType },
    InvalidIndex { got: ValueType },
    IndexOutOfBounds { index: i64, length: usize },
    PopFromEmptyList,
    DivisionByZero,
    ReturnOutsideFunction,
    StackOverflow,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    /// Stable taxonomy name, used as the diagnostic title.
    pub fn kind(&self) -> &'static str {
        match self.error {
            RuntimeErrorType::UndefinedVariable { .. }
            | RuntimeErrorType::NotCallable { .. } => "NameError",
            RuntimeErrorType::InvalidUnaryOperand { .. }
            | RuntimeErrorType::InvalidBinaryOperands { .. }
            | RuntimeErrorType::ConditionNotBoolean { .. }
            | RuntimeErrorType::LogicalOperandNotBoolean { .. }
            | RuntimeErrorType::InvalidArgument { .. }
            | RuntimeErrorType::NotIndexable { .. } => "TypeError",
            RuntimeErrorType::ArityMismatch { .. } => "ArityError",
            RuntimeErrorType::InvalidIndex { .. }
            | RuntimeErrorType::IndexOutOfBounds { .. }
            | RuntimeErrorType::PopFromEmptyList => "IndexError",
            RuntimeErrorType::DivisionByZero => "DivisionByZeroError",
            RuntimeErrorType::ReturnOutsideFunction => "SyntaxContextError",
            RuntimeErrorType::StackOverflow => "StackOverflowError",
            RuntimeErrorType::Interrupted => "InterruptedError",
        }
    }

    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            RuntimeErrorType::UndefinedVariable { name } => {
                (format!("`{name}` is not defined"), vec![])
            },
            RuntimeErrorType::NotCallable { name } => {
                (format!("`{name}` is not a function"), vec![])
            },
            RuntimeErrorType::InvalidUnaryOperand { operator, operand } => {
                (format!(
                    "Cannot apply unary `{}` to `{operand}`",
                    operator.as_literal()
                ), vec![])
            },
            RuntimeErrorType::InvalidBinaryOperands { operator, left, right } => {
                (format!(
                    "Cannot apply `{}` to `{left}` and `{right}`",
                    operator.as_literal()
                ), vec![])
            },
            RuntimeErrorType::ConditionNotBoolean { got } => {
                (format!("Condition must be a `bool`, got `{got}`"), vec![])
            },
            RuntimeErrorType::LogicalOperandNotBoolean { operator, got } => {
                (format!(
                    "Operands of `{}` must be `bool`, got `{got}`",
                    operator.as_literal()
                ), vec![])
            },
            RuntimeErrorType::ArityMismatch { name, expected, got } => {
                (format!("`{name}` expects {expected} argument(s), got {got}"), vec![])
            },
            RuntimeErrorType::InvalidArgument { function, expected, got } => {
                (format!("`{function}` expects {expected}, got `{got}`"), vec![])
            },
            RuntimeErrorType::NotIndexable { got } => {
                (format!("Cannot index into `{got}`"), vec![])
            },
            RuntimeErrorType::InvalidIndex { got } => {
                (format!("List index must be an `int`, got `{got}`"), vec![])
            },
            RuntimeErrorType::IndexOutOfBounds { index, length } => {
                (format!("Index {index} is out of bounds for a list of length {length}"), vec![])
            },
            RuntimeErrorType::PopFromEmptyList => {
                ("Cannot pop from an empty list".into(), vec![])
            },
            RuntimeErrorType::DivisionByZero => {
                ("Division by zero".into(), vec![])
            },
            RuntimeErrorType::ReturnOutsideFunction => {
                ("`return` outside of a function".into(), vec![])
            },
            RuntimeErrorType::StackOverflow => {
                ("Maximum call depth exceeded".into(), vec![])
            },
            RuntimeErrorType::Interrupted => {
                ("Execution interrupted".into(), vec![])
            }
        }
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}
