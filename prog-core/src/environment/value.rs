use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use crate::parser::prelude::Block;

use super::prelude::Environment;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };

#[derive(Debug, Clone)]
pub enum Value {
    Integer {
        value: i64
    },
    Float {
        value: f64,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool
    },
    Nil,
    // Lists are aliased: cloning the value clones the reference, and
    // append/pop are visible through every alias.
    List {
        elements: Rc<RefCell<Vec<Value>>>
    },
    Function {
        function: Rc<Function>
    },
}

/// A user-defined function together with the environment captured at its
/// definition site.
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}

// The captured environment can reach back to the function itself, so
// Debug must not descend into it.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer { value: left }, Value::Integer { value: right }) => left == right,
            (Value::Float { value: left }, Value::Float { value: right }) => left == right,
            (Value::String { value: left }, Value::String { value: right }) => left == right,
            (Value::Boolean { value: left }, Value::Boolean { value: right }) => left == right,
            (Value::Nil, Value::Nil) => true,
            (Value::List { elements: left }, Value::List { elements: right }) => {
                Rc::ptr_eq(left, right) || *left.borrow() == *right.borrow()
            },
            (Value::Function { function: left }, Value::Function { function: right }) => {
                Rc::ptr_eq(left, right)
            },
            // Values of different kinds never compare equal
            _ => false
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Float { value } => {
                // A float always renders with a fractional part
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            },
            Value::String { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Nil => write!(f, "nil"),
            Value::List { elements } => {
                let elements = elements.borrow()
                    .iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>();

                write!(f, "[{}]", elements.join(", "))
            },
            Value::Function { function } => write!(f, "<func {}>", function.name)
        }
    }
}

impl Value {
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List { elements: Rc::new(RefCell::new(elements)) }
    }

    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Float { .. } => ValueType::Float,
            Self::String { .. } => ValueType::String,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Nil => ValueType::Nil,
            Self::List { .. } => ValueType::List,
            Self::Function { .. } => ValueType::Function
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    String,
    Boolean,
    Nil,
    List,
    Function
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "bool",
            Self::Nil => "nil",
            Self::List => "list",
            Self::Function => "function"
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
