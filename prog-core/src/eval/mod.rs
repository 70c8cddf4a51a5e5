pub mod builtins;
pub mod error;
#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::{
        builtins::*,
        error::*,
        Flow,
        Interpreter,
        run_file,
        MAX_CALL_DEPTH
    };
}

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::rc::Rc;

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Function, Value, FALSE, TRUE},
    lexer::prelude::Token,
    parser::prelude::{
        parse_module_from_stream, Block, Call, Expression, If, Index, Infix,
        Let, Logical, Prefix, Primitive, Print, Program, Return, Statement, While
    },
    utils::prelude::{Error, SrcSpan}
};

use self::error::{runtime_error, RuntimeError, RuntimeErrorType};

pub const MAX_CALL_DEPTH: usize = 1000;

/// Signal threaded out of statement evaluation. `Return` propagates up to
/// the nearest call frame instead of unwinding.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value)
}

pub struct Interpreter<'io> {
    output: &'io mut dyn Write,
    input: &'io mut dyn BufRead,
    interrupt: Option<Box<dyn Fn() -> bool + 'io>>,
    depth: usize,
}

impl<'io> Interpreter<'io> {
    pub fn new(output: &'io mut dyn Write, input: &'io mut dyn BufRead) -> Self {
        Self {
            output,
            input,
            interrupt: None,
            depth: 0
        }
    }

    /// Installs a hook polled before every statement. When it reports true
    /// the interpreter stops with an `InterruptedError`.
    pub fn with_interrupt(mut self, check: impl Fn() -> bool + 'io) -> Self {
        self.interrupt = Some(Box::new(check));
        self
    }

    pub fn run(
        &mut self,
        program: &Program,
        env: &Rc<RefCell<Environment>>
    ) -> Result<(), RuntimeError> {
        for statement in &program.statements {
            self.eval_statement(statement, env)?;
        }

        Ok(())
    }

    fn check_interrupt(&self, location: SrcSpan) -> Result<(), RuntimeError> {
        match &self.interrupt {
            Some(check) if check() => {
                runtime_error(RuntimeErrorType::Interrupted, location)
            },
            _ => Ok(())
        }
    }

    fn eval_statement(
        &mut self,
        statement: &Statement,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Flow, RuntimeError> {
        self.check_interrupt(statement.location())?;

        match statement {
            Statement::Let(let_) => self.eval_let(let_, env),
            Statement::Print(print) => self.eval_print(print, env),
            Statement::Return(return_) => self.eval_return(return_, env),
            Statement::If(if_) => self.eval_if(if_, env),
            Statement::While(while_) => self.eval_while(while_, env),
            Statement::FuncDef(func) => {
                let function = Function {
                    name: func.name.value.clone(),
                    params: func.params.iter()
                        .map(|param| param.value.clone())
                        .collect(),
                    body: func.body.clone(),
                    env: Rc::clone(env)
                };

                env.borrow_mut().define(
                    func.name.value.clone(),
                    Value::Function { function: Rc::new(function) }
                );

                Ok(Flow::Normal)
            },
            Statement::Expression(expression) => {
                self.eval_expression(expression, env)?;

                Ok(Flow::Normal)
            }
        }
    }

    fn eval_let(
        &mut self,
        let_: &Let,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Flow, RuntimeError> {
        let value = self.eval_expression(&let_.value, env)?;

        Environment::assign(env, &let_.name.value, value);

        Ok(Flow::Normal)
    }

    fn eval_print(
        &mut self,
        print: &Print,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Flow, RuntimeError> {
        let value = self.eval_expression(&print.value, env)?;

        // A failed write to the sink is not a language error
        let _ = writeln!(self.output, "{value}");

        Ok(Flow::Normal)
    }

    fn eval_return(
        &mut self,
        return_: &Return,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Flow, RuntimeError> {
        if self.depth == 0 {
            return runtime_error(
                RuntimeErrorType::ReturnOutsideFunction,
                return_.location
            );
        }

        let value = match &return_.value {
            Some(expression) => self.eval_expression(expression, env)?,
            None => Value::Nil
        };

        Ok(Flow::Return(value))
    }

    fn eval_if(
        &mut self,
        if_: &If,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Flow, RuntimeError> {
        // Blocks run in the enclosing scope, only calls push a frame
        if self.eval_condition(&if_.condition, env)? {
            self.eval_block(&if_.consequence, env)
        } else if let Some(alternative) = &if_.alternative {
            self.eval_block(alternative, env)
        } else {
            Ok(Flow::Normal)
        }
    }

    fn eval_while(
        &mut self,
        while_: &While,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Flow, RuntimeError> {
        while self.eval_condition(&while_.condition, env)? {
            self.check_interrupt(while_.location)?;

            match self.eval_block(&while_.body, env)? {
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Normal => {}
            }
        }

        Ok(Flow::Normal)
    }

    fn eval_condition(
        &mut self,
        condition: &Expression,
        env: &Rc<RefCell<Environment>>
    ) -> Result<bool, RuntimeError> {
        match self.eval_expression(condition, env)? {
            Value::Boolean { value } => Ok(value),
            value => runtime_error(
                RuntimeErrorType::ConditionNotBoolean { got: value._type() },
                condition.location()
            )
        }
    }

    fn eval_block(
        &mut self,
        block: &Block,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Flow, RuntimeError> {
        for statement in &block.statements {
            match self.eval_statement(statement, env)? {
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Normal => {}
            }
        }

        Ok(Flow::Normal)
    }

    fn eval_expression(
        &mut self,
        expression: &Expression,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Identifier(ident) => {
                match env.borrow().get(&ident.value) {
                    Some(value) => Ok(value),
                    None => runtime_error(
                        RuntimeErrorType::UndefinedVariable {
                            name: ident.value.clone()
                        },
                        ident.location
                    )
                }
            },
            Expression::Primitive(primitive) => Ok(match primitive {
                Primitive::Int { value, .. } => Value::Integer { value: *value },
                Primitive::Float { value, .. } => Value::Float { value: *value },
                Primitive::String { value, .. } => Value::String { value: value.clone() },
                Primitive::Bool { value, .. } => Value::Boolean { value: *value },
                Primitive::Nil { .. } => Value::Nil
            }),
            Expression::List(list) => {
                let mut elements = Vec::with_capacity(list.elements.len());

                for element in &list.elements {
                    elements.push(self.eval_expression(element, env)?);
                }

                Ok(Value::list(elements))
            },
            Expression::Prefix(prefix) => self.eval_prefix(prefix, env),
            Expression::Infix(infix) => self.eval_infix(infix, env),
            Expression::Logical(logical) => self.eval_logical(logical, env),
            Expression::Index(index) => self.eval_index(index, env),
            Expression::Call(call) => self.eval_call(call, env),
            Expression::Nested { expression, .. } => {
                self.eval_expression(expression, env)
            }
        }
    }

    fn eval_prefix(
        &mut self,
        prefix: &Prefix,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let operand = self.eval_expression(&prefix.expression, env)?;

        match (&prefix.operator, &operand) {
            (Token::Minus, Value::Integer { value }) => {
                Ok(Value::Integer { value: value.wrapping_neg() })
            },
            (Token::Minus, Value::Float { value }) => {
                Ok(Value::Float { value: -value })
            },
            (Token::Not, Value::Boolean { value }) => {
                Ok(Value::Boolean { value: !value })
            },
            _ => runtime_error(
                RuntimeErrorType::InvalidUnaryOperand {
                    operator: prefix.operator.clone(),
                    operand: operand._type()
                },
                prefix.location
            )
        }
    }

    fn eval_infix(
        &mut self,
        infix: &Infix,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(&infix.left, env)?;
        let right = self.eval_expression(&infix.right, env)?;

        match &infix.operator {
            // Equality works across kinds and is false when they differ
            Token::Equal => return Ok(Value::Boolean { value: left == right }),
            Token::NotEqual => return Ok(Value::Boolean { value: left != right }),
            _ => {}
        }

        // `+` doubles as concatenation when either side is a string
        if infix.operator == Token::Plus {
            if let (Value::String { .. }, _) | (_, Value::String { .. }) = (&left, &right) {
                return Ok(Value::String { value: format!("{left}{right}") });
            }
        }

        match (&infix.operator, &left, &right) {
            (Token::Percent, Value::Integer { value: l }, Value::Integer { value: r }) => {
                if *r == 0 {
                    return runtime_error(RuntimeErrorType::DivisionByZero, infix.location);
                }

                // Floored modulo, the result takes the sign of the divisor
                let value = l.wrapping_rem(*r).wrapping_add(*r).wrapping_rem(*r);

                Ok(Value::Integer { value })
            },
            (
                Token::LessThan | Token::LessThanOrEqual
                | Token::GreaterThan | Token::GreaterThanOrEqual,
                Value::Integer { value: l },
                Value::Integer { value: r }
            ) => {
                // Comparing through f64 would lose exactness past 2^53
                let value = match infix.operator {
                    Token::LessThan => l < r,
                    Token::LessThanOrEqual => l <= r,
                    Token::GreaterThan => l > r,
                    _ => l >= r
                };

                Ok(Value::Boolean { value })
            },
            (
                Token::Plus | Token::Minus | Token::Star,
                Value::Integer { value: l },
                Value::Integer { value: r }
            ) => {
                let value = match infix.operator {
                    Token::Plus => l.wrapping_add(*r),
                    Token::Minus => l.wrapping_sub(*r),
                    _ => l.wrapping_mul(*r)
                };

                Ok(Value::Integer { value })
            },
            _ => {
                let (l, r) = match (as_f64(&left), as_f64(&right)) {
                    (Some(l), Some(r)) => (l, r),
                    _ => return runtime_error(
                        RuntimeErrorType::InvalidBinaryOperands {
                            operator: infix.operator.clone(),
                            left: left._type(),
                            right: right._type()
                        },
                        infix.location
                    )
                };

                match &infix.operator {
                    Token::Plus => Ok(Value::Float { value: l + r }),
                    Token::Minus => Ok(Value::Float { value: l - r }),
                    Token::Star => Ok(Value::Float { value: l * r }),
                    // `/` is float division even between two ints
                    Token::Slash => {
                        if r == 0.0 {
                            return runtime_error(
                                RuntimeErrorType::DivisionByZero,
                                infix.location
                            );
                        }

                        Ok(Value::Float { value: l / r })
                    },
                    Token::LessThan => Ok(Value::Boolean { value: l < r }),
                    Token::LessThanOrEqual => Ok(Value::Boolean { value: l <= r }),
                    Token::GreaterThan => Ok(Value::Boolean { value: l > r }),
                    Token::GreaterThanOrEqual => Ok(Value::Boolean { value: l >= r }),
                    _ => runtime_error(
                        RuntimeErrorType::InvalidBinaryOperands {
                            operator: infix.operator.clone(),
                            left: left._type(),
                            right: right._type()
                        },
                        infix.location
                    )
                }
            }
        }
    }

    fn eval_logical(
        &mut self,
        logical: &Logical,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let left = match self.eval_expression(&logical.left, env)? {
            Value::Boolean { value } => value,
            value => return runtime_error(
                RuntimeErrorType::LogicalOperandNotBoolean {
                    operator: logical.operator.clone(),
                    got: value._type()
                },
                logical.left.location()
            )
        };

        // Short circuit: the right operand is never evaluated
        match logical.operator {
            Token::And if !left => return Ok(FALSE),
            Token::Or if left => return Ok(TRUE),
            _ => {}
        }

        match self.eval_expression(&logical.right, env)? {
            Value::Boolean { value } => Ok(Value::Boolean { value }),
            value => runtime_error(
                RuntimeErrorType::LogicalOperandNotBoolean {
                    operator: logical.operator.clone(),
                    got: value._type()
                },
                logical.right.location()
            )
        }
    }

    fn eval_index(
        &mut self,
        index: &Index,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let target = self.eval_expression(&index.target, env)?;
        let idx = self.eval_expression(&index.index, env)?;

        let elements = match &target {
            Value::List { elements } => elements,
            _ => return runtime_error(
                RuntimeErrorType::NotIndexable { got: target._type() },
                index.location
            )
        };

        let idx = match idx {
            Value::Integer { value } => value,
            _ => return runtime_error(
                RuntimeErrorType::InvalidIndex { got: idx._type() },
                index.location
            )
        };

        let elements = elements.borrow();

        match usize::try_from(idx).ok().and_then(|i| elements.get(i)) {
            Some(element) => Ok(element.clone()),
            None => runtime_error(
                RuntimeErrorType::IndexOutOfBounds {
                    index: idx,
                    length: elements.len()
                },
                index.location
            )
        }
    }

    fn eval_call(
        &mut self,
        call: &Call,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        // The environment wins over builtins, so user code can shadow them
        let resolved = env.borrow().get(&call.name.value);

        match resolved {
            Some(Value::Function { function }) => self.call_function(call, &function, env),
            Some(_) => runtime_error(
                RuntimeErrorType::NotCallable {
                    name: call.name.value.clone()
                },
                call.name.location
            ),
            None if builtins::is_builtin(&call.name.value) => {
                let mut args = Vec::with_capacity(call.arguments.len());

                for argument in &call.arguments {
                    args.push(self.eval_expression(argument, env)?);
                }

                builtins::call_builtin(self, &call.name.value, args, call.location)
            },
            None => runtime_error(
                RuntimeErrorType::UndefinedVariable {
                    name: call.name.value.clone()
                },
                call.name.location
            )
        }
    }

    fn call_function(
        &mut self,
        call: &Call,
        function: &Rc<Function>,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        if call.arguments.len() != function.params.len() {
            return runtime_error(
                RuntimeErrorType::ArityMismatch {
                    name: function.name.clone(),
                    expected: function.params.len().to_string(),
                    got: call.arguments.len()
                },
                call.location
            );
        }

        let mut args = Vec::with_capacity(call.arguments.len());

        for argument in &call.arguments {
            args.push(self.eval_expression(argument, env)?);
        }

        if self.depth >= MAX_CALL_DEPTH {
            return runtime_error(RuntimeErrorType::StackOverflow, call.location);
        }

        // A fresh frame on top of the environment captured at definition
        let call_env = Rc::new(RefCell::new(
            Environment::with_parent(Rc::clone(&function.env))
        ));

        for (param, arg) in function.params.iter().zip(args) {
            call_env.borrow_mut().define(param.clone(), arg);
        }

        self.depth += 1;
        let flow = self.eval_block(&function.body, &call_env);
        self.depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil)
        }
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer { value } => Some(*value as f64),
        Value::Float { value } => Some(*value),
        _ => None
    }
}

/// Parses and runs a source file against `env`, wiring the interpreter to
/// the process's stdio.
pub fn run_file(
    path: PathBuf,
    env: &Rc<RefCell<Environment>>,
    interrupt: Option<Box<dyn Fn() -> bool>>
) -> Result<(), Error> {
    let file = File::open(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let mut src = String::new();
    let mut reader = BufReader::new(file);

    let parsed = parse_module_from_stream(reader.chars().map(|result| {
        let c = result.unwrap_or('\u{FFFD}');
        src.push(c);
        c
    }));

    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(error) => return Err(Error::Parse { path, src, error })
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let mut interpreter = Interpreter::new(&mut output, &mut input);

    if let Some(check) = interrupt {
        interpreter = interpreter.with_interrupt(check);
    }

    interpreter.run(&parsed.module.program, env)
        .map_err(|error| Error::Runtime { path, src, error })
}
