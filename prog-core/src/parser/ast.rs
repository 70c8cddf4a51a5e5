use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseErrorType, Precedence},
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub module: Module,
    pub comments: Vec<SrcSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub program: Program
}

// program -> { <statement> } eof
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let mut statements = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::Eof, _)) | None => break,
                Some(_) => statements.push(Statement::parse(parser, None)?)
            }
        }

        let location = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => SrcSpan {
                start: first.location().start,
                end: last.location().end
            },
            _ => SrcSpan { start: 0, end: 0 }
        };

        Ok(Self {
            statements,
            location
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> <let> | <print> | <return> | <if> | <while> | <func_def> | <expression>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(Let),
    Print(Print),
    Return(Return),
    If(If),
    While(While),
    FuncDef(FuncDef),
    Expression(Expression),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let res = match &parser.current_token {
            Some((_, token, _)) => match token {
                Token::Let => Self::Let(Let::parse(parser, None)?),
                Token::Print => Self::Print(Print::parse(parser, None)?),
                Token::Return => Self::Return(Return::parse(parser, None)?),
                Token::If => Self::If(If::parse(parser, None)?),
                Token::While => Self::While(While::parse(parser, None)?),
                Token::Func => Self::FuncDef(FuncDef::parse(parser, None)?),
                _ => Self::Expression(Expression::parse(parser, None)?)
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let(let_) => write!(f, "{let_}"),
            Self::Print(print) => write!(f, "{print}"),
            Self::Return(return_) => write!(f, "{return_}"),
            Self::If(if_) => write!(f, "{if_}"),
            Self::While(while_) => write!(f, "{while_}"),
            Self::FuncDef(func) => write!(f, "{func}"),
            Self::Expression(expression) => write!(f, "{expression}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Let(let_) => let_.location,
            Self::Print(print) => print.location,
            Self::Return(return_) => return_.location,
            Self::If(if_) => if_.location,
            Self::While(while_) => while_.location,
            Self::FuncDef(func) => func.location,
            Self::Expression(expression) => expression.location()
        }
    }
}

// block -> { <statement> } , terminated by `else` or `end` which the
// caller consumes
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Block {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let mut statements = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::Else | Token::End, _)) => break,
                Some((start, Token::Eof, end)) => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: *start, end: *end }
                ),
                Some(_) => statements.push(Statement::parse(parser, None)?),
                None => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }

        let location = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => SrcSpan {
                start: first.location().start,
                end: last.location().end
            },
            _ => SrcSpan { start: 0, end: 0 }
        };

        Ok(Self {
            statements,
            location
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// let -> let <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Let {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::Let)?;

        let name = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        Ok(Self {
            name,
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Let {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {}", self.name, self.value)
    }
}

// print -> print <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Print {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::Print)?;

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        Ok(Self {
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Print {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "print {}", self.value)
    }
}

// return -> return [<expression>]
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Return {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, mut end) = parser.expect_one(Token::Return)?;

        let value = match &parser.current_token {
            Some((_, token, _)) if starts_expression(token) => {
                let value = Expression::parse(parser, None)?;
                end = value.location().end;

                Some(value)
            },
            _ => None
        };

        Ok(Self {
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {}", value),
            None => write!(f, "return")
        }
    }
}

// if -> if <expression> then <block> [else <block>] end
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expression,
    pub consequence: Block,
    pub alternative: Option<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for If {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        let condition = Expression::parse(parser, None)?;

        parser.expect_one(Token::Then)?;

        let consequence = Block::parse(parser, None)?;

        let alternative = match &parser.current_token {
            Some((_, Token::Else, _)) => {
                parser.step();

                Some(Block::parse(parser, None)?)
            },
            _ => None
        };

        let (_, end) = parser.expect_one(Token::End)?;

        Ok(Self {
            condition,
            consequence,
            alternative,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if {} then {}{} end",
            self.condition,
            self.consequence,
            match &self.alternative {
                Some(alternative) => format!(" else {}", alternative),
                None => "".to_string()
            }
        )
    }
}

// while -> while <expression> do <block> end
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for While {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        let condition = Expression::parse(parser, None)?;

        parser.expect_one(Token::Do)?;

        let body = Block::parse(parser, None)?;
        let (_, end) = parser.expect_one(Token::End)?;

        Ok(Self {
            condition,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for While {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while {} do {} end", self.condition, self.body)
    }
}

// func_def -> func <identifier> ( [<identifier> {, <identifier>}] ) <block> end
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FuncDef {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::Func)?;

        let name = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::LParen)?;

        let mut params = vec![];

        if !matches!(parser.current_token, Some((_, Token::RParen, _))) {
            params.push(Identifier::from(parser.expect_ident()?));

            while let Some((_, Token::Comma, _)) = parser.current_token {
                parser.step();
                params.push(Identifier::from(parser.expect_ident()?));
            }
        }

        parser.expect_one(Token::RParen)?;

        let body = Block::parse(parser, None)?;
        let (_, end) = parser.expect_one(Token::End)?;

        Ok(Self {
            name,
            params,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FuncDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.params.iter()
            .map(|param| param.value.clone())
            .collect::<Vec<String>>();

        write!(f, "func {}({}) {} end", self.name, params.join(", "), self.body)
    }
}

// expression -> <identifier> | <primitive> | <list> | <prefix> | <infix>
//             | <logical> | <index> | <call> | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Primitive(Primitive),
    List(ListLiteral),
    Prefix(Prefix),
    Infix(Infix),
    Logical(Logical),
    Index(Index),
    Call(Call),
    Nested {
        expression: Box<Expression>,
        location: SrcSpan
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let mut expr = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::Ident(_) => {
                    let ident = Identifier::from(parser.expect_ident()?);

                    // Call syntax only applies to a plain identifier
                    if matches!(parser.current_token, Some((_, Token::LParen, _))) {
                        Self::Call(Call::parse_with_name(parser, ident)?)
                    } else {
                        Self::Identifier(ident)
                    }
                },
                Token::Int(_)
                | Token::Float(_)
                | Token::String(_)
                | Token::True
                | Token::False
                | Token::Nil => Self::Primitive(Primitive::parse(parser, None)?),
                Token::LSBracket => Self::List(ListLiteral::parse(parser, None)?),
                Token::Minus | Token::Not => Self::Prefix(Prefix::parse(parser, None)?),
                Token::LParen => {
                    let (start, _) = parser.expect_one(Token::LParen)?;

                    let expression = Box::new(Expression::parse(parser, None)?);

                    let (_, end) = parser.expect_one(Token::RParen)?;

                    Self::Nested {
                        expression,
                        location: SrcSpan { start, end }
                    }
                },
                _ => return parse_error(
                    ParseErrorType::ExpectedExpression {
                        token: token.clone()
                    },
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            expr = match &parser.current_token {
                Some((_, next_token, _)) => match next_token {
                    Token::And | Token::Or => {
                        Self::Logical(Logical::parse(parser, expr, precedence)?)
                    },
                    Token::LSBracket => {
                        Self::Index(Index::parse(parser, expr, precedence)?)
                    },
                    token if token.is_infix_operator() => {
                        Self::Infix(Infix::parse(parser, expr, precedence)?)
                    },
                    _ => break
                },
                None => break
            }
        }

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::List(list) => write!(f, "{list}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Logical(logical) => write!(f, "{logical}"),
            Self::Index(index) => write!(f, "{index}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Nested { expression, .. } => write!(f, "({expression})")
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Primitive(primitive) => primitive.location(),
            Self::List(list) => list.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::Logical(logical) => logical.location,
            Self::Index(index) => index.location,
            Self::Call(call) => call.location,
            Self::Nested { location, .. } => *location
        }
    }
}

fn starts_expression(token: &Token) -> bool {
    matches!(token,
        Token::Ident(_)
        | Token::Int(_)
        | Token::Float(_)
        | Token::String(_)
        | Token::True
        | Token::False
        | Token::Nil
        | Token::LSBracket
        | Token::LParen
        | Token::Minus
        | Token::Not
    )
}

// identifier -> <letter> { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

// list -> [ [<expression> {, <expression>}] ]
#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub elements: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ListLiteral {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::LSBracket)?;

        let mut elements = vec![];

        if !matches!(parser.current_token, Some((_, Token::RSBracket, _))) {
            elements.push(Expression::parse(parser, None)?);

            while let Some((_, Token::Comma, _)) = parser.current_token {
                parser.step();
                elements.push(Expression::parse(parser, None)?);
            }
        }

        let (_, end) = parser.expect_one(Token::RSBracket)?;

        Ok(Self {
            elements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ListLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements = self.elements.iter()
            .map(|element| element.to_string())
            .collect::<Vec<String>>();

        write!(f, "[{}]", elements.join(", "))
    }
}

// prefix -> ("-" | not) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Prefix {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, operator, _) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        // `not` binds looser than comparisons, unary minus tighter than `*`
        let operand_precedence = match operator {
            Token::Not => Precedence::Not,
            _ => Precedence::Unary
        };

        let expression = Expression::parse(parser, Some(operand_precedence))?;
        let end = expression.location().end;

        Ok(Self {
            operator,
            expression: Box::new(expression),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.operator {
            Token::Not => write!(f, "not {}", self.expression),
            _ => write!(f, "{}{}", self.operator.as_literal(), self.expression)
        }
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Infix {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let precedence = parser.current_precedence();

        let SrcSpan { start, .. } = left.location();

        let operator = match parser.current_token.take() {
            Some((_, token, _)) if token.is_infix_operator() => {
                parser.step();
                token
            },
            Some((start, token, end)) => {
                parser.current_token = Some((start, token.clone(), end));

                return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token,
                        expected: vec!["an operator".to_string()]
                    },
                    SrcSpan { start, end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        let right = Expression::parse(parser, Some(precedence))?;

        let SrcSpan { end, .. } = right.location();

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_literal(), self.right)
    }
}

// logical -> <expression> (and | or) <expression> , short-circuiting
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Logical {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let precedence = parser.current_precedence();

        let SrcSpan { start, .. } = left.location();

        let operator = match parser.next_token() {
            Some((_, token, _)) => token,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        let right = Expression::parse(parser, Some(precedence))?;

        let SrcSpan { end, .. } = right.location();

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Logical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_literal(), self.right)
    }
}

// index -> <expression> [ <expression> ]
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub target: Box<Expression>,
    pub index: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Index {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let SrcSpan { start, .. } = left.location();

        parser.expect_one(Token::LSBracket)?;

        let index = Expression::parse(parser, None)?;

        let (_, end) = parser.expect_one(Token::RSBracket)?;

        Ok(Self {
            target: Box::new(left),
            index: Box::new(index),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.target, self.index)
    }
}

// call -> <identifier> ( [<expression> {, <expression>}] )
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl Call {
    pub fn parse_with_name<T: Iterator<Item = LexResult>>(
        parser: &mut crate::parser::prelude::Parser<T>,
        name: Identifier,
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let start = name.location.start;

        parser.expect_one(Token::LParen)?;

        let mut arguments = vec![];

        if !matches!(parser.current_token, Some((_, Token::RParen, _))) {
            arguments.push(Expression::parse(parser, None)?);

            while let Some((_, Token::Comma, _)) = parser.current_token {
                parser.step();
                arguments.push(Expression::parse(parser, None)?);
            }
        }

        let (_, end) = parser.expect_one(Token::RParen)?;

        Ok(Self {
            name,
            arguments,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.name, arguments.join(", "))
    }
}

// primitive -> <int> | <float> | <string> | <bool> | nil
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int {
        value: i64,
        location: SrcSpan
    },
    Float {
        value: f64,
        location: SrcSpan
    },
    String {
        value: String,
        location: SrcSpan
    },
    Bool {
        value: bool,
        location: SrcSpan
    },
    Nil {
        location: SrcSpan
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Primitive {
    fn parse(
        parser: &mut crate::parser::prelude::Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        match parser.next_token() {
            Some((start, token, end)) => {
                let location = SrcSpan { start, end };

                match token {
                    Token::Int(value) => Ok(Self::Int { value, location }),
                    Token::Float(value) => Ok(Self::Float { value, location }),
                    Token::String(value) => Ok(Self::String { value, location }),
                    Token::True => Ok(Self::Bool { value: true, location }),
                    Token::False => Ok(Self::Bool { value: false, location }),
                    Token::Nil => Ok(Self::Nil { location }),
                    token => parse_error(
                        ParseErrorType::ExpectedExpression { token },
                        location
                    ),
                }
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            ),
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float { value, .. } => write!(f, "{value}"),
            Self::String { value, .. } => write!(f, "\"{value}\""),
            Self::Bool { value, .. } => write!(f, "{value}"),
            Self::Nil { .. } => write!(f, "nil")
        }
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. }
            | Self::Float { location, .. }
            | Self::String { location, .. }
            | Self::Bool { location, .. }
            | Self::Nil { location } => *location
        }
    }
}
