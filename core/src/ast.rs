use crate::analyzer::Type;
use std::fmt;

/// 一行源码经过分类后的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based 行号
    pub number: usize,
    /// 切分后的 Token 文本 (已去掉空片段，字面量保持完整)
    pub tokens: Vec<String>,
    pub statement: Statement,
}

impl Line {
    pub fn kind(&self) -> LineKind {
        self.statement.kind()
    }
}

/// 行的种类标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Blank,
    Comment,
    FinalDeclaration,
    Declaration,
    Assignment,
    FunctionDeclaration,
    FunctionCall,
    If,
    While,
    Return,
    ClosingBrace,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineKind::Blank => "Blank",
            LineKind::Comment => "Comment",
            LineKind::FinalDeclaration => "Final Variable Declaration",
            LineKind::Declaration => "Non-Final Variable Declaration",
            LineKind::Assignment => "Variable Assignment",
            LineKind::FunctionDeclaration => "Function Declaration",
            LineKind::FunctionCall => "Function Call",
            LineKind::If => "If Statement",
            LineKind::While => "While Statement",
            LineKind::Return => "Return Statement",
            LineKind::ClosingBrace => "Closing Bracket",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Blank,
    Comment,
    /// `final int a = 1, b = 2;` / `int a, b = 3;`
    Declaration(Declaration),
    /// `a = 1, b = c;`
    Assignment(Vec<Assignment>),
    /// `void name(int a, final String b) {`
    Function(FunctionHeader),
    /// `name(1, x);`
    Call(Call),
    If(Condition),
    While(Condition),
    Return,
    CloseBrace,
}

impl Statement {
    pub fn kind(&self) -> LineKind {
        match self {
            Statement::Blank => LineKind::Blank,
            Statement::Comment => LineKind::Comment,
            Statement::Declaration(decl) if decl.is_final => LineKind::FinalDeclaration,
            Statement::Declaration(_) => LineKind::Declaration,
            Statement::Assignment(_) => LineKind::Assignment,
            Statement::Function(_) => LineKind::FunctionDeclaration,
            Statement::Call(_) => LineKind::FunctionCall,
            Statement::If(_) => LineKind::If,
            Statement::While(_) => LineKind::While,
            Statement::Return => LineKind::Return,
            Statement::CloseBrace => LineKind::ClosingBrace,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub is_final: bool,
    pub ty: Type,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionHeader {
    pub name: String,
    pub params: Vec<Param>,
}

/// 形参描述：类型 + 是否 final
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Value>,
}

/// `a && 1 || flag`，operands 与 ops 交错排列
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub operands: Vec<Value>,
    pub ops: Vec<LogicalOp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// 右值：字面量或变量名
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Literal(Literal),
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(String),
    Double(String),
    Boolean(bool),
    /// 含引号的原始文本，例如 `'a'`
    Char(String),
    /// 含引号的原始文本，例如 `"hi"`
    Str(String),
}

impl Value {
    /// 原始文本，作为变量的“当前值”记录
    pub fn text(&self) -> String {
        match self {
            Value::Name(name) => name.clone(),
            Value::Literal(Literal::Boolean(b)) => b.to_string(),
            Value::Literal(
                Literal::Int(raw) | Literal::Double(raw) | Literal::Char(raw) | Literal::Str(raw),
            ) => raw.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
