use crate::ast::Param;
use crate::token::TokenKind;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Int,
    Double,
    Boolean,
    Char,
    /// `String`
    Str,
}

impl Type {
    pub fn from_keyword(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::IntType => Some(Type::Int),
            TokenKind::DoubleType => Some(Type::Double),
            TokenKind::BooleanType => Some(Type::Boolean),
            TokenKind::CharType => Some(Type::Char),
            TokenKind::StringType => Some(Type::Str),
            _ => None,
        }
    }

    /// 赋值兼容性：self = source 是否合法
    /// int 可以拓宽为 double；boolean 位置接受 int/double (非零即真)
    pub fn is_assignable_from(&self, source: Type) -> bool {
        if *self == source {
            return true;
        }
        matches!(
            (self, source),
            (Type::Double, Type::Int) | (Type::Boolean, Type::Int) | (Type::Boolean, Type::Double)
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Double => "double",
            Type::Boolean => "boolean",
            Type::Char => "char",
            Type::Str => "String",
        };
        write!(f, "{}", name)
    }
}

/// 变量表中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub ty: Type,
    /// None 表示尚未赋值
    pub value: Option<String>,
    pub is_final: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: Type, value: Option<String>, is_final: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
            is_final,
        }
    }

    /// 形参在函数体内视为已赋值
    pub fn parameter(param: &Param) -> Self {
        Self::new(
            param.name.clone(),
            param.ty,
            Some(PARAMETER_VALUE.to_string()),
            param.is_final,
        )
    }

    pub fn is_assigned(&self) -> bool {
        self.value.is_some()
    }
}

const PARAMETER_VALUE: &str = "<argument>";

/// 函数签名：名字 + 有序形参
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<Param>,
    /// 声明所在行
    pub line: usize,
}
