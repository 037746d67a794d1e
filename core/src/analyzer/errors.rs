use serde::Serialize;
use std::fmt;

/// 校验失败时的唯一错误：种类 + 可选的 1-based 行号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// 作用域不平衡只能在文件末尾发现，此时没有行号
    pub line: Option<usize>,
    pub kind: CompileErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompileErrorKind {
    InvalidSyntax,
    InvalidAssignment,
    InvalidBooleanExpression,
    InvalidParameterList,
    InvalidScopeClosing,
    InvalidScopeFunctionDeclaration,
    InvalidActionInGlobalScope,
    LastLineNotReturn,
    VariableExists,
    VariableNotFound,
    ChangeFinal,
    FunctionExists,
    FunctionNotFound,
}

pub type VerifyResult<T> = Result<T, CompileError>;

impl CompileError {
    pub fn at(line: usize, kind: CompileErrorKind) -> Self {
        Self {
            line: Some(line),
            kind,
        }
    }

    pub fn unanchored(kind: CompileErrorKind) -> Self {
        Self { line: None, kind }
    }
}

// === 手动实现 Display ===

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "In line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for CompileError {}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            // --- 语法 ---
            CompileErrorKind::InvalidSyntax => "Invalid syntax",

            // --- 类型 ---
            CompileErrorKind::InvalidAssignment => "Invalid value assignment",
            CompileErrorKind::InvalidBooleanExpression => "Invalid boolean expression",
            CompileErrorKind::InvalidParameterList => "Invalid parameter list in function call",

            // --- 作用域与控制流 ---
            CompileErrorKind::InvalidScopeClosing => {
                "The scopes closed doesn't match the scopes opened"
            }
            CompileErrorKind::InvalidScopeFunctionDeclaration => {
                "Function declaration inside a function is not allowed"
            }
            CompileErrorKind::InvalidActionInGlobalScope => {
                "If or while statement or method call or return in global scope is not allowed"
            }
            CompileErrorKind::LastLineNotReturn => "Last line in method must be a return statement",

            // --- 符号表 ---
            CompileErrorKind::VariableExists => "Variable already exists",
            CompileErrorKind::VariableNotFound => "Variable not found",
            CompileErrorKind::ChangeFinal => "Can't change a final variable value",
            CompileErrorKind::FunctionExists => "Function already exists",
            CompileErrorKind::FunctionNotFound => "Function not found",
        };
        write!(f, "{}", msg)
    }
}
