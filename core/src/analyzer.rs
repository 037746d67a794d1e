mod check;
mod collect;
mod errors;
mod functions;
mod scope;
mod typeck;
mod types;

pub use errors::{CompileError, CompileErrorKind, VerifyResult};
pub use functions::FunctionTable;
pub use scope::{ScopeManager, VariableTable};
pub use typeck::is_compatible;
pub use types::{FunctionSignature, Type, Variable};

use crate::ast::Line;
use crate::parser;
use crate::source::{LineCursor, SourceFile};
use log::{debug, trace};

/// 当前所处的扫描遍
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// 第一遍：收集函数签名与全局声明，跳过函数体
    Collect,
    /// 第二遍：逐行校验函数体
    Check,
}

/// 两遍扫描的校验引擎
///
/// 持有读取游标、当前遍、块嵌套计数和行号；一个实例只服务一次校验。
pub struct Verifier<'a> {
    source: &'a SourceFile,
    cursor: LineCursor<'a>,
    pub(crate) pass: Pass,
    /// 块嵌套计数，永不为负
    pub(crate) depth: usize,
    /// 最近读取的行号 (1-based)
    pub(crate) line: usize,
    pub(crate) scopes: ScopeManager,
    pub(crate) functions: FunctionTable,
}

impl<'a> Verifier<'a> {
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            source,
            cursor: source.cursor(),
            pass: Pass::Collect,
            depth: 0,
            line: 0,
            scopes: ScopeManager::new(),
            functions: FunctionTable::new(),
        }
    }

    /// 入口：第一遍收集，第二遍校验。遇到第一个错误立即返回。
    pub fn verify(mut self) -> VerifyResult<()> {
        self.run_pass(Pass::Collect)?;
        debug!(
            "{}: collected {} function signature(s)",
            self.source.name,
            self.functions.len()
        );
        self.run_pass(Pass::Check)
    }

    fn run_pass(&mut self, pass: Pass) -> VerifyResult<()> {
        debug!("{}: starting {:?} pass", self.source.name, pass);
        self.pass = pass;
        self.cursor = self.source.cursor();
        self.line = 0;
        self.depth = 0;

        while let Some(line) = self.next_line()? {
            self.dispatch(&line)?;
        }

        if self.depth != 0 {
            return Err(CompileError::unanchored(CompileErrorKind::InvalidScopeClosing));
        }
        debug!("{}: {:?} pass finished at line {}", self.source.name, pass, self.line);
        Ok(())
    }

    /// 读取并分类下一行；文件结束返回 None
    pub(crate) fn next_line(&mut self) -> VerifyResult<Option<Line>> {
        let Some((number, text)) = self.cursor.next() else {
            return Ok(None);
        };
        self.line = number;

        match parser::classify(number, text) {
            Ok(line) => {
                trace!("line {}: {}", number, line.kind());
                Ok(Some(line))
            }
            Err(e) => {
                debug!("line {}: {}", number, e.message);
                Err(self.error(CompileErrorKind::InvalidSyntax))
            }
        }
    }

    /// 读取下一行原文，不做分类 (第一遍跳过块时使用)
    fn next_raw_line(&mut self) -> Option<&'a str> {
        let (_, text) = self.cursor.next()?;
        self.line = self.cursor.line_number();
        Some(text)
    }

    /// 以当前行号构造错误
    pub fn error(&self, kind: CompileErrorKind) -> CompileError {
        CompileError::at(self.line, kind)
    }

    // --- 作用域获取：进入与退出总是成对，错误路径也会弹出 ---

    fn with_function<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> VerifyResult<T>,
    ) -> VerifyResult<T> {
        self.scopes.enter_function();
        let result = f(self);
        self.scopes.end_function();
        result
    }

    fn with_block<T>(&mut self, f: impl FnOnce(&mut Self) -> VerifyResult<T>) -> VerifyResult<T> {
        self.scopes.enter_block();
        let result = f(self);
        self.scopes.exit_scope();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify(src: &str) -> VerifyResult<()> {
        let file = SourceFile::new("test.sjava".into(), src.to_string());
        Verifier::new(&file).verify()
    }

    fn fails_with(src: &str, line: Option<usize>, kind: CompileErrorKind) {
        assert_eq!(verify(src), Err(CompileError { line, kind }), "{}", src);
    }

    const CALLER: &str = "\
int x = 5;
void f(int y) {
    return;
}
void main() {
    f(x);
    return;
}
";

    #[test]
    fn reference_program_verifies() {
        assert_eq!(verify(CALLER), Ok(()));
    }

    #[test]
    fn wrong_argument_type_is_reported_at_call() {
        let src = CALLER.replace("f(x);", "f(\"a\");");
        fails_with(&src, Some(6), CompileErrorKind::InvalidParameterList);
    }

    #[test]
    fn missing_function_brace_is_unanchored() {
        let src = "int x = 5;\nvoid f(int y) {\n    return;\n";
        fails_with(src, None, CompileErrorKind::InvalidScopeClosing);
    }

    #[test]
    fn final_reassignment_fails_at_assignment() {
        let src = "final int z = 1;\nvoid f() {\n    z = 2;\n    return;\n}\n";
        fails_with(src, Some(3), CompileErrorKind::ChangeFinal);

        let global = "final int z = 1;\nz = 2;\n";
        fails_with(global, Some(2), CompileErrorKind::ChangeFinal);
    }

    #[test]
    fn forward_calls_resolve() {
        let src = "\
void first() {
    second(1, 2.5);
    return;
}
void second(int a, double b) {
    return;
}
";
        assert_eq!(verify(src), Ok(()));
    }

    #[test]
    fn unknown_function_and_variable() {
        fails_with(
            "void f() {\n    g();\n    return;\n}\n",
            Some(2),
            CompileErrorKind::FunctionNotFound,
        );
        fails_with(
            "void f() {\n    a = 1;\n    return;\n}\n",
            Some(2),
            CompileErrorKind::VariableNotFound,
        );
    }

    #[test]
    fn function_scope_reset_between_functions() {
        let src = "\
void f() {
    int local = 1;
    return;
}
void g() {
    local = 2;
    return;
}
";
        fails_with(src, Some(6), CompileErrorKind::VariableNotFound);
    }

    #[test]
    fn stray_closing_brace() {
        fails_with("int a;\n}\n", None, CompileErrorKind::InvalidScopeClosing);
    }

    #[test]
    fn first_error_in_file_order_within_pass() {
        let src = "int a = \"s\";\nint a;\n";
        fails_with(src, Some(1), CompileErrorKind::InvalidAssignment);
    }
}
