use crate::analyzer::{CompileError, CompileErrorKind, FunctionSignature, Verifier, VerifyResult};
use crate::ast::FunctionHeader;
use crate::lexer::brace_balance;
use log::debug;

impl<'a> Verifier<'a> {
    /// 第一遍：登记函数签名，然后不解释地跳过函数体
    pub(crate) fn collect_function(&mut self, header: &FunctionHeader) -> VerifyResult<()> {
        let signature = FunctionSignature {
            name: header.name.clone(),
            params: header.params.clone(),
            line: self.line,
        };
        if let Some(first) = self.functions.get(&header.name) {
            debug!(
                "line {}: function {} already declared at line {}",
                self.line, header.name, first.line
            );
        }
        self.functions
            .declare(signature)
            .map_err(|kind| self.error(kind))?;
        debug!(
            "line {}: registered function {} ({} parameter(s))",
            self.line,
            header.name,
            header.params.len()
        );

        self.skip_block()
    }

    /// 按花括号平衡跳过一个块；块头所在行已经贡献了一个 `{`
    pub(crate) fn skip_block(&mut self) -> VerifyResult<()> {
        let start = self.line;
        let mut balance: isize = 1;

        while balance > 0 {
            let Some(text) = self.next_raw_line() else {
                return Err(CompileError::unanchored(CompileErrorKind::InvalidScopeClosing));
            };
            balance += brace_balance(text);
        }

        debug!("skipped block from line {} to line {}", start, self.line);
        Ok(())
    }
}
