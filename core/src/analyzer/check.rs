mod call;
mod decl;
mod stmt;

use crate::analyzer::{CompileError, CompileErrorKind, Pass, Verifier, VerifyResult};
use crate::ast::*;

impl<'a> Verifier<'a> {
    /// 按行种类与当前上下文 (遍、是否在函数内) 分派语义动作
    pub(super) fn dispatch(&mut self, line: &Line) -> VerifyResult<()> {
        let in_function = self.scopes.in_function();

        match &line.statement {
            Statement::Blank | Statement::Comment => Ok(()),

            // 全局声明只在第一遍登记，函数内声明只在第二遍出现
            Statement::Declaration(decl) => match (self.pass, in_function) {
                (Pass::Collect, false) | (Pass::Check, true) => self.declare_variables(decl),
                _ => Ok(()),
            },

            // 全局赋值在第二遍重放，结果与第一遍一致
            Statement::Assignment(pairs) => self.assign_variables(pairs),

            Statement::Function(header) => {
                if in_function {
                    return Err(self.error(CompileErrorKind::InvalidScopeFunctionDeclaration));
                }
                match self.pass {
                    Pass::Collect => self.collect_function(header),
                    Pass::Check => self.check_function_body(header),
                }
            }

            Statement::Call(call) => {
                if in_function {
                    return self.check_call(call);
                }
                self.global_action(|_| Ok(()))
            }

            Statement::If(cond) | Statement::While(cond) => {
                if in_function {
                    return self.check_conditional(cond);
                }
                // 第一遍整块跳过，错误留给第二遍在同一行报告
                self.global_action(|v| v.skip_block())
            }

            Statement::Return => {
                if in_function {
                    return Ok(());
                }
                self.global_action(|_| Ok(()))
            }

            Statement::CloseBrace => self.close_scope(),
        }
    }

    /// 调用 / if / while / return 出现在全局：第一遍执行 on_collect，第二遍报错
    fn global_action(
        &mut self,
        on_collect: impl FnOnce(&mut Self) -> VerifyResult<()>,
    ) -> VerifyResult<()> {
        match self.pass {
            Pass::Collect => on_collect(self),
            Pass::Check => Err(self.error(CompileErrorKind::InvalidActionInGlobalScope)),
        }
    }

    pub(super) fn close_scope(&mut self) -> VerifyResult<()> {
        if self.depth == 0 {
            return Err(CompileError::unanchored(CompileErrorKind::InvalidScopeClosing));
        }
        self.depth -= 1;
        Ok(())
    }

    /// 逐行消费一个已打开的块，直到与之匹配的 `}`
    /// 返回块内最后一个有内容的行是否是 return (空行和注释不计)
    pub(super) fn consume_block(&mut self) -> VerifyResult<bool> {
        let mut ends_with_return = false;

        loop {
            let Some(line) = self.next_line()? else {
                return Err(CompileError::unanchored(CompileErrorKind::InvalidScopeClosing));
            };

            match line.statement {
                Statement::CloseBrace => {
                    self.close_scope()?;
                    return Ok(ends_with_return);
                }
                Statement::Return => ends_with_return = true,
                Statement::Blank | Statement::Comment => {}
                _ => ends_with_return = false,
            }

            self.dispatch(&line)?;
        }
    }
}
