use crate::analyzer::{CompileErrorKind, Type, Variable, Verifier, VerifyResult, is_compatible};
use crate::ast::{Condition, FunctionHeader};
use log::debug;

impl<'a> Verifier<'a> {
    /// if / while：每个操作数都必须能当作 boolean，然后在新作用域里消费块
    pub(crate) fn check_conditional(&mut self, cond: &Condition) -> VerifyResult<()> {
        let valid = cond
            .operands
            .iter()
            .all(|operand| is_compatible(operand, Type::Boolean, &self.scopes));
        if !valid {
            return Err(self.error(CompileErrorKind::InvalidBooleanExpression));
        }

        self.with_block(|v| {
            v.depth += 1;
            v.consume_block().map(|_| ())
        })
    }

    /// 第二遍：校验整个函数体，最后一个有内容的行必须是 `return;`
    pub(crate) fn check_function_body(&mut self, header: &FunctionHeader) -> VerifyResult<()> {
        debug!("line {}: checking body of {}", self.line, header.name);

        self.with_function(|v| {
            for param in &header.params {
                v.scopes
                    .declare_in_scope(Variable::parameter(param))
                    .map_err(|kind| v.error(kind))?;
            }

            v.depth += 1;
            if !v.consume_block()? {
                return Err(v.error(CompileErrorKind::LastLineNotReturn));
            }
            Ok(())
        })
    }
}
