use crate::analyzer::{CompileErrorKind, Variable, Verifier, VerifyResult, is_compatible};
use crate::ast::{Assignment, Declaration};
use log::trace;

impl<'a> Verifier<'a> {
    /// 逐个声明项处理，左边的变量对右边的初始值立即可见
    pub(crate) fn declare_variables(&mut self, decl: &Declaration) -> VerifyResult<()> {
        for declarator in &decl.declarators {
            let value = match &declarator.init {
                Some(init) => {
                    if !is_compatible(init, decl.ty, &self.scopes) {
                        return Err(self.error(CompileErrorKind::InvalidAssignment));
                    }
                    Some(init.text())
                }
                None => None,
            };

            let var = Variable::new(declarator.name.clone(), decl.ty, value, decl.is_final);
            self.scopes
                .declare_in_scope(var)
                .map_err(|kind| self.error(kind))?;
            trace!("line {}: declared {} {}", self.line, decl.ty, declarator.name);
        }
        Ok(())
    }

    /// 查找 → final 检查 → 类型检查 → 写入，每一对依次进行
    pub(crate) fn assign_variables(&mut self, pairs: &[Assignment]) -> VerifyResult<()> {
        for pair in pairs {
            let Some(var) = self.scopes.resolve(&pair.name) else {
                return Err(self.error(CompileErrorKind::VariableNotFound));
            };
            if var.is_final {
                return Err(self.error(CompileErrorKind::ChangeFinal));
            }
            if !is_compatible(&pair.value, var.ty, &self.scopes) {
                return Err(self.error(CompileErrorKind::InvalidAssignment));
            }

            self.scopes
                .assign(&pair.name, pair.value.text())
                .map_err(|kind| self.error(kind))?;
        }
        Ok(())
    }
}
