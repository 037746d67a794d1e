use crate::analyzer::{CompileErrorKind, Verifier, VerifyResult, is_compatible};
use crate::ast::Call;

impl<'a> Verifier<'a> {
    /// 实参个数必须与形参一致，按位置逐个检查类型
    pub(crate) fn check_call(&mut self, call: &Call) -> VerifyResult<()> {
        let params = self
            .functions
            .params_of(&call.name)
            .map_err(|kind| self.error(kind))?;

        let fits = params.len() == call.args.len()
            && params
                .iter()
                .zip(&call.args)
                .all(|(param, arg)| is_compatible(arg, param.ty, &self.scopes));

        if !fits {
            return Err(self.error(CompileErrorKind::InvalidParameterList));
        }
        Ok(())
    }
}
