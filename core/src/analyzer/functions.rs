use super::errors::CompileErrorKind;
use super::types::FunctionSignature;
use crate::ast::Param;
use std::collections::HashMap;

/// 函数符号表：只在第一遍顶层扫描时写入，之后只读
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionSignature>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, signature: FunctionSignature) -> Result<(), CompileErrorKind> {
        if self.exists(&signature.name) {
            return Err(CompileErrorKind::FunctionExists);
        }
        self.functions.insert(signature.name.clone(), signature);
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn params_of(&self, name: &str) -> Result<&[Param], CompileErrorKind> {
        self.functions
            .get(name)
            .map(|sig| sig.params.as_slice())
            .ok_or(CompileErrorKind::FunctionNotFound)
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.functions.len()
    }
}
