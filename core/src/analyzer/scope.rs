use super::errors::CompileErrorKind;
use super::types::{Type, Variable};
use std::collections::HashMap;

pub type VariableTable = HashMap<String, Variable>;

/// 变量符号表
///
/// 全局表常驻；进入函数时先压入全局表的一份拷贝，再压入函数自己的顶层作用域。
/// 函数内对全局同名变量的修改只落在拷贝上，函数结束后随拷贝一起丢弃。
#[derive(Debug, Default)]
pub struct ScopeManager {
    globals: VariableTable,
    /// 仅在函数内非空，最内层在末尾
    scopes: Vec<VariableTable>,
}

impl ScopeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_function(&self) -> bool {
        !self.scopes.is_empty()
    }

    /// 当前压栈的表数量 (函数外为 0)
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    // --- 作用域进出 ---

    pub fn enter_function(&mut self) {
        self.scopes.clear();
        self.scopes.push(self.globals.clone());
        self.scopes.push(VariableTable::new());
    }

    pub fn enter_block(&mut self) {
        self.scopes.push(VariableTable::new());
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// 丢弃所有函数内的表，恢复为只查全局
    pub fn end_function(&mut self) {
        self.scopes.clear();
    }

    // --- 定义 ---

    pub fn declare_global(&mut self, var: Variable) -> Result<(), CompileErrorKind> {
        insert_unique(&mut self.globals, var)
    }

    /// 在最内层作用域定义；函数外等同于全局
    pub fn declare_in_scope(&mut self, var: Variable) -> Result<(), CompileErrorKind> {
        match self.scopes.last_mut() {
            Some(table) => insert_unique(table, var),
            None => insert_unique(&mut self.globals, var),
        }
    }

    // --- 查找与赋值 ---

    /// 函数内从内向外查找 (包含全局拷贝)，函数外只查全局
    pub fn resolve(&self, name: &str) -> Option<&Variable> {
        if self.in_function() {
            return self.scopes.iter().rev().find_map(|table| table.get(name));
        }
        self.globals.get(name)
    }

    fn resolve_mut(&mut self, name: &str) -> Option<&mut Variable> {
        if self.in_function() {
            return self
                .scopes
                .iter_mut()
                .rev()
                .find_map(|table| table.get_mut(name));
        }
        self.globals.get_mut(name)
    }

    pub fn assign(&mut self, name: &str, value: String) -> Result<(), CompileErrorKind> {
        let var = self
            .resolve_mut(name)
            .ok_or(CompileErrorKind::VariableNotFound)?;
        if var.is_final {
            return Err(CompileErrorKind::ChangeFinal);
        }
        var.value = Some(value);
        Ok(())
    }

    pub fn type_of(&self, name: &str) -> Result<Type, CompileErrorKind> {
        self.resolve(name)
            .map(|var| var.ty)
            .ok_or(CompileErrorKind::VariableNotFound)
    }

    pub fn value_of(&self, name: &str) -> Result<Option<&str>, CompileErrorKind> {
        self.resolve(name)
            .map(|var| var.value.as_deref())
            .ok_or(CompileErrorKind::VariableNotFound)
    }
}

fn insert_unique(table: &mut VariableTable, var: Variable) -> Result<(), CompileErrorKind> {
    if table.contains_key(&var.name) {
        return Err(CompileErrorKind::VariableExists);
    }
    table.insert(var.name.clone(), var);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(name: &str, value: Option<&str>, is_final: bool) -> Variable {
        Variable::new(name, Type::Int, value.map(str::to_string), is_final)
    }

    #[test]
    fn duplicate_in_same_table_fails() {
        let mut scopes = ScopeManager::new();
        scopes.declare_global(int("a", None, false)).unwrap();
        assert_eq!(
            scopes.declare_global(int("a", Some("1"), false)),
            Err(CompileErrorKind::VariableExists)
        );
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut scopes = ScopeManager::new();
        scopes.declare_global(int("a", Some("1"), false)).unwrap();
        scopes.enter_function();
        scopes
            .declare_in_scope(Variable::new("a", Type::Str, None, false))
            .unwrap();
        scopes.enter_block();
        scopes.declare_in_scope(int("a", None, false)).unwrap();
        assert_eq!(scopes.type_of("a"), Ok(Type::Int));
        assert_eq!(
            scopes.declare_in_scope(int("a", None, false)),
            Err(CompileErrorKind::VariableExists)
        );
        scopes.exit_scope();
        assert_eq!(scopes.type_of("a"), Ok(Type::Str));
        assert_eq!(scopes.depth(), 2);
    }

    #[test]
    fn function_mutations_stay_in_snapshot() {
        let mut scopes = ScopeManager::new();
        scopes.declare_global(int("g", None, false)).unwrap();

        scopes.enter_function();
        scopes.assign("g", "7".into()).unwrap();
        assert_eq!(scopes.value_of("g"), Ok(Some("7")));
        scopes.end_function();

        assert!(!scopes.in_function());
        assert_eq!(scopes.value_of("g"), Ok(None));
    }

    #[test]
    fn global_writes_reach_later_snapshots() {
        let mut scopes = ScopeManager::new();
        scopes.declare_global(int("g", None, false)).unwrap();
        scopes.assign("g", "3".into()).unwrap();

        scopes.enter_function();
        assert_eq!(scopes.value_of("g"), Ok(Some("3")));
    }

    #[test]
    fn final_and_missing_variables() {
        let mut scopes = ScopeManager::new();
        scopes.declare_global(int("f", Some("1"), true)).unwrap();
        assert_eq!(
            scopes.assign("f", "2".into()),
            Err(CompileErrorKind::ChangeFinal)
        );
        assert_eq!(
            scopes.assign("nope", "2".into()),
            Err(CompileErrorKind::VariableNotFound)
        );
        assert_eq!(scopes.type_of("nope"), Err(CompileErrorKind::VariableNotFound));
    }

    #[test]
    fn locals_are_invisible_after_function() {
        let mut scopes = ScopeManager::new();
        scopes.enter_function();
        scopes.declare_in_scope(int("local", Some("1"), false)).unwrap();
        scopes.end_function();
        assert!(scopes.resolve("local").is_none());
    }
}
