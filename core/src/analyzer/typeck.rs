use super::scope::ScopeManager;
use super::types::Type;
use crate::ast::{Literal, Value};

/// 判断一个字面量或变量名能否放进 target 类型的位置
///
/// 变量名需要同时满足：类型可赋值、当前已有值。查不到的变量视为不兼容，
/// 由调用方转成对应的错误。
pub fn is_compatible(value: &Value, target: Type, scopes: &ScopeManager) -> bool {
    match value {
        Value::Literal(literal) => literal_fits(literal, target),
        Value::Name(name) => match scopes.resolve(name) {
            Some(var) => var.is_assigned() && target.is_assignable_from(var.ty),
            None => false,
        },
    }
}

fn literal_fits(literal: &Literal, target: Type) -> bool {
    match literal {
        Literal::Int(_) => target.is_assignable_from(Type::Int),
        Literal::Double(_) => target.is_assignable_from(Type::Double),
        Literal::Boolean(_) => target == Type::Boolean,
        // 恰好一个字符
        Literal::Char(raw) => target == Type::Char && raw.chars().count() == 3,
        Literal::Str(_) => target == Type::Str,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Variable;

    fn lit(literal: Literal) -> Value {
        Value::Literal(literal)
    }

    #[test]
    fn literal_grammar_per_type() {
        let scopes = ScopeManager::new();
        let int = lit(Literal::Int("-4".into()));
        let double = lit(Literal::Double("4.".into()));

        assert!(is_compatible(&int, Type::Int, &scopes));
        assert!(is_compatible(&int, Type::Double, &scopes));
        assert!(is_compatible(&int, Type::Boolean, &scopes));
        assert!(!is_compatible(&int, Type::Str, &scopes));

        assert!(!is_compatible(&double, Type::Int, &scopes));
        assert!(is_compatible(&double, Type::Boolean, &scopes));

        assert!(is_compatible(&lit(Literal::Boolean(true)), Type::Boolean, &scopes));
        assert!(!is_compatible(&lit(Literal::Boolean(true)), Type::Int, &scopes));

        assert!(is_compatible(&lit(Literal::Char("'x'".into())), Type::Char, &scopes));
        assert!(!is_compatible(&lit(Literal::Char("''".into())), Type::Char, &scopes));
        assert!(!is_compatible(&lit(Literal::Char("'x'".into())), Type::Str, &scopes));

        assert!(is_compatible(&lit(Literal::Str("\"\"".into())), Type::Str, &scopes));
        assert!(!is_compatible(&lit(Literal::Str("\"a\"".into())), Type::Char, &scopes));
    }

    #[test]
    fn identifiers_need_value_and_compatible_type() {
        let mut scopes = ScopeManager::new();
        scopes
            .declare_global(Variable::new("i", Type::Int, Some("1".into()), false))
            .unwrap();
        scopes
            .declare_global(Variable::new("d", Type::Double, Some("1.0".into()), false))
            .unwrap();
        scopes
            .declare_global(Variable::new("empty", Type::Int, None, false))
            .unwrap();

        let name = |n: &str| Value::Name(n.into());
        assert!(is_compatible(&name("i"), Type::Double, &scopes));
        assert!(is_compatible(&name("d"), Type::Boolean, &scopes));
        assert!(!is_compatible(&name("d"), Type::Int, &scopes));
        assert!(!is_compatible(&name("empty"), Type::Int, &scopes));
        assert!(!is_compatible(&name("missing"), Type::Boolean, &scopes));
    }
}
