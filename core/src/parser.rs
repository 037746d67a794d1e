mod top;

use crate::ast::{Line, Statement};
use crate::lexer::{Lexer, is_comment_line};
use crate::token::{Token, TokenKind};
use crate::utils::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub expected: String,
    pub found: TokenKind,
    pub span: Span,
    pub message: String,
}

pub type ParseResult<T> = Result<T, ParseError>;

/// 行分类入口：空行与注释直接判定，其余行按结构模式解析
pub fn classify(number: usize, text: &str) -> ParseResult<Line> {
    if text.trim().is_empty() {
        return Ok(Line {
            number,
            tokens: Vec::new(),
            statement: Statement::Blank,
        });
    }

    if is_comment_line(text) {
        return Ok(Line {
            number,
            tokens: vec![text.to_string()],
            statement: Statement::Comment,
        });
    }

    let mut parser = Parser::new(text);
    let statement = parser.parse_line()?;
    Ok(Line {
        number,
        tokens: parser.token_texts(),
        statement,
    })
}

/// 单行解析器，持有整行的 Token
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Lexer::new(source).tokenize(),
            position: 0,
        }
    }

    // --- Token 检查与消费 ---

    pub fn peek(&self) -> Token {
        self.peek_nth(0)
    }

    /// 越界时返回末尾的 EOF
    pub fn peek_nth(&self, n: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[std::cmp::min(self.position + n, last)]
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn check_nth(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_nth(n).kind == kind
    }

    pub fn advance(&mut self) -> Token {
        let tok = self.peek();
        if tok.kind != TokenKind::EOF {
            self.position += 1;
        }
        tok
    }

    pub fn consume(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// 强制匹配，失败则报错
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if let Some(token) = self.consume(kind) {
            return Ok(token);
        }
        Err(self.error_here(kind.as_str()))
    }

    pub fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    pub fn text(&self, token: Token) -> &'a str {
        token.span.slice(self.source)
    }

    /// 以当前 Token 构造错误
    pub fn error_here(&self, expected: &str) -> ParseError {
        let current = self.peek();
        ParseError {
            expected: expected.to_string(),
            found: current.kind,
            span: current.span,
            message: format!(
                "Expected '{}', but found '{}'",
                expected,
                current.kind.as_str()
            ),
        }
    }

    /// 整行的 Token 文本 (不含 EOF)
    pub fn token_texts(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| t.kind != TokenKind::EOF)
            .map(|t| self.text(*t).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Type;
    use crate::ast::*;

    fn statement(src: &str) -> Statement {
        classify(1, src)
            .unwrap_or_else(|e| panic!("{:?} failed: {}", src, e.message))
            .statement
    }

    fn rejects(src: &str) {
        assert!(classify(1, src).is_err(), "{:?} should be invalid", src);
    }

    #[test]
    fn classify_kinds() {
        let cases = [
            ("", LineKind::Blank),
            ("   \t", LineKind::Blank),
            ("// anything { goes", LineKind::Comment),
            ("final int x = 1;", LineKind::FinalDeclaration),
            ("int x;", LineKind::Declaration),
            ("x = 3 ;", LineKind::Assignment),
            ("void foo(int a, final String b) {", LineKind::FunctionDeclaration),
            ("foo(1, \"s\");", LineKind::FunctionCall),
            ("if (a || true) {", LineKind::If),
            ("while(1){", LineKind::While),
            ("  return;", LineKind::Return),
            ("  }  ", LineKind::ClosingBrace),
        ];
        for (src, kind) in cases {
            assert_eq!(classify(7, src).map(|l| l.kind()), Ok(kind), "{:?}", src);
        }
    }

    #[test]
    fn tokens_drop_whitespace_and_keep_literals() {
        let line = classify(3, r#"  String s="a b" , t;"#).unwrap();
        assert_eq!(line.number, 3);
        assert_eq!(line.tokens, vec!["String", "s", "=", "\"a b\"", ",", "t", ";"]);
    }

    #[test]
    fn declaration_structure() {
        let stmt = statement("double a = 5, b, c = a;");
        assert_eq!(
            stmt,
            Statement::Declaration(Declaration {
                is_final: false,
                ty: Type::Double,
                declarators: vec![
                    Declarator {
                        name: "a".into(),
                        init: Some(Value::Literal(Literal::Int("5".into()))),
                    },
                    Declarator {
                        name: "b".into(),
                        init: None,
                    },
                    Declarator {
                        name: "c".into(),
                        init: Some(Value::Name("a".into())),
                    },
                ],
            })
        );
    }

    #[test]
    fn final_declaration_requires_every_initializer() {
        rejects("final int a;");
        rejects("final int a = 1, b;");
        rejects("final x = 1;");
    }

    #[test]
    fn function_header_structure() {
        let stmt = statement("void  go_2 ( final char c , boolean _b ) {");
        assert_eq!(
            stmt,
            Statement::Function(FunctionHeader {
                name: "go_2".into(),
                params: vec![
                    Param {
                        name: "c".into(),
                        ty: Type::Char,
                        is_final: true,
                    },
                    Param {
                        name: "_b".into(),
                        ty: Type::Boolean,
                        is_final: false,
                    },
                ],
            })
        );
        assert_eq!(
            statement("void empty(){"),
            Statement::Function(FunctionHeader {
                name: "empty".into(),
                params: vec![],
            })
        );
    }

    #[test]
    fn condition_structure() {
        let stmt = statement("if (a && -2.5 || false) {");
        assert_eq!(
            stmt,
            Statement::If(Condition {
                operands: vec![
                    Value::Name("a".into()),
                    Value::Literal(Literal::Double("-2.5".into())),
                    Value::Literal(Literal::Boolean(false)),
                ],
                ops: vec![LogicalOp::And, LogicalOp::Or],
            })
        );
    }

    #[test]
    fn names_follow_identifier_rules() {
        statement("_a1 = 3;");
        rejects("_ = 3;");
        rejects("__a = 3;");
        rejects("1a = 3;");
        rejects("_f();");
        rejects("void _f() {");
    }

    #[test]
    fn keywords_are_reserved() {
        rejects("int int = 5;");
        rejects("true = 5;");
        rejects("while(x);");
        rejects("void if() {");
        rejects("int x = while;");
    }

    #[test]
    fn malformed_lines_are_rejected() {
        rejects("int x = ;");
        rejects("int x = 5");
        rejects("x = 5; y = 3;");
        rejects("int x = 5; // trailing comment");
        rejects("  // indented comment");
        rejects("if () {");
        rejects("if (a &&) {");
        rejects("if (\"s\") {");
        rejects("foo(1,);");
        rejects("void f(int a,) {");
        rejects("void f(int) {");
        rejects("void f(var a) {");
        rejects("return 5;");
        rejects("} }");
        rejects("int x = 5.5.5;");
        rejects("String s = \"open;");
        rejects("int x = 5 + 3;");
    }

    #[test]
    fn parse_error_reports_found_token() {
        let err = classify(1, "int x = ;").unwrap_err();
        assert_eq!(err.found, TokenKind::Semicolon);
        assert_eq!(err.span, Span::new(8, 9));
    }
}
