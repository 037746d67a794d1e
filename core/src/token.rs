use crate::utils::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline(always)]
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

macro_rules! define_tokens {
    (
        dynamic { $($dynamic_variant:ident),* $(,)? }
        keywords { $($keyword_text:literal => $keyword_variant:ident),* $(,)? }
        symbols { $($symbol_text:literal => $symbol_variant:ident),* $(,)? }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TokenKind {
            EOF,
            ERROR,
            // 动态 Token (由词法规则生成，而非直接匹配字符串)
            $($dynamic_variant),*,
            // 关键字
            $($keyword_variant),*,
            // 符号
            $($symbol_variant),*,
        }

        impl TokenKind {
            pub fn as_str(&self) -> &'static str {
                match self {
                    TokenKind::EOF => "end of line",
                    TokenKind::ERROR => "error",
                    $(TokenKind::$dynamic_variant => stringify!($dynamic_variant)),*,
                    $(TokenKind::$keyword_variant => $keyword_text),*,
                    $(TokenKind::$symbol_variant => $symbol_text),*,
                }
            }

            pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
                match text {
                    $($keyword_text => Some(TokenKind::$keyword_variant),)*
                    _ => None,
                }
            }
        }
    };
}

define_tokens! {
    dynamic {
        Identifier,
        Integer,       // 42, -7
        Double,        // 3.14, .5, 5.
        StringLiteral, // "hello world"
        CharLiteral,   // 'a'
    }

    keywords {
        // --- 基础类型 ---
        "int"     => IntType,
        "double"  => DoubleType,
        "boolean" => BooleanType,
        "char"    => CharType,
        "String"  => StringType,

        // --- 声明 ---
        "void"    => Void,
        "final"   => Final,

        // --- 控制流 ---
        "if"      => If,
        "while"   => While,
        "return"  => Return,

        // --- 字面量关键字 ---
        "true"    => True,
        "false"   => False,
    }

    symbols {
        "("  => LeftParen,
        ")"  => RightParen,
        "{"  => LeftBrace,
        "}"  => RightBrace,
        ","  => Comma,
        ";"  => Semicolon,
        "="  => Assign,
        "&&" => AndAnd,
        "||" => OrOr,
    }
}

impl TokenKind {
    /// 是否是类型关键字 (int / double / boolean / char / String)
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::IntType
                | TokenKind::DoubleType
                | TokenKind::BooleanType
                | TokenKind::CharType
                | TokenKind::StringType
        )
    }
}
