use crate::token::{Token, TokenKind};
use core::iter::Peekable;
use core::str::Chars;

/// 单行词法分析器
///
/// 语言以行为单位：每一行单独切分，Span 都是相对于该行起点的字节偏移。
pub struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<Chars<'a>>,
    current_position: usize,
    start_position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.chars().peekable(),
            current_position: 0,
            start_position: 0,
        }
    }

    /// 切分整行，结果总以 EOF 结尾
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::EOF {
                return tokens;
            }
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.start_position, self.current_position)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.current_position += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }
        false
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_next(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next();
        lookahead.next()
    }
}

impl<'a> Lexer<'a> {
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start_position = self.current_position;

        let c = match self.peek() {
            Some(c) => c,
            None => return self.make_token(TokenKind::EOF),
        };

        // 数字可以带符号，也可以以 '.' 开头
        if self.starts_number(c) {
            return self.scan_number();
        }

        self.advance();

        match c {
            c if is_ident_start(c) => self.scan_identifier(),

            '"' => self.scan_string(),
            '\'' => self.scan_char(),

            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '=' => self.make_token(TokenKind::Assign),

            '&' => {
                if self.match_char('&') {
                    self.make_token(TokenKind::AndAnd)
                } else {
                    self.make_token(TokenKind::ERROR)
                }
            }
            '|' => {
                if self.match_char('|') {
                    self.make_token(TokenKind::OrOr)
                } else {
                    self.make_token(TokenKind::ERROR)
                }
            }

            _ => self.make_token(TokenKind::ERROR),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == '\x0B' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// 判断当前位置是否是数字字面量的开头：`5` `.5` `-5` `+.5`
    fn starts_number(&self, c: char) -> bool {
        let next = self.peek_next();
        match c {
            c if c.is_ascii_digit() => true,
            '.' => next.is_some_and(|n| n.is_ascii_digit()),
            '+' | '-' => match next {
                Some(n) if n.is_ascii_digit() => true,
                Some('.') => self.peek_second().is_some_and(|n| n.is_ascii_digit()),
                _ => false,
            },
            _ => false,
        }
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.src[self.start_position..self.current_position];
        let kind = TokenKind::lookup_keyword(text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    /// `[+-]? (\d+ (\.\d*)? | \.\d+)`
    fn scan_number(&mut self) -> Token {
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.advance();
        }
        self.consume_digits();

        if self.match_char('.') {
            self.consume_digits();
            return self.make_token(TokenKind::Double);
        }
        self.make_token(TokenKind::Integer)
    }

    fn consume_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// 字符串不支持转义，也不能跨行
    fn scan_string(&mut self) -> Token {
        while let Some(c) = self.advance() {
            if c == '"' {
                return self.make_token(TokenKind::StringLiteral);
            }
        }
        self.make_token(TokenKind::ERROR)
    }

    /// `''` 在语法上合法 (类型检查阶段才会拒绝)，超过一个字符则是错误
    fn scan_char(&mut self) -> Token {
        if self.match_char('\'') {
            return self.make_token(TokenKind::CharLiteral);
        }
        self.advance();
        if self.match_char('\'') {
            self.make_token(TokenKind::CharLiteral)
        } else {
            self.make_token(TokenKind::ERROR)
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// 注释必须从行首开始
pub fn is_comment_line(line: &str) -> bool {
    line.starts_with("//")
}

/// 统计一行中花括号的净开合数，忽略字面量内的括号和注释行。
/// 第一遍跳过函数体时使用，不做任何语义解释。
pub fn brace_balance(line: &str) -> isize {
    if is_comment_line(line) {
        return 0;
    }

    let mut balance = 0;
    let mut quote: Option<char> = None;
    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '{' => balance += 1,
                '}' => balance -= 1,
                _ => {}
            },
        }
    }
    balance
}
