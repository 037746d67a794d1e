use crate::analyzer::Type;
use crate::ast::*;
use crate::parser::{ParseResult, Parser};
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// 按行首 Token 分流到各结构模式，整行必须被完整消费
    pub fn parse_line(&mut self) -> ParseResult<Statement> {
        let token = self.peek();

        let statement = match token.kind {
            TokenKind::Final => Statement::Declaration(self.parse_declaration()?),
            kind if kind.is_type_keyword() => Statement::Declaration(self.parse_declaration()?),
            TokenKind::Void => Statement::Function(self.parse_function_header()?),
            TokenKind::If => {
                self.advance();
                Statement::If(self.parse_condition_header()?)
            }
            TokenKind::While => {
                self.advance();
                Statement::While(self.parse_condition_header()?)
            }
            TokenKind::Return => {
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Statement::Return
            }
            TokenKind::RightBrace => {
                self.advance();
                Statement::CloseBrace
            }
            TokenKind::Identifier if self.check_nth(1, TokenKind::LeftParen) => {
                Statement::Call(self.parse_call()?)
            }
            TokenKind::Identifier => Statement::Assignment(self.parse_assignment()?),
            _ => return Err(self.error_here("statement")),
        };

        self.expect(TokenKind::EOF)?;
        Ok(statement)
    }

    /// `final? TYPE NAME (= VALUE)? (, NAME (= VALUE)?)* ;`
    /// final 声明的每个变量都必须带初始值
    fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let is_final = self.match_token(&[TokenKind::Final]);
        let ty = self.parse_type()?;

        let mut declarators = Vec::new();
        loop {
            let name = self.parse_variable_name()?;
            let init = if is_final {
                self.expect(TokenKind::Assign)?;
                Some(self.parse_value()?)
            } else if self.match_token(&[TokenKind::Assign]) {
                Some(self.parse_value()?)
            } else {
                None
            };
            declarators.push(Declarator { name, init });

            if !self.match_token(&[TokenKind::Comma]) {
                break;
            }
        }
        self.expect(TokenKind::Semicolon)?;

        Ok(Declaration {
            is_final,
            ty,
            declarators,
        })
    }

    /// `NAME = VALUE (, NAME = VALUE)* ;`
    fn parse_assignment(&mut self) -> ParseResult<Vec<Assignment>> {
        let mut pairs = Vec::new();
        loop {
            let name = self.parse_variable_name()?;
            self.expect(TokenKind::Assign)?;
            let value = self.parse_value()?;
            pairs.push(Assignment { name, value });

            if !self.match_token(&[TokenKind::Comma]) {
                break;
            }
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(pairs)
    }

    /// `void NAME ( (final? TYPE NAME (, final? TYPE NAME)*)? ) {`
    fn parse_function_header(&mut self) -> ParseResult<FunctionHeader> {
        self.expect(TokenKind::Void)?;
        let name = self.parse_function_name()?;
        self.expect(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let is_final = self.match_token(&[TokenKind::Final]);
                let ty = self.parse_type()?;
                let name = self.parse_variable_name()?;
                params.push(Param { name, ty, is_final });

                if !self.match_token(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::LeftBrace)?;
        Ok(FunctionHeader { name, params })
    }

    /// `NAME ( (VALUE (, VALUE)*)? ) ;`
    fn parse_call(&mut self) -> ParseResult<Call> {
        let name = self.parse_function_name()?;
        self.expect(TokenKind::LeftParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_value()?);
                if !self.match_token(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Call { name, args })
    }

    /// `( OPERAND ((&& | ||) OPERAND)* ) {`，关键字 if/while 已被消费
    fn parse_condition_header(&mut self) -> ParseResult<Condition> {
        self.expect(TokenKind::LeftParen)?;

        let mut operands = vec![self.parse_condition_operand()?];
        let mut ops = Vec::new();
        loop {
            let op = if self.match_token(&[TokenKind::AndAnd]) {
                LogicalOp::And
            } else if self.match_token(&[TokenKind::OrOr]) {
                LogicalOp::Or
            } else {
                break;
            };
            ops.push(op);
            operands.push(self.parse_condition_operand()?);
        }

        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::LeftBrace)?;
        Ok(Condition { operands, ops })
    }

    /// 条件里只允许布尔字面量、数字字面量和变量名
    fn parse_condition_operand(&mut self) -> ParseResult<Value> {
        match self.peek().kind {
            TokenKind::StringLiteral | TokenKind::CharLiteral => {
                Err(self.error_here("boolean operand"))
            }
            _ => self.parse_value(),
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        let token = self.peek();
        let raw = self.text(token).to_string();

        let value = match token.kind {
            TokenKind::Integer => Value::Literal(Literal::Int(raw)),
            TokenKind::Double => Value::Literal(Literal::Double(raw)),
            TokenKind::True => Value::Literal(Literal::Boolean(true)),
            TokenKind::False => Value::Literal(Literal::Boolean(false)),
            TokenKind::CharLiteral => Value::Literal(Literal::Char(raw)),
            TokenKind::StringLiteral => Value::Literal(Literal::Str(raw)),
            TokenKind::Identifier if is_variable_name(&raw) => Value::Name(raw),
            _ => return Err(self.error_here("value")),
        };

        self.advance();
        Ok(value)
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        let token = self.peek();
        match Type::from_keyword(token.kind) {
            Some(ty) => {
                self.advance();
                Ok(ty)
            }
            None => Err(self.error_here("type")),
        }
    }

    fn parse_variable_name(&mut self) -> ParseResult<String> {
        let token = self.peek();
        let text = self.text(token);
        if token.kind == TokenKind::Identifier && is_variable_name(text) {
            self.advance();
            return Ok(text.to_string());
        }
        Err(self.error_here("variable name"))
    }

    fn parse_function_name(&mut self) -> ParseResult<String> {
        let token = self.peek();
        let text = self.text(token);
        if token.kind == TokenKind::Identifier && is_function_name(text) {
            self.advance();
            return Ok(text.to_string());
        }
        Err(self.error_here("function name"))
    }
}

/// `[A-Za-z][A-Za-z0-9_]*` 或 `_[A-Za-z0-9][A-Za-z0-9_]*`
fn is_variable_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some('_') => chars.next().is_some_and(|c| c.is_ascii_alphanumeric()),
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

/// 函数名不能以下划线开头
fn is_function_name(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}
