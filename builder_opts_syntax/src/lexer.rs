/* Go tokenizer with automatic semicolon insertion */

use crate::errors::{ParseError, ParseResult, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    fn from_ident(ident: &str) -> Option<Self> {
        let keyword = match ident {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "chan" => Keyword::Chan,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "defer" => Keyword::Defer,
            "else" => Keyword::Else,
            "fallthrough" => Keyword::Fallthrough,
            "for" => Keyword::For,
            "func" => Keyword::Func,
            "go" => Keyword::Go,
            "goto" => Keyword::Goto,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "interface" => Keyword::Interface,
            "map" => Keyword::Map,
            "package" => Keyword::Package,
            "range" => Keyword::Range,
            "return" => Keyword::Return,
            "select" => Keyword::Select,
            "struct" => Keyword::Struct,
            "switch" => Keyword::Switch,
            "type" => Keyword::Type,
            "var" => Keyword::Var,
            _ => return None,
        };
        Some(keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Keyword(Keyword),
    /// Literal text exactly as written, quotes included.
    Literal(LitKind, String),
    Op(&'static str),
    Semi,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

/* Longest operators first so prefix matching picks the right one */
const OPERATORS: &[&str] = &[
    "&^=", "<<=", ">>=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%", "&", "|",
    "^", "<", ">", "=", "!", "~", "(", ")", "[", "]", "{", "}", ",", ".", ":",
];

pub struct Lexer {
    chars: Vec<char>,
    idx: usize,
    line: u32,
    column: u32,
    /* Whether a newline after the previous token inserts a semicolon */
    semi_pending: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            idx: 0,
            line: 1,
            column: 1,
            semi_pending: false,
        }
    }

    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.idx + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.idx += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn semi(&mut self, pos: Pos) -> Token {
        self.semi_pending = false;
        Token {
            kind: TokenKind::Semi,
            pos,
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        loop {
            let pos = self.pos();
            let Some(c) = self.peek() else {
                if self.semi_pending {
                    return Ok(self.semi(pos));
                }
                return Ok(Token {
                    kind: TokenKind::Eof,
                    pos,
                });
            };

            match c {
                '\n' => {
                    self.bump();
                    if self.semi_pending {
                        return Ok(self.semi(pos));
                    }
                }
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '/' if self.peek_at(1) == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let spans_lines = self.skip_general_comment(pos)?;
                    if spans_lines && self.semi_pending {
                        return Ok(self.semi(pos));
                    }
                }
                _ => return self.scan_token(c, pos),
            }
        }
    }

    /* Returns whether the comment contained a newline */
    fn skip_general_comment(&mut self, start: Pos) -> ParseResult<bool> {
        self.bump();
        self.bump();
        let mut spans_lines = false;
        loop {
            match self.bump() {
                None => return Err(ParseError::new(start, "comment not terminated")),
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(spans_lines);
                }
                Some('\n') => spans_lines = true,
                Some(_) => {}
            }
        }
    }

    fn scan_token(&mut self, c: char, pos: Pos) -> ParseResult<Token> {
        let kind = if c.is_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(c) = self.peek() {
                if c.is_alphanumeric() || c == '_' {
                    ident.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
            match Keyword::from_ident(&ident) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Ident(ident),
            }
        } else if c.is_ascii_digit() || (c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) {
            self.scan_number()
        } else if c == '"' {
            self.scan_interpreted_string(pos)?
        } else if c == '`' {
            self.scan_raw_string(pos)?
        } else if c == '\'' {
            self.scan_rune(pos)?
        } else {
            self.scan_operator(pos)?
        };

        self.semi_pending = match &kind {
            TokenKind::Ident(_) | TokenKind::Literal(..) => true,
            TokenKind::Keyword(keyword) => matches!(
                keyword,
                Keyword::Break | Keyword::Continue | Keyword::Fallthrough | Keyword::Return
            ),
            TokenKind::Op(op) => matches!(*op, "++" | "--" | ")" | "]" | "}"),
            TokenKind::Semi | TokenKind::Eof => false,
        };

        Ok(Token { kind, pos })
    }

    fn scan_number(&mut self) -> TokenKind {
        let mut text = String::new();
        let is_hex = self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X'));
        let mut is_float = false;

        while let Some(c) = self.peek() {
            if c == '.' {
                if self.peek_at(1) == Some('.') {
                    break;
                }
                is_float = true;
            } else if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            text.push(c);
            self.bump();

            let exponent = if is_hex {
                matches!(c, 'p' | 'P')
            } else {
                matches!(c, 'e' | 'E')
            };
            if exponent {
                is_float = true;
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.bump();
                }
            }
        }

        let kind = if text.ends_with('i') {
            LitKind::Imag
        } else if is_float {
            LitKind::Float
        } else {
            LitKind::Int
        };
        TokenKind::Literal(kind, text)
    }

    fn scan_interpreted_string(&mut self, start: Pos) -> ParseResult<TokenKind> {
        let mut text = String::new();
        text.push('"');
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(ParseError::new(start, "string literal not terminated"))
                }
                Some('\\') => {
                    text.push('\\');
                    self.bump();
                    if let Some(escaped) = self.peek().filter(|c| *c != '\n') {
                        text.push(escaped);
                        self.bump();
                    }
                }
                Some('"') => {
                    text.push('"');
                    self.bump();
                    return Ok(TokenKind::Literal(LitKind::String, text));
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                }
            }
        }
    }

    fn scan_raw_string(&mut self, start: Pos) -> ParseResult<TokenKind> {
        let mut text = String::new();
        text.push('`');
        self.bump();
        loop {
            match self.bump() {
                None => return Err(ParseError::new(start, "raw string literal not terminated")),
                Some('`') => {
                    text.push('`');
                    return Ok(TokenKind::Literal(LitKind::String, text));
                }
                /* Carriage returns are discarded from raw strings */
                Some('\r') => {}
                Some(c) => text.push(c),
            }
        }
    }

    fn scan_rune(&mut self, start: Pos) -> ParseResult<TokenKind> {
        let mut text = String::new();
        text.push('\'');
        self.bump();
        let mut count = 0;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(ParseError::new(start, "rune literal not terminated"))
                }
                Some('\\') => {
                    text.push('\\');
                    self.bump();
                    if let Some(escaped) = self.peek().filter(|c| *c != '\n') {
                        text.push(escaped);
                        self.bump();
                    }
                    count += 1;
                }
                Some('\'') => {
                    text.push('\'');
                    self.bump();
                    if count == 0 {
                        return Err(ParseError::new(start, "empty rune literal or unescaped ' in rune literal"));
                    }
                    return Ok(TokenKind::Literal(LitKind::Char, text));
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                    count += 1;
                }
            }
        }
    }

    fn scan_operator(&mut self, pos: Pos) -> ParseResult<TokenKind> {
        if self.peek() == Some(';') {
            self.bump();
            return Ok(TokenKind::Semi);
        }
        for op in OPERATORS {
            let matches = op
                .chars()
                .enumerate()
                .all(|(offset, expected)| self.peek_at(offset) == Some(expected));
            if matches {
                for _ in 0..op.chars().count() {
                    self.bump();
                }
                return Ok(TokenKind::Op(op));
            }
        }
        let c = self.peek().unwrap_or_default();
        Err(ParseError::new(
            pos,
            format!("invalid character U+{:04X} '{}'", c as u32, c),
        ))
    }
}

pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}
