/* Declaration-level Go parser
 *
 * Package clause, imports and every top-level declaration are parsed. Type
 * expressions are parsed completely; function bodies and var/const
 * initialisers are skipped with bracket balancing.
 */

use crate::ast::{
    ArrayLen, ChanDir, ConstExpr, Decl, FieldGroup, FuncBody, FuncDecl, ImportSpec, InterfaceElem,
    Signature, SourceFile, TypeExpr, TypeSpec, UnionTerm, ValueSpec,
};
use crate::errors::{ParseError, ParseResult, Pos};
use crate::lexer::{tokenize, Keyword, LitKind, Token, TokenKind};

/// Parse Go source text into a [`SourceFile`].
pub fn parse(source: &str) -> ParseResult<SourceFile> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).parse_file()
}

/* One comma-separated entry of a parameter list before names are resolved */
enum ParamEntry {
    /* A lone identifier: a parameter name or a type name, decided later */
    Bare(String, Pos),
    Named(String, TypeExpr),
    Unnamed(TypeExpr, Pos),
}

pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, idx: 0 }
    }

    /* ---- token access ---- */

    fn peek(&self) -> &TokenKind {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &TokenKind {
        /* The token stream always ends with Eof */
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.idx + n).min(last)].kind
    }

    fn pos(&self) -> Pos {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[self.idx.min(last)].pos
    }

    fn bump(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if kind != TokenKind::Eof {
            self.idx += 1;
        }
        kind
    }

    fn at_op(&self, op: &str) -> bool {
        matches!(self.peek(), TokenKind::Op(found) if *found == op)
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        *self.peek() == TokenKind::Keyword(keyword)
    }

    fn eat_op(&mut self, op: &str) -> bool {
        if self.at_op(op) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_op(&mut self, op: &str) -> ParseResult<()> {
        if self.eat_op(op) {
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", op)))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<()> {
        if self.at_keyword(keyword) {
            self.bump();
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", keyword_text(keyword))))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /* A semicolon may be omitted before a closing ')' or '}' */
    fn expect_semi(&mut self) -> ParseResult<()> {
        match self.peek() {
            TokenKind::Semi => {
                self.bump();
                Ok(())
            }
            TokenKind::Op(")") | TokenKind::Op("}") | TokenKind::Eof => Ok(()),
            _ => Err(self.expected("';' or newline")),
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        ParseError::new(
            self.pos(),
            format!("expected {}, found {}", what, describe(self.peek())),
        )
    }

    /* Run `f`, rewinding the token cursor if it fails */
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> Option<T> {
        let start = self.idx;
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.idx = start;
                None
            }
        }
    }

    /* ---- file structure ---- */

    pub fn parse_file(mut self) -> ParseResult<SourceFile> {
        self.expect_keyword(Keyword::Package)?;
        let package_pos = self.pos();
        let package = self.expect_ident()?;
        if package == "_" {
            return Err(ParseError::new(package_pos, "invalid package name _"));
        }
        self.expect_semi()?;

        let mut imports = Vec::new();
        while self.at_keyword(Keyword::Import) {
            self.bump();
            self.parse_group(|parser| {
                imports.push(parser.parse_import_spec()?);
                Ok(())
            })?;
            self.expect_semi()?;
        }

        let mut decls = Vec::new();
        while *self.peek() != TokenKind::Eof {
            decls.push(self.parse_top_level_decl()?);
            if *self.peek() != TokenKind::Eof {
                match self.peek() {
                    TokenKind::Semi => {
                        self.bump();
                    }
                    _ => return Err(self.expected("';' or newline after top level declaration")),
                }
            }
        }

        Ok(SourceFile {
            package,
            imports,
            decls,
        })
    }

    /* Either a single spec or a parenthesized, semicolon-separated group */
    fn parse_group(&mut self, mut spec: impl FnMut(&mut Self) -> ParseResult<()>) -> ParseResult<()> {
        if self.eat_op("(") {
            while !self.at_op(")") {
                spec(self)?;
                self.expect_semi()?;
            }
            self.expect_op(")")
        } else {
            spec(self)
        }
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let alias = match self.peek() {
            TokenKind::Op(".") => {
                self.bump();
                Some(".".to_string())
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.bump();
                Some(name)
            }
            _ => None,
        };
        match self.peek() {
            TokenKind::Literal(LitKind::String, text) => {
                let path = unquote(text);
                self.bump();
                Ok(ImportSpec { alias, path })
            }
            _ => Err(self.expected("import path")),
        }
    }

    fn parse_top_level_decl(&mut self) -> ParseResult<Decl> {
        match self.peek() {
            TokenKind::Keyword(Keyword::Type) => {
                self.bump();
                let mut specs = Vec::new();
                self.parse_group(|parser| {
                    specs.push(parser.parse_type_spec()?);
                    Ok(())
                })?;
                Ok(Decl::Type(specs))
            }
            TokenKind::Keyword(keyword @ (Keyword::Var | Keyword::Const)) => {
                let is_const = *keyword == Keyword::Const;
                self.bump();
                let mut specs = Vec::new();
                self.parse_group(|parser| {
                    specs.push(parser.parse_value_spec()?);
                    Ok(())
                })?;
                Ok(if is_const {
                    Decl::Const(specs)
                } else {
                    Decl::Var(specs)
                })
            }
            TokenKind::Keyword(Keyword::Func) => self.parse_func_decl().map(Decl::Func),
            TokenKind::Keyword(Keyword::Import) => Err(ParseError::new(
                self.pos(),
                "imports must appear before other declarations",
            )),
            _ => Err(self.expected("declaration")),
        }
    }

    fn parse_type_spec(&mut self) -> ParseResult<TypeSpec> {
        let name = self.expect_ident()?;

        /* `[P any]` opens a type parameter list; `[N]T`, `[pkg.N]T`, `[N + 1]T`
         * and `[]T` are array and slice types */
        let may_have_type_params = self.at_op("[")
            && matches!(self.peek_nth(1), TokenKind::Ident(_))
            && !matches!(self.peek_nth(2), TokenKind::Op("]" | "."));
        let type_params = if may_have_type_params {
            self.attempt(|parser| {
                let params = parser.parse_type_params()?;
                if parser.at_op("=") || parser.at_type_start() {
                    Ok(params)
                } else {
                    Err(parser.expected("type"))
                }
            })
            .unwrap_or_default()
        } else {
            Vec::new()
        };

        let alias = self.eat_op("=");
        let ty = self.parse_type()?;
        Ok(TypeSpec {
            name,
            type_params,
            alias,
            ty,
        })
    }

    fn parse_value_spec(&mut self) -> ParseResult<ValueSpec> {
        let names = self.parse_ident_list()?;
        let ty = match self.peek() {
            TokenKind::Op("=") | TokenKind::Semi | TokenKind::Op(")") | TokenKind::Eof => None,
            _ => Some(self.parse_type()?),
        };
        let has_values = self.eat_op("=");
        if has_values {
            self.skip_until_spec_end()?;
        }
        Ok(ValueSpec {
            names,
            ty,
            has_values,
        })
    }

    fn parse_func_decl(&mut self) -> ParseResult<FuncDecl> {
        self.expect_keyword(Keyword::Func)?;

        let recv = if self.at_op("(") {
            let recv_pos = self.pos();
            let mut params = self.parse_parameters()?;
            if params.len() != 1 || params[0].names.len() > 1 {
                return Err(ParseError::new(recv_pos, "method has multiple receivers"));
            }
            params.pop()
        } else {
            None
        };

        let name = self.expect_ident()?;
        let type_params = if self.at_op("[") {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        let signature = self.parse_signature()?;

        let body = if self.at_op("{") {
            self.skip_balanced()?;
            Some(FuncBody::Skipped)
        } else {
            None
        };

        Ok(FuncDecl {
            recv,
            name,
            type_params,
            signature,
            body,
        })
    }

    fn parse_ident_list(&mut self) -> ParseResult<Vec<String>> {
        let mut names = vec![self.expect_ident()?];
        while self.eat_op(",") {
            names.push(self.expect_ident()?);
        }
        Ok(names)
    }

    /* ---- skipping ---- */

    /* Skip one bracketed region starting at the current opening bracket */
    fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut closers: Vec<(&'static str, Pos)> = Vec::new();
        loop {
            let pos = self.pos();
            match self.bump() {
                TokenKind::Op("(") => closers.push((")", pos)),
                TokenKind::Op("[") => closers.push(("]", pos)),
                TokenKind::Op("{") => closers.push(("}", pos)),
                TokenKind::Op(close @ (")" | "]" | "}")) => match closers.pop() {
                    Some((expected, _)) if expected == close => {}
                    _ => return Err(ParseError::new(pos, format!("unexpected '{}'", close))),
                },
                TokenKind::Eof => {
                    let (expected, open_pos) = closers.last().copied().unwrap_or(("}", pos));
                    return Err(ParseError::new(
                        open_pos,
                        format!("expected '{}', found EOF", expected),
                    ));
                }
                _ => {}
            }
            if closers.is_empty() {
                return Ok(());
            }
        }
    }

    /* Skip an initialiser list up to the end of its spec */
    fn skip_until_spec_end(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                TokenKind::Semi | TokenKind::Op(")") | TokenKind::Eof => return Ok(()),
                TokenKind::Op("(") | TokenKind::Op("[") | TokenKind::Op("{") => {
                    self.skip_balanced()?
                }
                TokenKind::Op(close @ ("]" | "}")) => {
                    return Err(ParseError::new(self.pos(), format!("unexpected '{}'", close)))
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /* ---- types ---- */

    pub fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        match self.peek().clone() {
            TokenKind::Ident(_) => self.parse_type_name(),
            TokenKind::Op("*") => {
                self.bump();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            TokenKind::Op("[") => {
                self.bump();
                if self.eat_op("]") {
                    return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
                }
                let len = if self.eat_op("...") {
                    ArrayLen::Inferred
                } else {
                    ArrayLen::Expr(self.parse_const_expr()?)
                };
                self.expect_op("]")?;
                let elem = Box::new(self.parse_type()?);
                Ok(TypeExpr::Array { len, elem })
            }
            TokenKind::Op("(") => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect_op(")")?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            TokenKind::Op("<-") => {
                self.bump();
                self.expect_keyword(Keyword::Chan)?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Keyword(Keyword::Chan) => {
                self.bump();
                let dir = if self.eat_op("<-") {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Keyword(Keyword::Map) => {
                self.bump();
                self.expect_op("[")?;
                let key = Box::new(self.parse_type()?);
                self.expect_op("]")?;
                let value = Box::new(self.parse_type()?);
                Ok(TypeExpr::Map { key, value })
            }
            TokenKind::Keyword(Keyword::Func) => {
                self.bump();
                Ok(TypeExpr::Func(self.parse_signature()?))
            }
            TokenKind::Keyword(Keyword::Struct) => self.parse_struct_type(),
            TokenKind::Keyword(Keyword::Interface) => self.parse_interface_type(),
            _ => Err(self.expected("type")),
        }
    }

    /* `Name`, `pkg.Name`, optionally followed by type arguments */
    fn parse_type_name(&mut self) -> ParseResult<TypeExpr> {
        let name = self.expect_ident()?;
        if self.eat_op(".") {
            let qualified = self.expect_ident()?;
            let args = self.parse_type_args()?;
            return Ok(TypeExpr::Qualified {
                package: name,
                name: qualified,
                args,
            });
        }
        let args = self.parse_type_args()?;
        Ok(TypeExpr::Named { name, args })
    }

    fn parse_type_args(&mut self) -> ParseResult<Vec<TypeExpr>> {
        let mut args = Vec::new();
        if !self.eat_op("[") {
            return Ok(args);
        }
        loop {
            args.push(self.parse_type()?);
            if !self.eat_op(",") || self.at_op("]") {
                break;
            }
        }
        self.expect_op("]")?;
        Ok(args)
    }

    fn parse_type_params(&mut self) -> ParseResult<Vec<FieldGroup>> {
        self.expect_op("[")?;
        let mut groups = Vec::new();
        loop {
            let names = self.parse_ident_list()?;
            let constraint = self.parse_constraint()?;
            groups.push(FieldGroup::new(names, constraint));
            if !self.eat_op(",") || self.at_op("]") {
                break;
            }
        }
        self.expect_op("]")?;
        Ok(groups)
    }

    /* A plain type, or an implicit interface for `~T` and unions */
    fn parse_constraint(&mut self) -> ParseResult<TypeExpr> {
        let mut terms = self.parse_union_terms()?;
        if terms.len() == 1 && !terms[0].tilde {
            return Ok(terms.remove(0).ty);
        }
        Ok(TypeExpr::Interface(vec![InterfaceElem::Union(terms)]))
    }

    fn parse_union_terms(&mut self) -> ParseResult<Vec<UnionTerm>> {
        let mut terms = Vec::new();
        loop {
            let tilde = self.eat_op("~");
            let ty = self.parse_type()?;
            terms.push(UnionTerm { tilde, ty });
            if !self.eat_op("|") {
                return Ok(terms);
            }
        }
    }

    fn parse_struct_type(&mut self) -> ParseResult<TypeExpr> {
        self.expect_keyword(Keyword::Struct)?;
        self.expect_op("{")?;
        let mut fields = Vec::new();
        while !self.at_op("}") {
            fields.push(self.parse_field_decl()?);
            self.expect_semi()?;
        }
        self.expect_op("}")?;
        Ok(TypeExpr::Struct(fields))
    }

    fn parse_field_decl(&mut self) -> ParseResult<FieldGroup> {
        let (names, ty) = match self.peek().clone() {
            TokenKind::Op("*") => {
                self.bump();
                (Vec::new(), TypeExpr::Pointer(Box::new(self.parse_embedded_name()?)))
            }
            TokenKind::Op("(") => {
                return Err(ParseError::new(self.pos(), "cannot parenthesize embedded type"))
            }
            TokenKind::Ident(name) => match self.peek_nth(1) {
                TokenKind::Op(".")
                | TokenKind::Semi
                | TokenKind::Op("}")
                | TokenKind::Literal(LitKind::String, _) => {
                    (Vec::new(), self.parse_embedded_name()?)
                }
                TokenKind::Op(",") => {
                    let names = self.parse_ident_list()?;
                    (names, self.parse_type()?)
                }
                /* `A [N]T` declares a field, `List[T]` embeds an instantiated type */
                TokenKind::Op("[") => {
                    let field = self.attempt(|parser| {
                        parser.bump();
                        let ty = parser.parse_type()?;
                        if parser.at_field_end() {
                            Ok(ty)
                        } else {
                            Err(parser.expected("field end"))
                        }
                    });
                    match field {
                        Some(ty) => (vec![name], ty),
                        None => (Vec::new(), self.parse_embedded_name()?),
                    }
                }
                _ => {
                    self.bump();
                    (vec![name], self.parse_type()?)
                }
            },
            _ => return Err(self.expected("field name or embedded type")),
        };

        let tag = match self.peek() {
            TokenKind::Literal(LitKind::String, text) => {
                let text = text.clone();
                self.bump();
                Some(text)
            }
            _ => None,
        };

        Ok(FieldGroup { names, ty, tag })
    }

    fn at_field_end(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Semi | TokenKind::Op("}") | TokenKind::Literal(LitKind::String, _)
        )
    }

    fn parse_embedded_name(&mut self) -> ParseResult<TypeExpr> {
        match self.peek() {
            TokenKind::Ident(_) => self.parse_type_name(),
            _ => Err(self.expected("embedded type name")),
        }
    }

    fn parse_interface_type(&mut self) -> ParseResult<TypeExpr> {
        self.expect_keyword(Keyword::Interface)?;
        self.expect_op("{")?;
        let mut elems = Vec::new();
        while !self.at_op("}") {
            let is_method =
                matches!(self.peek(), TokenKind::Ident(_)) && matches!(self.peek_nth(1), TokenKind::Op("("));
            let elem = if is_method {
                let name = self.expect_ident()?;
                let signature = self.parse_signature()?;
                InterfaceElem::Method { name, signature }
            } else {
                InterfaceElem::Union(self.parse_union_terms()?)
            };
            elems.push(elem);
            self.expect_semi()?;
        }
        self.expect_op("}")?;
        Ok(TypeExpr::Interface(elems))
    }

    /* ---- signatures ---- */

    fn parse_signature(&mut self) -> ParseResult<Signature> {
        let params = self.parse_parameters()?;
        let results = if self.at_op("(") {
            self.parse_parameters()?
        } else if self.at_type_start() {
            vec![FieldGroup::unnamed(self.parse_type()?)]
        } else {
            Vec::new()
        };
        Ok(Signature { params, results })
    }

    fn at_type_start(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Ident(_)
                | TokenKind::Op("*")
                | TokenKind::Op("[")
                | TokenKind::Op("(")
                | TokenKind::Op("<-")
                | TokenKind::Keyword(
                    Keyword::Chan
                        | Keyword::Map
                        | Keyword::Func
                        | Keyword::Struct
                        | Keyword::Interface
                )
        )
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<FieldGroup>> {
        self.expect_op("(")?;
        let mut entries = Vec::new();
        while !self.at_op(")") {
            entries.push(self.parse_param_entry()?);
            if !self.eat_op(",") {
                break;
            }
        }
        self.expect_op(")")?;
        resolve_params(entries)
    }

    fn parse_param_type(&mut self) -> ParseResult<TypeExpr> {
        if self.eat_op("...") {
            return Ok(TypeExpr::Ellipsis(Box::new(self.parse_type()?)));
        }
        self.parse_type()
    }

    fn parse_param_entry(&mut self) -> ParseResult<ParamEntry> {
        let pos = self.pos();
        let TokenKind::Ident(name) = self.peek().clone() else {
            return Ok(ParamEntry::Unnamed(self.parse_param_type()?, pos));
        };

        match self.peek_nth(1) {
            TokenKind::Op(",") | TokenKind::Op(")") => {
                self.bump();
                Ok(ParamEntry::Bare(name, pos))
            }
            TokenKind::Op(".") => Ok(ParamEntry::Unnamed(self.parse_type()?, pos)),
            /* `a []int` names a parameter, `List[int]` is an instantiated type */
            TokenKind::Op("[") => {
                let named = self.attempt(|parser| {
                    parser.bump();
                    let ty = parser.parse_param_type()?;
                    if parser.at_op(",") || parser.at_op(")") {
                        Ok(ty)
                    } else {
                        Err(parser.expected("',' or ')'"))
                    }
                });
                match named {
                    Some(ty) => Ok(ParamEntry::Named(name, ty)),
                    None => Ok(ParamEntry::Unnamed(self.parse_type()?, pos)),
                }
            }
            _ => {
                self.bump();
                if self.at_op("...") || self.at_type_start() {
                    Ok(ParamEntry::Named(name, self.parse_param_type()?))
                } else {
                    Err(self.expected("',' or ')'"))
                }
            }
        }
    }

    /* ---- constant expressions (array lengths) ---- */

    fn parse_const_expr(&mut self) -> ParseResult<ConstExpr> {
        self.parse_binary_expr(1)
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<ConstExpr> {
        let mut lhs = self.parse_unary_expr()?;
        loop {
            let (op, prec) = match self.peek() {
                TokenKind::Op(op) => match binary_precedence(op) {
                    Some(prec) if prec >= min_prec => (*op, prec),
                    _ => return Ok(lhs),
                },
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.parse_binary_expr(prec + 1)?;
            lhs = ConstExpr::Binary {
                op: op.to_string(),
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_unary_expr(&mut self) -> ParseResult<ConstExpr> {
        if let TokenKind::Op(op @ ("+" | "-" | "!" | "^")) = self.peek() {
            let op = op.to_string();
            self.bump();
            let operand = Box::new(self.parse_unary_expr()?);
            return Ok(ConstExpr::Unary { op, operand });
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> ParseResult<ConstExpr> {
        let mut expr = match self.peek().clone() {
            TokenKind::Literal(_, text) => {
                self.bump();
                ConstExpr::Literal(text)
            }
            TokenKind::Ident(name) => {
                self.bump();
                if self.eat_op(".") {
                    ConstExpr::Qualified {
                        package: name,
                        name: self.expect_ident()?,
                    }
                } else {
                    ConstExpr::Ident(name)
                }
            }
            TokenKind::Op("(") => {
                self.bump();
                let inner = self.parse_const_expr()?;
                self.expect_op(")")?;
                ConstExpr::Paren(Box::new(inner))
            }
            _ => return Err(self.expected("constant expression")),
        };

        while self.eat_op("(") {
            let mut args = Vec::new();
            while !self.at_op(")") {
                args.push(self.parse_const_expr()?);
                if !self.eat_op(",") {
                    break;
                }
            }
            self.expect_op(")")?;
            expr = ConstExpr::Call {
                func: Box::new(expr),
                args,
            };
        }
        Ok(expr)
    }
}

/* Group parameter entries following Go's rule that either every parameter is
 * named or none is */
fn resolve_params(entries: Vec<ParamEntry>) -> ParseResult<Vec<FieldGroup>> {
    let any_named = entries
        .iter()
        .any(|entry| matches!(entry, ParamEntry::Named(..)));

    if !any_named {
        return Ok(entries
            .into_iter()
            .map(|entry| match entry {
                ParamEntry::Bare(name, _) => FieldGroup::unnamed(TypeExpr::named(&name)),
                ParamEntry::Unnamed(ty, _) => FieldGroup::unnamed(ty),
                ParamEntry::Named(name, ty) => FieldGroup::new(vec![name], ty),
            })
            .collect());
    }

    let mut groups = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut pending_pos = None;
    for entry in entries {
        match entry {
            ParamEntry::Bare(name, pos) => {
                pending_pos.get_or_insert(pos);
                pending.push(name);
            }
            ParamEntry::Named(name, ty) => {
                pending.push(name);
                groups.push(FieldGroup::new(std::mem::take(&mut pending), ty));
                pending_pos = None;
            }
            ParamEntry::Unnamed(_, pos) => {
                return Err(ParseError::new(pos, "mixed named and unnamed parameters"))
            }
        }
    }
    if let Some(pos) = pending_pos {
        return Err(ParseError::new(pos, "mixed named and unnamed parameters"));
    }
    Ok(groups)
}

fn binary_precedence(op: &str) -> Option<u8> {
    let prec = match op {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "+" | "-" | "|" | "^" => 4,
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        _ => return None,
    };
    Some(prec)
}

/* Import paths are plain; only the surrounding quotes need removing */
fn unquote(text: &str) -> String {
    text.trim_start_matches(['"', '`'])
        .trim_end_matches(['"', '`'])
        .to_string()
}

fn keyword_text(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::Break => "break",
        Keyword::Case => "case",
        Keyword::Chan => "chan",
        Keyword::Const => "const",
        Keyword::Continue => "continue",
        Keyword::Default => "default",
        Keyword::Defer => "defer",
        Keyword::Else => "else",
        Keyword::Fallthrough => "fallthrough",
        Keyword::For => "for",
        Keyword::Func => "func",
        Keyword::Go => "go",
        Keyword::Goto => "goto",
        Keyword::If => "if",
        Keyword::Import => "import",
        Keyword::Interface => "interface",
        Keyword::Map => "map",
        Keyword::Package => "package",
        Keyword::Range => "range",
        Keyword::Return => "return",
        Keyword::Select => "select",
        Keyword::Struct => "struct",
        Keyword::Switch => "switch",
        Keyword::Type => "type",
        Keyword::Var => "var",
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(name) => format!("'{}'", name),
        TokenKind::Keyword(keyword) => format!("'{}'", keyword_text(*keyword)),
        TokenKind::Literal(_, text) => text.clone(),
        TokenKind::Op(op) => format!("'{}'", op),
        TokenKind::Semi => "newline".to_string(),
        TokenKind::Eof => "EOF".to_string(),
    }
}
