/* Go source printer
 *
 * Declarations are separated by a blank line and indented with tabs. Type
 * expressions always print on a single line; inline struct and interface
 * bodies use `;` separators, which gofmt expands if the output is formatted.
 */

use crate::ast::{
    ArrayLen, ChanDir, ConstExpr, Decl, Expr, FieldGroup, FuncBody, FuncDecl, ImportSpec,
    InterfaceElem, Signature, SourceFile, Stmt, TypeExpr, TypeSpec, UnionTerm, ValueSpec,
};
use crate::errors::RenderError;
use std::fmt::{self, Write};

/// Print a whole file: package clause, imports and declarations.
pub fn render(file: &SourceFile) -> Result<String, RenderError> {
    let mut printer = Printer::new();
    printer.package(&file.package)?;
    printer.imports(&file.imports)?;
    printer.decls(&file.decls)?;
    Ok(printer.out)
}

/// Print `decls` as the contents of a file in package `package`.
pub fn render_decls(package: &str, decls: &[Decl]) -> Result<String, RenderError> {
    let mut printer = Printer::new();
    printer.package(package)?;
    printer.decls(decls)?;
    Ok(printer.out)
}

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn package(&mut self, package: &str) -> Result<(), RenderError> {
        if package.is_empty() {
            return Err(RenderError::MissingPackage);
        }
        writeln!(self.out, "package {}", package)?;
        Ok(())
    }

    fn imports(&mut self, imports: &[ImportSpec]) -> Result<(), RenderError> {
        let spec = |import: &ImportSpec| match &import.alias {
            Some(alias) => format!("{} \"{}\"", alias, import.path),
            None => format!("\"{}\"", import.path),
        };
        match imports {
            [] => {}
            [single] => write!(self.out, "\nimport {}\n", spec(single))?,
            many => {
                self.out.push_str("\nimport (\n");
                for import in many {
                    writeln!(self.out, "\t{}", spec(import))?;
                }
                self.out.push_str(")\n");
            }
        }
        Ok(())
    }

    fn decls(&mut self, decls: &[Decl]) -> Result<(), RenderError> {
        for decl in decls {
            self.out.push('\n');
            self.decl(decl)?;
            self.out.push('\n');
        }
        Ok(())
    }

    fn decl(&mut self, decl: &Decl) -> Result<(), RenderError> {
        match decl {
            Decl::Type(specs) => self.spec_group("type", specs, Self::type_spec),
            Decl::Var(specs) => self.spec_group("var", specs, Self::value_spec),
            Decl::Const(specs) => self.spec_group("const", specs, Self::value_spec),
            Decl::Func(func) => self.func_decl(func),
        }
    }

    fn spec_group<T>(
        &mut self,
        keyword: &str,
        specs: &[T],
        mut spec: impl FnMut(&mut Self, &T) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        write!(self.out, "{} ", keyword)?;
        if let [single] = specs {
            return spec(self, single);
        }
        self.out.push('(');
        self.indent += 1;
        for item in specs {
            self.newline();
            spec(self, item)?;
        }
        self.indent -= 1;
        self.newline();
        self.out.push(')');
        Ok(())
    }

    fn type_spec(&mut self, spec: &TypeSpec) -> Result<(), RenderError> {
        check_ident(&spec.name, "type declaration")?;
        write!(self.out, "{}", spec.name)?;
        write_type_params(&mut self.out, &spec.type_params)?;
        if spec.alias {
            self.out.push_str(" =");
        }
        write!(self.out, " {}", spec.ty)?;
        Ok(())
    }

    fn value_spec(&mut self, spec: &ValueSpec) -> Result<(), RenderError> {
        if spec.has_values {
            return Err(RenderError::Unparsed {
                name: spec.names.join(", "),
            });
        }
        self.out.push_str(&spec.names.join(", "));
        if let Some(ty) = &spec.ty {
            write!(self.out, " {}", ty)?;
        }
        Ok(())
    }

    fn func_decl(&mut self, func: &FuncDecl) -> Result<(), RenderError> {
        check_ident(&func.name, "function declaration")?;
        self.out.push_str("func ");
        if let Some(recv) = &func.recv {
            write!(self.out, "({}) ", FieldList(std::slice::from_ref(recv)))?;
        }
        self.out.push_str(&func.name);
        write_type_params(&mut self.out, &func.type_params)?;
        write!(self.out, "{}", func.signature)?;
        match &func.body {
            None => Ok(()),
            Some(FuncBody::Skipped) => Err(RenderError::Unparsed {
                name: func.name.clone(),
            }),
            Some(FuncBody::Block(stmts)) => {
                self.out.push(' ');
                self.block(stmts)
            }
        }
    }

    fn block(&mut self, stmts: &[Stmt]) -> Result<(), RenderError> {
        self.out.push('{');
        self.indent += 1;
        for stmt in stmts {
            self.newline();
            self.stmt(stmt)?;
        }
        self.indent -= 1;
        self.newline();
        self.out.push('}');
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), RenderError> {
        match stmt {
            Stmt::Return(results) => {
                self.out.push_str("return");
                for (i, result) in results.iter().enumerate() {
                    self.out.push_str(if i == 0 { " " } else { ", " });
                    self.expr(result)?;
                }
            }
            Stmt::Assign { lhs, rhs } => {
                self.expr_list(lhs)?;
                self.out.push_str(" = ");
                self.expr_list(rhs)?;
            }
        }
        Ok(())
    }

    fn expr_list(&mut self, exprs: &[Expr]) -> Result<(), RenderError> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(expr)?;
        }
        Ok(())
    }

    fn expr(&mut self, expr: &Expr) -> Result<(), RenderError> {
        match expr {
            Expr::Ident(name) => {
                check_ident(name, "expression")?;
                self.out.push_str(name);
            }
            Expr::Selector { base, field } => {
                check_ident(field, "selector")?;
                self.expr(base)?;
                write!(self.out, ".{}", field)?;
            }
            Expr::FuncLit { signature, body } => {
                write!(self.out, "func{} ", signature)?;
                self.block(body)?;
            }
        }
        Ok(())
    }
}

fn check_ident(name: &str, context: &'static str) -> Result<(), RenderError> {
    if name.is_empty() {
        return Err(RenderError::EmptyIdent { context });
    }
    Ok(())
}

fn write_type_params(out: &mut String, params: &[FieldGroup]) -> fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    out.push('[');
    for (i, group) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write!(out, "{} ", group.names.join(", "))?;
        /* Constraints written as `~int | string` print without the implicit interface */
        match &group.ty {
            TypeExpr::Interface(elems) => match elems.as_slice() {
                [InterfaceElem::Union(terms)] => write!(out, "{}", Union(terms))?,
                _ => write!(out, "{}", group.ty)?,
            },
            ty => write!(out, "{}", ty)?,
        }
    }
    out.push(']');
    Ok(())
}

/* `(a, b int, c string)` style list */
struct FieldList<'a>(&'a [FieldGroup]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if !group.names.is_empty() {
                write!(f, "{} ", group.names.join(", "))?;
            }
            write!(f, "{}", group.ty)?;
        }
        Ok(())
    }
}

struct Union<'a>(&'a [UnionTerm]);

impl fmt::Display for Union<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            if term.tilde {
                f.write_char('~')?;
            }
            write!(f, "{}", term.ty)?;
        }
        Ok(())
    }
}

/* Parameters and results, without the `func` keyword */
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", FieldList(&self.params))?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => write!(f, " {}", single.ty),
            results => write!(f, " ({})", FieldList(results)),
        }
    }
}

fn write_type_args(f: &mut fmt::Formatter<'_>, args: &[TypeExpr]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_char('[')?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", arg)?;
    }
    f.write_char(']')
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { name, args } => {
                f.write_str(name)?;
                write_type_args(f, args)
            }
            TypeExpr::Qualified {
                package,
                name,
                args,
            } => {
                write!(f, "{}.{}", package, name)?;
                write_type_args(f, args)
            }
            TypeExpr::Pointer(elem) => write!(f, "*{}", elem),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Array { len, elem } => match len {
                ArrayLen::Inferred => write!(f, "[...]{}", elem),
                ArrayLen::Expr(expr) => write!(f, "[{}]{}", expr, elem),
            },
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            TypeExpr::Func(signature) => write!(f, "func{}", signature),
            TypeExpr::Struct(fields) => {
                if fields.is_empty() {
                    return f.write_str("struct{}");
                }
                f.write_str("struct{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    if !field.names.is_empty() {
                        write!(f, "{} ", field.names.join(", "))?;
                    }
                    write!(f, "{}", field.ty)?;
                    if let Some(tag) = &field.tag {
                        write!(f, " {}", tag)?;
                    }
                }
                f.write_str(" }")
            }
            TypeExpr::Interface(elems) => {
                if elems.is_empty() {
                    return f.write_str("interface{}");
                }
                f.write_str("interface{ ")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match elem {
                        InterfaceElem::Method { name, signature } => {
                            write!(f, "{}{}", name, signature)?
                        }
                        InterfaceElem::Union(terms) => write!(f, "{}", Union(terms))?,
                    }
                }
                f.write_str(" }")
            }
            TypeExpr::Ellipsis(elem) => write!(f, "...{}", elem),
            TypeExpr::Paren(inner) => write!(f, "({})", inner),
        }
    }
}

impl fmt::Display for ConstExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstExpr::Literal(text) | ConstExpr::Ident(text) => f.write_str(text),
            ConstExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            ConstExpr::Unary { op, operand } => write!(f, "{}{}", op, operand),
            ConstExpr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            ConstExpr::Call { func, args } => {
                write!(f, "{}(", func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_char(')')
            }
            ConstExpr::Paren(inner) => write!(f, "({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use assert_matches::assert_matches;

    fn field_type(source: &str) -> String {
        let file = parse(&format!("package p\ntype A struct {{\n\tX {}\n}}\n", source)).expect("parse");
        let spec = file.type_specs().next().expect("type spec");
        spec.struct_fields().expect("struct")[0].ty.to_string()
    }

    #[test]
    fn type_expressions_print_canonically() {
        let cases = [
            "string",
            "*A",
            "[]*pkg.T",
            "[4]byte",
            "[2 * N]byte",
            "map[string][]int",
            "<-chan int",
            "chan<- error",
            "func(int, string) error",
            "func(a, b int) (n int, err error)",
            "func(opts ...Option)",
            "interface{}",
            "struct{}",
            "List[int, pkg.Thing]",
        ];
        for case in cases {
            assert_eq!(field_type(case), case);
        }
    }

    #[test]
    fn inline_bodies_print_on_one_line() {
        assert_eq!(
            field_type("struct {\n\t\tA, B int `tag:\"x\"`\n\t\tC string\n\t}"),
            "struct{ A, B int `tag:\"x\"`; C string }"
        );
        assert_eq!(
            field_type("interface {\n\t\tio.Reader\n\t\tClose() error\n\t}"),
            "interface{ io.Reader; Close() error }"
        );
    }

    #[test]
    fn renders_generated_function() {
        let func = FuncDecl {
            recv: None,
            name: "SetB".to_string(),
            type_params: Vec::new(),
            signature: Signature {
                params: vec![FieldGroup::new(vec!["bGen".to_string()], TypeExpr::named("string"))],
                results: vec![FieldGroup::unnamed(TypeExpr::named("AFieldSetter"))],
            },
            body: Some(FuncBody::Block(vec![Stmt::Return(vec![Expr::FuncLit {
                signature: Signature {
                    params: vec![FieldGroup::new(
                        vec!["aGen".to_string()],
                        TypeExpr::pointer(TypeExpr::named("A")),
                    )],
                    results: Vec::new(),
                },
                body: vec![Stmt::Assign {
                    lhs: vec![Expr::Selector {
                        base: Box::new(Expr::ident("aGen")),
                        field: "B".to_string(),
                    }],
                    rhs: vec![Expr::ident("bGen")],
                }],
            }])])),
        };
        let rendered = render_decls("a", &[Decl::Func(func)]).expect("render");
        assert_eq!(
            rendered,
            "package a\n\nfunc SetB(bGen string) AFieldSetter {\n\treturn func(aGen *A) {\n\t\taGen.B = bGen\n\t}\n}\n"
        );
    }

    #[test]
    fn renders_type_declarations_and_imports() {
        let source = "package p\n\nimport (\n\t\"fmt\"\n\tx \"os\"\n)\n\ntype Pair[K comparable, V ~int | string] struct{ Key K }\n\ntype (\n\tA = int\n\tB func(*A)\n)\n";
        let file = parse(source).expect("parse");
        assert_eq!(render(&file).expect("render"), source);
    }

    #[test]
    fn skipped_bodies_cannot_be_rendered() {
        let file = parse("package p\nfunc f() {}\n").expect("parse");
        assert_matches!(render(&file), Err(RenderError::Unparsed { name }) if name == "f");

        let file = parse("package p\nvar v = 3\n").expect("parse");
        assert_matches!(render(&file), Err(RenderError::Unparsed { .. }));
    }

    #[test]
    fn empty_names_are_rejected() {
        assert_matches!(render_decls("", &[]), Err(RenderError::MissingPackage));

        let spec = TypeSpec {
            name: String::new(),
            type_params: Vec::new(),
            alias: false,
            ty: TypeExpr::named("int"),
        };
        assert_matches!(
            render_decls("p", &[Decl::Type(vec![spec])]),
            Err(RenderError::EmptyIdent { .. })
        );
    }
}
