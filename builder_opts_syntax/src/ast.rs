//! Declaration-level Go syntax tree.
//!
//! The tree is a closed set of node variants. Parsed files populate the
//! declaration and type nodes; the statement and expression nodes only exist
//! so generated functions can be described and printed.

use serde_derive::Serialize;

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct SourceFile {
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /* Iterate every type spec in file order, flattening grouped declarations */
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.decls.iter().flat_map(|decl| match decl {
            Decl::Type(specs) => specs.as_slice(),
            _ => &[],
        })
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ImportSpec {
    /// `.`, `_` or a package name when the import is renamed.
    pub alias: Option<String>,
    pub path: String,
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum Decl {
    Type(Vec<TypeSpec>),
    Func(FuncDecl),
    Var(Vec<ValueSpec>),
    Const(Vec<ValueSpec>),
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<FieldGroup>,
    /// `type A = B` rather than `type A B`.
    pub alias: bool,
    pub ty: TypeExpr,
}

impl TypeSpec {
    /// Field groups of the underlying struct, if the spec is struct-shaped.
    pub fn struct_fields(&self) -> Option<&[FieldGroup]> {
        match &self.ty {
            TypeExpr::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// The spec's own name instantiated with its type parameters (`A[T, U]`).
    pub fn instantiated(&self) -> TypeExpr {
        let args = self
            .type_params
            .iter()
            .flat_map(|group| group.names.iter())
            .map(|name| TypeExpr::named(name))
            .collect();
        TypeExpr::Named {
            name: self.name.clone(),
            args,
        }
    }
}

/* `var` and `const` specs; initialisers are not kept */
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
    pub has_values: bool,
}

/// One entry of a field list: struct fields, parameters, results and type
/// parameters all share this shape. An empty `names` list is an embedded
/// field (or an unnamed parameter).
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FieldGroup {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

impl FieldGroup {
    pub fn new(names: Vec<String>, ty: TypeExpr) -> Self {
        Self {
            names,
            ty,
            tag: None,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self::new(Vec::new(), ty)
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Signature {
    pub params: Vec<FieldGroup>,
    pub results: Vec<FieldGroup>,
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceElem {
    Method { name: String, signature: Signature },
    /* An embedded interface is a union with a single term */
    Union(Vec<UnionTerm>),
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct UnionTerm {
    /// `~T`: every type whose underlying type is `T`.
    pub tilde: bool,
    pub ty: TypeExpr,
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum ArrayLen {
    /// `[...]T`
    Inferred,
    Expr(ConstExpr),
}

/// Constant expressions, as they appear in array lengths.
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum ConstExpr {
    Literal(String),
    Ident(String),
    Qualified { package: String, name: String },
    Unary { op: String, operand: Box<ConstExpr> },
    Binary { op: String, lhs: Box<ConstExpr>, rhs: Box<ConstExpr> },
    Call { func: Box<ConstExpr>, args: Vec<ConstExpr> },
    Paren(Box<ConstExpr>),
}

impl ConstExpr {
    pub fn references_imported_package(&self) -> bool {
        match self {
            ConstExpr::Literal(_) | ConstExpr::Ident(_) => false,
            ConstExpr::Qualified { .. } => true,
            ConstExpr::Unary { operand, .. } => operand.references_imported_package(),
            ConstExpr::Binary { lhs, rhs, .. } => {
                lhs.references_imported_package() || rhs.references_imported_package()
            }
            ConstExpr::Call { func, args } => {
                func.references_imported_package()
                    || args.iter().any(ConstExpr::references_imported_package)
            }
            ConstExpr::Paren(inner) => inner.references_imported_package(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum TypeExpr {
    Named {
        name: String,
        args: Vec<TypeExpr>,
    },
    Qualified {
        package: String,
        name: String,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array {
        len: ArrayLen,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(Signature),
    Struct(Vec<FieldGroup>),
    Interface(Vec<InterfaceElem>),
    /// `...T`, only valid as the type of a final parameter.
    Ellipsis(Box<TypeExpr>),
    Paren(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: &str) -> Self {
        TypeExpr::Named {
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    pub fn pointer(to: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(to))
    }

    /// True if a `package.Name` reference appears anywhere in the expression.
    ///
    /// This is a purely syntactic check: any qualified name counts, whether or
    /// not it actually resolves to an imported package.
    pub fn references_imported_package(&self) -> bool {
        match self {
            TypeExpr::Named { args, .. } => args.iter().any(TypeExpr::references_imported_package),
            TypeExpr::Qualified { .. } => true,
            TypeExpr::Pointer(elem)
            | TypeExpr::Slice(elem)
            | TypeExpr::Ellipsis(elem)
            | TypeExpr::Paren(elem)
            | TypeExpr::Chan { elem, .. } => elem.references_imported_package(),
            TypeExpr::Array { len, elem } => {
                let len_refs = match len {
                    ArrayLen::Inferred => false,
                    ArrayLen::Expr(expr) => expr.references_imported_package(),
                };
                len_refs || elem.references_imported_package()
            }
            TypeExpr::Map { key, value } => {
                key.references_imported_package() || value.references_imported_package()
            }
            TypeExpr::Func(signature) => signature.references_imported_package(),
            TypeExpr::Struct(fields) => fields
                .iter()
                .any(|field| field.ty.references_imported_package()),
            TypeExpr::Interface(elems) => elems.iter().any(|elem| match elem {
                InterfaceElem::Method { signature, .. } => signature.references_imported_package(),
                InterfaceElem::Union(terms) => {
                    terms.iter().any(|term| term.ty.references_imported_package())
                }
            }),
        }
    }
}

impl Signature {
    pub fn references_imported_package(&self) -> bool {
        self.params
            .iter()
            .chain(self.results.iter())
            .any(|group| group.ty.references_imported_package())
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum FuncBody {
    /* Parsed bodies are skipped, not analysed */
    Skipped,
    Block(Vec<Stmt>),
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FuncDecl {
    pub recv: Option<FieldGroup>,
    pub name: String,
    pub type_params: Vec<FieldGroup>,
    pub signature: Signature,
    /// `None` for declarations without a body (assembly-backed functions).
    pub body: Option<FuncBody>,
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum Stmt {
    Return(Vec<Expr>),
    Assign { lhs: Vec<Expr>, rhs: Vec<Expr> },
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum Expr {
    Ident(String),
    Selector { base: Box<Expr>, field: String },
    FuncLit { signature: Signature, body: Vec<Stmt> },
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.to_string())
    }
}

/// A name is unexported only when it begins with a lower-case letter, so
/// `_x` and `Name` both count as exported here.
pub fn is_exported(name: &str) -> bool {
    !name.chars().next().is_some_and(char::is_lowercase)
}
