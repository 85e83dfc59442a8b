use assert_matches::assert_matches;
use builder_opts_syntax::{parse, render, Decl, FuncBody, TypeExpr};

const SERVER_OPTIONS: &str = r#"// Package server configures an HTTP server.
package server

import (
	"crypto/tls"
	"net/http"
	"time"
)

const (
	defaultPort    = 8080
	maxHeaderBytes = 1 << 20
)

var ErrClosed = errors.New("server closed")

/* Options holds every tunable of the server. */
type Options struct {
	Addr         string `json:"addr"`
	ReadTimeout  time.Duration
	Handler      http.Handler
	TLS          *tls.Config
	middlewares  []func(http.Handler) http.Handler
	headers      map[string][]string
	buf          [maxHeaderBytes]byte
	shutdown     chan struct{}
	hooks        struct {
		onStart func() error
		onStop  func(ctx interface{ Done() <-chan struct{} })
	}
}

type Option func(*Options)

func (o *Options) apply(opts ...Option) {
	for _, opt := range opts {
		opt(o)
	}
}

func New(opts ...Option) (*Options, error) {
	o := &Options{Addr: ":8080"}
	o.apply(opts...)
	if o.Handler == nil {
		return nil, fmt.Errorf("no handler: %w", ErrClosed)
	}
	return o, nil
}
"#;

#[test]
fn test_parses_realistic_file() {
    let file = parse(SERVER_OPTIONS).expect("parse");
    assert_eq!(file.package, "server");
    assert_eq!(file.imports.len(), 3);
    assert_eq!(file.decls.len(), 6);

    let options = file
        .type_specs()
        .find(|spec| spec.name == "Options")
        .expect("Options type");
    let fields = options.struct_fields().expect("struct fields");
    assert_eq!(fields.len(), 9);

    let imported: Vec<&str> = fields
        .iter()
        .filter(|field| field.ty.references_imported_package())
        .flat_map(|field| field.names.iter().map(String::as_str))
        .collect();
    assert_eq!(imported, vec!["ReadTimeout", "Handler", "TLS", "middlewares"]);

    assert_eq!(fields[0].tag.as_deref(), Some("`json:\"addr\"`"));
    assert_eq!(fields[6].ty.to_string(), "[maxHeaderBytes]byte");
    assert_eq!(
        fields[8].ty.to_string(),
        "struct{ onStart func() error; onStop func(ctx interface{ Done() <-chan struct{} }) }"
    );
}

#[test]
fn test_function_bodies_are_skipped() {
    let file = parse(SERVER_OPTIONS).expect("parse");
    let funcs: Vec<_> = file
        .decls
        .iter()
        .filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            _ => None,
        })
        .collect();

    assert_eq!(funcs.len(), 2);
    assert_eq!(funcs[0].name, "apply");
    assert!(funcs[0].recv.is_some());
    assert_eq!(funcs[1].signature.to_string(), "(opts ...Option) (*Options, error)");
    assert!(funcs.iter().all(|func| func.body == Some(FuncBody::Skipped)));
}

#[test]
fn test_type_only_files_round_trip() {
    let source = "package opts\n\nimport \"time\"\n\ntype Retry struct{ Attempts int; Backoff time.Duration }\n\ntype Policy interface{ Retry() Retry; ~int | ~int64 }\n\ntype Set[K comparable] map[K]struct{}\n";
    let file = parse(source).expect("parse");
    assert_eq!(render(&file).expect("render"), source);
}

#[test]
fn test_syntax_errors_report_position() {
    let err = parse("package p\n\ntype A struct {\n\tB map[string\n}\n").unwrap_err();
    assert_eq!(err.pos.line, 4);
    assert!(err.to_string().starts_with("4:"), "unexpected message: {}", err);

    assert_matches!(parse("type A struct{}\n"), Err(_));
    assert_matches!(parse("package p\ntype A struct { B `unterminated\n}\n"), Err(_));
}

#[test]
fn test_embedded_generic_and_array_fields() {
    let file = parse("package p\n\ntype A struct {\n\tList[int]\n\tN [4]int\n\t*Base\n}\n").expect("parse");
    let fields = file.type_specs().next().and_then(|spec| spec.struct_fields()).expect("fields");

    assert!(fields[0].is_embedded());
    assert_eq!(fields[0].ty.to_string(), "List[int]");
    assert_eq!(fields[1].names, vec!["N"]);
    assert_matches!(&fields[2].ty, TypeExpr::Pointer(_));
    assert!(fields[2].is_embedded());
}
