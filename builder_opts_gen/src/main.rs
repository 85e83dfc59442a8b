use builder_opts_gen::config::{parse_field_list, RunConfig};
use clap::{ArgAction, Parser};
use cmds::common::FieldReport;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cmds;

#[derive(Parser)]
#[command(name = "generate-builder-opts")]
#[command(about = "Generate functional-option field setters for a Go struct type", long_about = None)]
struct Cli {
    /* Go file containing the struct type definition */
    #[arg(long = "definition-file", value_name = "FILE", required_unless_present = "manifest")]
    definition_file: Option<PathBuf>,

    /* File to write the generated code to (stdout when omitted) */
    #[arg(long = "out-file", value_name = "FILE")]
    out_file: Option<PathBuf>,

    /* Name of the struct type to generate setters for */
    #[arg(long = "struct-type-name", value_name = "NAME", required_unless_present = "manifest")]
    struct_type_name: Option<String>,

    /* Export the generated setter function type; a bare flag means true */
    #[arg(
        long = "export-option-func-type",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value_t = true
    )]
    export_option_func_type: bool,

    /* Also generate setters for unexported fields */
    #[arg(
        long = "generate-for-unexported-fields",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value_t = false
    )]
    generate_for_unexported_fields: bool,

    /* Skip embedded and imported-type fields instead of failing */
    #[arg(
        long = "ignore-unsupported",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value_t = true
    )]
    ignore_unsupported: bool,

    /* Comma-separated field names to skip (exact match) */
    #[arg(long = "skip-struct-fields", value_name = "FIELDS")]
    skip_struct_fields: Vec<String>,

    /* Run every job listed in a YAML manifest */
    #[arg(
        long = "manifest",
        value_name = "FILE",
        conflicts_with_all = [
            "definition_file",
            "out_file",
            "struct_type_name",
            "export_option_func_type",
            "generate_for_unexported_fields",
            "ignore_unsupported",
            "skip_struct_fields",
        ]
    )]
    manifest: Option<PathBuf>,

    /* Print the verdict for every struct field to stderr */
    #[arg(long = "print-fields")]
    print_fields: bool,

    /* Print the field report as JSON */
    #[arg(long = "json", requires = "print_fields")]
    json: bool,

    /* Enable verbose output */
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    fn field_report(&self) -> FieldReport {
        match (self.print_fields, self.json) {
            (false, _) => FieldReport::Off,
            (true, false) => FieldReport::Text,
            (true, true) => FieldReport::Json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let report = cli.field_report();

    if let Some(manifest) = cli.manifest {
        return cmds::generate::run_manifest(manifest, report, cli.verbose);
    }

    /* Both are required by clap unless a manifest is given */
    let (Some(definition_file), Some(struct_type_name)) = (cli.definition_file, cli.struct_type_name) else {
        anyhow::bail!("--definition-file and --struct-type-name are required");
    };

    let skipped = cli
        .skip_struct_fields
        .iter()
        .flat_map(|list| parse_field_list(list));
    let config = RunConfig::new(struct_type_name)
        .with_export_fn_type(cli.export_option_func_type)
        .with_unexported_fields(cli.generate_for_unexported_fields)
        .with_ignore_unsupported(cli.ignore_unsupported)
        .with_skipped_fields(skipped);

    cmds::generate::run(definition_file, cli.out_file, config, report, cli.verbose)
}
