//! Marginalia CLI - Extract typed annotations from doc comments

mod comments;
mod schema;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use marginalia_parser::{AnnotationParser, Annotations, ParseError, ParserConfig, DEFAULT_MAX_DEPTH};

use crate::comments::doc_comments;

#[derive(Parser)]
#[command(name = "marginalia")]
#[command(about = "Schema-driven doc-comment annotation parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every `/** ... */` block in a source file and output JSON
    Extract {
        /// Source file
        file: PathBuf,
        /// JSON schema file
        #[arg(short, long)]
        schema: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
        /// Deepest allowed nesting of markers and arrays
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Parse a file holding a single comment body and output JSON
    Parse {
        /// Comment body file
        file: PathBuf,
        /// JSON schema file
        #[arg(short, long)]
        schema: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
        /// Deepest allowed nesting of markers and arrays
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Show the markers a schema file registers
    Schema {
        /// JSON schema file
        file: PathBuf,
    },
}

/// Annotations found in one doc comment of a source file
#[derive(Serialize)]
struct Extracted {
    line: usize,
    offset: usize,
    annotations: Annotations,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            schema,
            pretty,
            max_depth,
        } => cmd_extract(&file, &schema, pretty, max_depth),
        Commands::Parse {
            file,
            schema,
            pretty,
            max_depth,
        } => cmd_parse(&file, &schema, pretty, max_depth),
        Commands::Schema { file } => cmd_schema(&file),
    }
}

/// Log to stderr, only when `RUST_LOG` is set
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn cmd_extract(file: &Path, schema: &Path, pretty: bool, max_depth: usize) {
    let parser = load_parser(schema, max_depth);
    let source = read_file(file);

    let mut extracted = Vec::new();
    let mut failed = false;

    for comment in doc_comments(&source) {
        match parser.parse(comment.text) {
            Ok(annotations) if annotations.is_empty() => {}
            Ok(annotations) => extracted.push(Extracted {
                line: comment.line,
                offset: comment.range.start,
                annotations,
            }),
            Err(e) => {
                report_parse_error(&source, file, comment.range.start, &e);
                failed = true;
            }
        }
    }
    debug!(file = %file.display(), comments = extracted.len(), "extracted");

    print_json(&extracted, pretty);
    if failed {
        process::exit(1);
    }
}

fn cmd_parse(file: &Path, schema: &Path, pretty: bool, max_depth: usize) {
    let parser = load_parser(schema, max_depth);
    let body = read_file(file);

    match parser.parse(&body) {
        Ok(annotations) => print_json(&annotations, pretty),
        Err(e) => {
            report_parse_error(&body, file, 0, &e);
            process::exit(1);
        }
    }
}

fn cmd_schema(file: &Path) {
    let parser = load_parser(file, DEFAULT_MAX_DEPTH);

    for name in parser.registry().names() {
        let Some(node_type) = parser.registry().lookup(name) else {
            continue;
        };
        let attributes: Vec<String> = node_type
            .schema()
            .iter()
            .map(|(attribute, descriptor)| format!("{attribute}: {descriptor}"))
            .collect();
        println!("@{}({})", name, attributes.join(", "));
    }
}

fn load_parser(schema_file: &Path, max_depth: usize) -> AnnotationParser {
    let config = ParserConfig::default().with_max_depth(max_depth);
    match schema::load(schema_file, config) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("Error loading schema: {}", e);
            process::exit(1);
        }
    }
}

fn read_file(file: &Path) -> String {
    match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            process::exit(1);
        }
    }
}

fn print_json(value: &impl Serialize, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

/// Render a parse error against the file it came from
///
/// `base` is the byte offset of the comment body within `source`.
fn report_parse_error(source: &str, file: &Path, base: usize, error: &ParseError) {
    let Some(span) = error.span() else {
        eprintln!("{}: {}", file.display(), error);
        return;
    };
    let span = span.offset(base);
    let name = file.to_string_lossy().to_string();

    let printed = Report::build(ReportKind::Error, name.clone(), span.start)
        .with_code(error.code())
        .with_message(error.to_string())
        .with_label(
            Label::new((name.clone(), span.start..span.end))
                .with_message(label_message(error))
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)));

    if printed.is_err() {
        eprintln!("{}: {}", file.display(), error);
    }
}

fn label_message(error: &ParseError) -> String {
    match error {
        ParseError::Syntax { expected, .. } => format!("expected {expected}"),
        ParseError::UnknownAttribute { node, .. } => format!("not an attribute of @{node}"),
        ParseError::Attribute { fault, .. } => fault.to_string(),
        ParseError::InvalidLiteral { .. } => "out of range".to_string(),
        ParseError::NestingTooDeep { limit, .. } => format!("nesting limit is {limit}"),
        ParseError::EmptyRegistry => error.to_string(),
    }
}
