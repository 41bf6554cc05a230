//! Hyper-Schema CLI
//!
//! Command-line interface for adding links and absolute references to
//! JSON Hyper-Schema documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use hyper_schema::{
    absolutize, annotate, json_type_name, load_document, load_document_auto, make_absolute,
    synthesize, AnnotateOptions, RequestContext, ResponseHeaders, RewriteScope,
    DEFAULT_API_ROOT, DEFAULT_SCHEMA_URI,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hyper-schema")]
#[command(about = "Add hypermedia links and absolute references to JSON Hyper-Schema documents")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add $schema, default links, and absolute references to a document
    Annotate {
        /// Document source: file path or URL (http:// or https://)
        document: String,

        #[command(flatten)]
        base: BaseArgs,

        /// Collection name (default: the document's collectionName, then --request-url)
        #[arg(long)]
        collection: Option<String>,

        /// API root used to find the collection in --request-url
        #[arg(long, default_value = DEFAULT_API_ROOT)]
        api_root: String,

        /// $schema for documents that don't declare one
        #[arg(long, default_value = DEFAULT_SCHEMA_URI)]
        default_schema: String,

        /// Print Content-Type and Link headers before the body
        #[arg(long)]
        headers: bool,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Print the synthesized links array for a collection
    Links {
        /// Base URL (scheme, authority, and API root)
        #[arg(long)]
        base_url: String,

        /// Collection name (e.g. people)
        #[arg(long)]
        collection: String,

        /// Custom links: a JSON array, or a document with a links array
        #[arg(long)]
        existing: Option<PathBuf>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Make relative href/$ref values absolute
    Absolutize {
        /// Document source: file path or URL (http:// or https://)
        document: String,

        /// Base URL (scheme, authority, and API root)
        #[arg(long)]
        base_url: String,

        /// Which rules to apply to the whole document
        #[arg(long, value_enum, default_value_t = Scope::Body)]
        scope: Scope,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Print the headers that point a resource at its schema
    Headers {
        /// Base URL (scheme, authority, and API root)
        #[arg(long)]
        base_url: String,

        /// Schema id
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct BaseArgs {
    /// Base URL (scheme, authority, and API root), e.g. http://example.org/api
    #[arg(long)]
    base_url: Option<String>,

    /// Absolute URL of the request; base URL and collection are derived from it
    #[arg(long)]
    request_url: Option<String>,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scope {
    /// links with href and $ref, properties with $ref
    Body,
    /// href and $ref anywhere
    Links,
    /// $ref anywhere
    Properties,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Annotate {
            document,
            base,
            collection,
            api_root,
            default_schema,
            headers,
            out,
        } => {
            let mut options = AnnotateOptions::new()
                .api_root(api_root)
                .default_schema(default_schema);
            if let Some(name) = collection {
                options = options.collection(name);
            }
            run_annotate(&document, base, &options, headers, &out)
        }

        Commands::Links {
            base_url,
            collection,
            existing,
            out,
        } => run_links(&base_url, &collection, existing, &out),

        Commands::Absolutize {
            document,
            base_url,
            scope,
            out,
        } => run_absolutize(&document, &base_url, scope, &out),

        Commands::Headers { base_url, id } => {
            print_headers(&ResponseHeaders::new(&base_url, &id));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_annotate(
    source: &str,
    base: BaseArgs,
    options: &AnnotateOptions,
    headers: bool,
    out: &OutputArgs,
) -> Result<(), u8> {
    let document = load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let ctx = match (base.request_url, base.base_url) {
        (Some(request_url), _) => RequestContext::from_request_url(&request_url, options),
        (None, Some(base_url)) => RequestContext::from_base_url(&base_url),
        (None, None) => {
            eprintln!("Error: one of --base-url or --request-url is required");
            return Err(2);
        }
    }
    .map_err(|e| {
        eprintln!("Error: {}", e);
        2u8
    })?;

    let annotated = annotate(&document, &ctx, options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if headers {
        if let Some(headers) = &annotated.headers {
            print_headers(headers);
            println!();
        }
    }
    write_json(&annotated.document, out)
}

fn run_links(
    base_url: &str,
    collection: &str,
    existing: Option<PathBuf>,
    out: &OutputArgs,
) -> Result<(), u8> {
    let base_url = RequestContext::from_base_url(base_url)
        .map_err(|e| {
            eprintln!("Error: {}", e);
            2u8
        })?
        .base_url();

    let existing = match existing {
        Some(path) => load_document(&path).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?,
        None => Value::Null,
    };

    // Accept a bare links array or a document carrying one
    let custom = match &existing {
        Value::Array(links) => Some(links.as_slice()),
        Value::Object(map) => match map.get("links") {
            Some(Value::Array(links)) => Some(links.as_slice()),
            Some(_) => {
                eprintln!("Error: links must be an array");
                return Err(2);
            }
            None => None,
        },
        Value::Null => None,
        other => {
            eprintln!(
                "Error: expected a links array or a document, got {}",
                json_type_name(other)
            );
            return Err(2);
        }
    };

    let mut links = Value::Array(synthesize(collection, custom, &base_url));
    absolutize(&base_url, &mut links, RewriteScope::Links);
    write_json(&links, out)
}

fn run_absolutize(
    source: &str,
    base_url: &str,
    scope: Scope,
    out: &OutputArgs,
) -> Result<(), u8> {
    let mut document = load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let rewritten = match scope {
        Scope::Body => make_absolute(base_url, &mut document).map_err(|e| {
            eprintln!("Error: {}", e);
            2u8
        })?,
        Scope::Links => absolutize(base_url, &mut document, RewriteScope::Links),
        Scope::Properties => absolutize(base_url, &mut document, RewriteScope::Properties),
    };
    tracing::info!(rewritten, "absolutized document");

    write_json(&document, out)
}

fn print_headers(headers: &ResponseHeaders) {
    for (name, value) in headers.iter() {
        println!("{}: {}", name, value);
    }
}

fn write_json(value: &Value, out: &OutputArgs) -> Result<(), u8> {
    let json_output = if out.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match &out.output {
        Some(path) => {
            std::fs::write(path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}
