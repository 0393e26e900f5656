//! `jsonmap` CLI — read fields out of a JSON document through the typed
//! accessors from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Read a field as an integer, falling back to 7 (stdin → stdout)
//! echo '{"count":"42"}' | jsonmap get --key count --as int --default 7
//!
//! # Read a nested document from a file
//! jsonmap get -i event.json --key context --as doc
//!
//! # Project every field to text
//! jsonmap text -i event.json
//!
//! # List top-level keys in document order
//! jsonmap keys -i event.json
//! ```
//!
//! Set `RUST_LOG=jsonmap_core=trace` to see coercion events on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsonmap_core::Document;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsonmap",
    version,
    about = "Inspect JSON documents through best-effort typed accessors"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one field, coerced to the requested type
    Get {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Key of the field to read
        #[arg(short, long)]
        key: String,
        /// Type to coerce the field to
        #[arg(long = "as", value_enum, default_value_t = Kind::String)]
        kind: Kind,
        /// Value returned when the field is missing or cannot be coerced
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Print every field as text, as a JSON object of strings
    Text {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the top-level keys, one per line, in document order
    Keys {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Int,
    Long,
    Double,
    Char,
    String,
    Bool,
    Doc,
}

fn main() -> Result<()> {
    // RUST_LOG wins when set; otherwise only library warnings are shown.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jsonmap_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Get {
            input,
            key,
            kind,
            default,
        } => {
            let doc = load_document(input.as_deref())?;
            let out = read_field(&doc, &key, kind, default.as_deref())?;
            println!("{}", out);
        }
        Commands::Text { input } => {
            let doc = load_document(input.as_deref())?;
            let object: serde_json::Map<String, serde_json::Value> = doc
                .to_text_map()
                .into_iter()
                .map(|(key, text)| (key, serde_json::Value::String(text)))
                .collect();
            let pretty = serde_json::to_string_pretty(&serde_json::Value::Object(object))?;
            println!("{}", pretty);
        }
        Commands::Keys { input } => {
            let doc = load_document(input.as_deref())?;
            for key in doc.keys().iter() {
                println!("{}", key);
            }
        }
    }

    Ok(())
}

/// Run the accessor for `kind` and render its result.
///
/// Numeric, char and bool reads need a default: `--default` if given,
/// otherwise the type's zero value. String and document reads have no
/// default parameter; a missing field falls back to `--default` or fails.
fn read_field(doc: &Document, key: &str, kind: Kind, default: Option<&str>) -> Result<String> {
    let out = match kind {
        Kind::Int => doc.get_int(key, parse_default(default, 0)?).to_string(),
        Kind::Long => doc.get_long(key, parse_default(default, 0)?).to_string(),
        Kind::Double => doc.get_double(key, parse_default(default, 0.0)?).to_string(),
        Kind::Char => doc.get_char(key, parse_default(default, ' ')?).to_string(),
        Kind::Bool => doc.get_boolean(key, parse_default(default, false)?).to_string(),
        Kind::String => match (doc.get_string(key), default) {
            (Some(text), _) => text,
            (None, Some(fallback)) => fallback.to_string(),
            (None, None) => anyhow::bail!("Key not found: '{}'", key),
        },
        Kind::Doc => match (doc.get_document(key), default) {
            (Some(nested), _) => serde_json::to_string_pretty(&nested)?,
            (None, Some(fallback)) => fallback.to_string(),
            (None, None) => anyhow::bail!("No nested document under key: '{}'", key),
        },
    };
    Ok(out)
}

fn parse_default<T>(raw: Option<&str>, zero: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(text) => text
            .parse()
            .with_context(|| format!("Invalid --default value: '{}'", text)),
        None => Ok(zero),
    }
}

fn load_document(path: Option<&str>) -> Result<Document> {
    let json = read_input(path)?;
    Document::from_json_str(&json).context("Failed to load JSON document")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
