//! Dump JSON and TOML documents with the vardump renderer.
//!
//! Each input file is parsed into a document value and all documents are
//! printed, numbered, in one flush to stdout.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::debug;

use vardump::io::config::load_config;
use vardump::{Dump, Dumper, exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "vardump",
    version,
    about = "Print the structure of JSON and TOML documents"
)]
struct Cli {
    /// Files to dump; `-` reads stdin. Defaults to stdin.
    files: Vec<PathBuf>,

    /// TOML file with `indent` and `max_depth`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Indentation unit, overriding the config file.
    #[arg(long)]
    indent: Option<String>,

    /// Containers deeper than this collapse to a placeholder.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Input format; `auto` picks by file extension (stdin is JSON).
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Auto,
    Json,
    Toml,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };
    if let Some(indent) = cli.indent {
        config.indent = indent;
    }
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    let dumper = Dumper::new().with_config(config).context("apply config")?;

    let inputs = if cli.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        cli.files
    };
    let documents = inputs
        .iter()
        .map(|path| load_document(path, cli.format))
        .collect::<Result<Vec<_>>>()?;

    let values: Vec<&dyn Dump> = documents.iter().map(|doc| &**doc).collect();
    dumper.try_dump(&values).context("dump documents")?;
    Ok(())
}

fn load_document(path: &Path, format: Format) -> Result<Box<dyn Dump>> {
    let stdin = path == Path::new("-");
    let raw = if stdin {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("read stdin")?;
        raw
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };

    let format = match format {
        Format::Auto if stdin => Format::Json,
        Format::Auto => detect_format(path)?,
        explicit => explicit,
    };
    debug!(path = %path.display(), ?format, bytes = raw.len(), "parsing document");

    let document: Box<dyn Dump> = match format {
        Format::Json => Box::new(
            serde_json::from_str::<serde_json::Value>(&raw)
                .with_context(|| format!("parse {} as json", path.display()))?,
        ),
        Format::Toml => Box::new(toml::Value::Table(
            toml::from_str::<toml::Table>(&raw)
                .with_context(|| format!("parse {} as toml", path.display()))?,
        )),
        Format::Auto => bail!("format must be resolved before parsing"),
    };
    Ok(document)
}

fn detect_format(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => bail!(
            "cannot infer format of {}; pass --format json|toml",
            path.display()
        ),
    }
}
