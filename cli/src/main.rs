mod tracing_config;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use ide::{
    AlloyProject, Candidate, CompletionConfig, CompletionEngine, CompletionRequest, Position,
    TextDocument,
};
use schema::{JsonFile, SchemaStore};

#[derive(Parser, Debug)]
#[command(
    name = "tss-complete",
    about = "Completion candidates for Alloy style documents",
    version
)]
struct Cli {
    /// Style document to complete in.
    document: PathBuf,

    /// Schema JSON with tags, properties and types.
    #[arg(long, value_name = "FILE")]
    schema: PathBuf,

    /// Completion settings as JSON (`objectTypes`, `indent`).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Zero-based cursor line.
    #[arg(long, requires = "column", conflicts_with = "offset")]
    line: Option<u32>,

    /// Zero-based UTF-8 byte column within the line.
    #[arg(long, requires = "line")]
    column: Option<u32>,

    /// Byte offset of the cursor in the document.
    #[arg(long, required_unless_present = "line")]
    offset: Option<usize>,

    /// Directory holding `app/`. Enables i18n key and image path completion.
    #[arg(long, value_name = "PATH")]
    project_root: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Plain,
}

impl Cli {
    fn position(&self, document: &TextDocument) -> Result<Position> {
        match (self.offset, self.line, self.column) {
            (Some(offset), _, _) => {
                if offset > document.text().len() {
                    bail!(
                        "offset {offset} is past the end of the document ({} bytes)",
                        document.text().len()
                    );
                }
                Ok(document.position_at(offset))
            }
            (None, Some(line), Some(column)) => Ok(Position::new(line, column)),
            _ => bail!("either --offset or --line with --column is required"),
        }
    }
}

/// Without a project root, the companion view is the `.xml` file next to the style.
fn sibling_markup(style_path: &Path) -> Option<PathBuf> {
    Some(style_path.with_extension("xml"))
}

fn load_config(path: &Path) -> Result<CompletionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let text = fs::read_to_string(&cli.document)
        .with_context(|| format!("failed to read {}", cli.document.display()))?;
    let document = TextDocument::new(text);
    let position = cli.position(&document)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CompletionConfig::default(),
    };
    let store = Arc::new(SchemaStore::new(JsonFile::new(&cli.schema)));
    let engine = match &cli.project_root {
        Some(root) => CompletionEngine::new(store, AlloyProject::new(root)),
        None => CompletionEngine::new(store, sibling_markup),
    }
    .with_config(config);

    let request = CompletionRequest::new(&document, &cli.document, position);
    let items = engine.complete(&request)?;
    tracing::debug!(?position, count = items.len(), "completed");

    write_candidates(&items, cli.format, out)
}

fn write_candidates(items: &[Candidate], format: Format, out: &mut impl Write) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, items)?;
            writeln!(out)?;
        }
        Format::Plain => {
            for item in items {
                let detail = item.detail.as_deref().unwrap_or("");
                writeln!(out, "{}\t{:?}\t{}", item.label, item.kind, detail)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_config::init_tracing();
    let cli = Cli::parse();
    run(&cli, &mut io::stdout().lock())
}
