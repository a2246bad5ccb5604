use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use docwise_corpus::{Document, DocumentKind, format_size};
use docwise_engine::{Answer, Engine, EngineConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Lexical question answering over local document files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a single question against the given documents
    Ask {
        /// Document files to ingest before answering
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Emit the answer as JSON instead of plain text
        #[arg(long)]
        json: bool,

        /// The question to answer
        question: String,
    },
    /// Ask questions interactively over the given documents
    Chat {
        /// Document files to ingest before the session starts
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_subscriber();

    let config_path = resolve_config_path(cli.config);
    let config = EngineConfig::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let engine = Engine::new(config);

    match cli.command {
        Command::Ask {
            files,
            json,
            question,
        } => {
            load_documents(&engine, &files)?;
            let answer = engine.ask(question).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                print_answer(&answer);
            }
        }
        Command::Chat { files } => {
            println!("docwise v{}", env!("CARGO_PKG_VERSION"));
            let loaded = load_documents(&engine, &files)?;
            for (name, bytes) in &loaded {
                println!("  {name} ({})", format_size(*bytes));
            }
            let chunks = engine.chunk_count().await?;
            println!(
                "{} document(s), {chunks} chunk(s) indexed. Type a question, or \"exit\" to leave.",
                loaded.len()
            );
            run_chat(&engine).await?;
        }
    }

    Ok(())
}

/// Read each file, resolve its kind from the extension, and hand it to the
/// engine. Returns the display name and byte size of every loaded file.
fn load_documents(engine: &Engine, files: &[PathBuf]) -> anyhow::Result<Vec<(String, u64)>> {
    let mut loaded = Vec::with_capacity(files.len());
    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let kind = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(DocumentKind::Unknown, DocumentKind::from_label);
        let display_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("document")
            .to_owned();
        tracing::debug!(path = %path.display(), kind = kind.as_str(), "ingesting file");
        let bytes = text.len() as u64;
        engine.add_document(Document::new(
            path.to_string_lossy(),
            display_name.clone(),
            text,
            kind,
        ))?;
        loaded.push((display_name, bytes));
    }
    Ok(loaded)
}

async fn run_chat(engine: &Engine) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }
        let answer = engine.ask(question).await?;
        print_answer(&answer);
        println!();
    }
    Ok(())
}

fn print_answer(answer: &Answer) {
    println!("{}", answer.text);
    println!();
    println!("confidence: {:.2}", answer.confidence);
    match (&answer.primary_source, answer.supplementary_source_count) {
        (Some(source), 0) => println!("source: {source}"),
        (Some(source), extra) => println!("source: {source} (+{extra} supplementary)"),
        (None, _) => {}
    }
}

fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(path) = std::env::var("DOCWISE_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("docwise.toml")
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Logs go to stderr so that answer output (including --json) stays clean.
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
