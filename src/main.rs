mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, LoadArgs};
use epub_loader::metadata::epub_file_metadata;
use epub_loader::{extract_epub_metadata, DirectoryReader, Document};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Metadata { input } => {
            let record = extract_epub_metadata(&input)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Load(args) => load(&args)?,
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(args: &LoadArgs) -> Result<()> {
    let mut reader = DirectoryReader::new(&args.input_dir)
        .recursive(args.recursive)
        .exclude_hidden(!args.include_hidden)
        .required_exts(&args.exts)
        .num_files_limit(args.limit)
        .filename_as_id(args.filename_as_id)
        .raise_on_error(args.raise_on_error);
    if args.epub_metadata {
        reader = reader.file_metadata(epub_file_metadata);
    }

    let documents = reader.load_data()?;

    if args.summary {
        for doc in &documents {
            println!("{}", summary_line(doc));
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&documents)?);
    }

    let chars: usize = documents.iter().map(|d| d.text.chars().count()).sum();
    eprintln!(
        "Loaded {} documents ({} characters) from {}",
        documents.len(),
        chars,
        args.input_dir.display()
    );

    Ok(())
}

fn summary_line(doc: &Document) -> String {
    let label = doc
        .metadata
        .get("title")
        .or_else(|| doc.metadata.get("file_name"))
        .map(String::as_str)
        .unwrap_or("?");
    format!("{}\t{}\t{} chars", doc.id, label, doc.text.chars().count())
}
