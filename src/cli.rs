use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Extract EPUB metadata and load document directories for indexing
#[derive(Parser, Debug)]
#[command(name = "epub-loader", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the metadata record of a single EPUB as JSON
    Metadata {
        /// Path to the EPUB file
        input: PathBuf,
    },
    /// Load every file in a directory and print the documents as JSON
    Load(LoadArgs),
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Directory to scan
    pub input_dir: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Also load dot-files and dot-directories
    #[arg(long, default_value_t = false)]
    pub include_hidden: bool,

    /// Only load files with these extensions (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub exts: Vec<String>,

    /// Stop after this many files
    #[arg(long)]
    pub limit: Option<usize>,

    /// Use the file path as the document id instead of a content hash
    #[arg(long, default_value_t = false)]
    pub filename_as_id: bool,

    /// Fail on the first file whose text cannot be extracted
    #[arg(long, default_value_t = false)]
    pub raise_on_error: bool,

    /// Attach EPUB metadata records; `--epub-metadata=false` attaches file
    /// attributes instead
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub epub_metadata: bool,

    /// Print one summary line per document instead of JSON
    #[arg(short, long, default_value_t = false)]
    pub summary: bool,
}
