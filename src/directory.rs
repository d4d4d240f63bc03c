//! Generic directory reader.
//!
//! Walks a directory, extracts text from each file with the reader for its
//! format, and attaches metadata produced by an injected per-file callback.
//! The reader knows nothing about what the callback extracts.

use crate::error::LoaderError;
use crate::metadata::{default_file_metadata, FileMetadata};
use crate::reader::{reader_for, Document, FileFormat};
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub type MetadataFn = Box<dyn Fn(&Path) -> Result<FileMetadata>>;

pub struct DirectoryReader {
    input_dir: PathBuf,
    recursive: bool,
    exclude_hidden: bool,
    required_exts: Vec<String>,
    num_files_limit: Option<usize>,
    filename_as_id: bool,
    raise_on_error: bool,
    file_metadata: MetadataFn,
}

impl DirectoryReader {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            recursive: false,
            exclude_hidden: true,
            required_exts: Vec::new(),
            num_files_limit: None,
            filename_as_id: false,
            raise_on_error: false,
            file_metadata: Box::new(default_file_metadata),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn exclude_hidden(mut self, exclude_hidden: bool) -> Self {
        self.exclude_hidden = exclude_hidden;
        self
    }

    /// Restrict loading to these extensions. Empty means everything.
    pub fn required_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_exts = exts
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn num_files_limit(mut self, limit: Option<usize>) -> Self {
        self.num_files_limit = limit;
        self
    }

    pub fn filename_as_id(mut self, filename_as_id: bool) -> Self {
        self.filename_as_id = filename_as_id;
        self
    }

    pub fn raise_on_error(mut self, raise_on_error: bool) -> Self {
        self.raise_on_error = raise_on_error;
        self
    }

    pub fn file_metadata<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Path) -> Result<FileMetadata> + 'static,
    {
        self.file_metadata = Box::new(callback);
        self
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false)
    }

    fn wanted(&self, path: &Path) -> bool {
        if self.required_exts.is_empty() {
            return true;
        }
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.required_exts.contains(&ext)
    }

    fn walk(&self) -> Result<Vec<PathBuf>> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(&self.input_dir)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(self.exclude_hidden && e.depth() > 0 && Self::is_hidden(e.path()))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Failed to read directory: {}", self.input_dir.display())
            })?;

            // Directory symlinks are never followed; symlinked files still load.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if is_file && self.wanted(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Files that `load_data` will visit, sorted by path and truncated to
    /// the configured limit.
    pub fn input_files(&self) -> Result<Vec<PathBuf>> {
        if !self.input_dir.is_dir() {
            return Err(LoaderError::DirectoryNotFound {
                path: self.input_dir.clone(),
            }
            .into());
        }

        let mut files = self.walk()?;
        files.sort();
        if let Some(limit) = self.num_files_limit {
            files.truncate(limit);
        }

        if files.is_empty() {
            return Err(LoaderError::NoFiles {
                path: self.input_dir.clone(),
            }
            .into());
        }

        Ok(files)
    }

    fn document_id(&self, path: &Path, text: &str) -> String {
        if self.filename_as_id {
            return path.display().to_string();
        }
        let mut hasher = Sha256::new();
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Load every input file as one document. Metadata callback errors
    /// always propagate; text extraction errors propagate only with
    /// `raise_on_error`, otherwise the file is skipped.
    pub fn load_data(&self) -> Result<Vec<Document>> {
        let files = self.input_files()?;
        info!(dir = %self.input_dir.display(), files = files.len(), "Loading directory");

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let metadata = (self.file_metadata)(&path)?;

            let format = FileFormat::detect(&path);
            let text = match reader_for(format).read_text(&path) {
                Ok(text) => text,
                Err(err) if !self.raise_on_error => {
                    warn!(path = %path.display(), "Failed to load file, skipping: {err:#}");
                    continue;
                }
                Err(err) => return Err(err),
            };

            debug!(path = %path.display(), ?format, chars = text.len(), "Loaded document");
            documents.push(Document {
                id: self.document_id(&path, &text),
                text,
                metadata,
            });
        }

        Ok(documents)
    }
}
