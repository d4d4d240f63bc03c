//! Extract Dublin Core metadata from EPUB files and load whole directories
//! of documents, with that metadata attached, for downstream indexing.

pub mod directory;
pub mod docx_reader;
pub mod epub_reader;
pub mod error;
pub mod loader;
pub mod markdown;
pub mod metadata;
pub mod reader;

#[cfg(test)]
pub(crate) mod test_support;

pub use directory::DirectoryReader;
pub use error::LoaderError;
pub use loader::load_epubs_from_dir;
pub use metadata::{extract_epub_metadata, FileMetadata, MetadataRecord};
pub use reader::Document;
