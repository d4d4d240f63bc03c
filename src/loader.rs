use crate::directory::DirectoryReader;
use crate::metadata::epub_file_metadata;
use crate::reader::Document;
use anyhow::Result;
use std::path::Path;

/// Load every file in `input_dir`, attaching EPUB metadata to each.
///
/// No file-type filtering happens here: the EPUB metadata callback runs on
/// every file the reader visits, so a file that is not a readable EPUB
/// fails the whole call.
pub fn load_epubs_from_dir(input_dir: impl AsRef<Path>) -> Result<Vec<Document>> {
    DirectoryReader::new(input_dir.as_ref())
        .file_metadata(epub_file_metadata)
        .load_data()
}
