use anyhow::{Context, Result, bail};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::format;

const MAX_DOCUMENT_SIZE: u64 = 4 * 1024 * 1024; // 4MB

/// Source documents and their translation mirrors on disk.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents_dir: PathBuf,
    translations_dir: PathBuf,
}

impl DocumentStore {
    pub fn new(documents_dir: impl Into<PathBuf>, translations_dir: impl Into<PathBuf>) -> Self {
        Self {
            documents_dir: documents_dir.into(),
            translations_dir: translations_dir.into(),
        }
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Lists regular files in the documents directory, sorted by name.
    ///
    /// A missing or unreadable directory yields an empty list.
    pub fn list_documents(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.documents_dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        dir = %self.documents_dir.display(),
                        error = %e,
                        "cannot list documents"
                    );
                }
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Reads a document from the documents directory and splits it into
    /// segments, using the container format its extension names.
    pub fn read_document(&self, name: &str) -> Result<Vec<String>> {
        let path = self.documents_dir.join(name);
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        if metadata.len() > MAX_DOCUMENT_SIZE {
            bail!(
                "{name} is {:.1} MB, larger than the 4 MB limit",
                metadata.len() as f64 / 1024.0 / 1024.0
            );
        }

        format::for_path(&path).read_segments(&path)
    }

    /// Output path for `name` translated into `target_language`:
    /// `{stem}_{target_language}{extension}` inside the translations directory.
    pub fn output_path(&self, name: &str, target_language: &str) -> PathBuf {
        let path = Path::new(name);
        let stem = path
            .file_stem()
            .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        self.translations_dir
            .join(format!("{stem}_{target_language}{extension}"))
    }
}
