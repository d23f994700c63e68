use advent_core::{DocumentSource, SourceError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Reads documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait(?Send)]
impl DocumentSource for FileSource {
    async fn fetch_document(&self, name: &str) -> Result<String, SourceError> {
        let path = self.root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => SourceError::NotFound(path.display().to_string()),
                _ => SourceError::Transport(format!("{}: {err}", path.display())),
            })
    }
}
