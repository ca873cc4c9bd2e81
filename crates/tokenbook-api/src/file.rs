use std::path::{Path, PathBuf};

use tokenbook_core::models::TokenData;

use crate::error::FetchError;
use crate::traits::TokenSource;

/// Reads the token document from a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenSource for FileSource {
    type Error = FetchError;

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<TokenData, FetchError> {
        tracing::info!(path = %self.path.display(), "reading tokens");
        let bytes = tokio::fs::read(&self.path).await?;
        TokenData::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(
            &path,
            r##"{"Alias/Daily Post":{"brand":{"primary":{"value":"{color.blue.500}","type":"color"}}}}"##,
        )
        .unwrap();

        let data = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(data.brands(), vec!["Daily Post"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("absent.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
