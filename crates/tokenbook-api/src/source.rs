use std::path::PathBuf;
use std::time::Duration;

use tokenbook_core::models::TokenData;
use url::Url;

use crate::error::FetchError;
use crate::file::FileSource;
use crate::http::HttpSource;
use crate::traits::TokenSource;

/// A token source chosen from a configured location string.
pub enum Source {
    Http(HttpSource),
    File(FileSource),
}

impl Source {
    /// `http(s)://` URLs are fetched over the network; `file://` URLs and
    /// plain paths are read from disk.
    pub fn parse(location: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(FetchError::InvalidSource("empty location".into()));
        }

        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Http(HttpSource::new(url, timeout)?)),
                "file" => url
                    .to_file_path()
                    .map(|path| Self::File(FileSource::new(path)))
                    .map_err(|_| FetchError::InvalidSource(location.to_string())),
                // Windows drive letters parse as a one-letter scheme.
                scheme if scheme.len() == 1 => Ok(Self::File(FileSource::new(location))),
                scheme => Err(FetchError::InvalidSource(format!(
                    "unsupported scheme '{scheme}' in {location}"
                ))),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Self::File(FileSource::new(PathBuf::from(location))))
            }
            Err(e) => Err(FetchError::InvalidSource(format!("{location}: {e}"))),
        }
    }
}

impl TokenSource for Source {
    type Error = FetchError;

    fn describe(&self) -> String {
        match self {
            Self::Http(s) => s.describe(),
            Self::File(s) => s.describe(),
        }
    }

    async fn fetch(&self) -> Result<TokenData, FetchError> {
        match self {
            Self::Http(s) => s.fetch().await,
            Self::File(s) => s.fetch().await,
        }
    }
}
