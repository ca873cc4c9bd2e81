pub mod error;
pub mod file;
pub mod http;
pub mod source;
pub mod traits;

pub use error::FetchError;
pub use file::FileSource;
pub use http::HttpSource;
pub use source::Source;
pub use traits::TokenSource;
