pub mod classify;
pub mod error;

pub use classify::{classify_file, classify_str};
pub use error::{IngestError, Result};
