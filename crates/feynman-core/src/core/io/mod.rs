//! File input and output: process definitions in, DOT graphs and amplitude
//! tables out.

pub mod dot;
pub mod export;
pub mod process;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV to '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
