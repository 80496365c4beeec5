use std::{io, path::PathBuf};

use tracing_subscriber::filter::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O failed")]
    Terminal(#[from] io::Error),

    #[error("failed to create log file {}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid STARFIELD_LOG filter")]
    LogFilter(#[from] ParseError),

    #[error("failed to install log subscriber: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}
