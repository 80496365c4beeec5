use std::{env, fs::File, path::PathBuf, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::{config, error::AppError};

pub fn init() -> Result<Option<PathBuf>, AppError> {
    let Ok(directives) = env::var(config::LOG_FILTER_ENV) else {
        return Ok(None);
    };
    let filter = parse_filter(&directives)?;
    let path = env::var_os(config::LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_LOG_FILE));
    let file = File::create(&path).map_err(|source| AppError::LogFile {
        path: path.clone(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(AppError::Subscriber)?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(Some(path))
}

fn parse_filter(directives: &str) -> Result<EnvFilter, AppError> {
    Ok(EnvFilter::try_new(directives)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_module_directives() {
        assert!(parse_filter("starfield=debug,warn").is_ok());
    }

    #[test]
    fn rejects_malformed_directives() {
        let err = parse_filter("starfield=notalevel").unwrap_err();
        assert!(matches!(err, AppError::LogFilter(_)));
    }
}
