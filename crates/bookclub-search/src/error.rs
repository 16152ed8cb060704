use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookclubError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] bookclub_catalog::CatalogError),
    #[error("Search error: {0}")]
    SearchError(#[from] crate::search::SearchError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BookclubError>;
