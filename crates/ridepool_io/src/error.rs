use std::fmt;

/// Errors raised while loading configuration, tables, or writing results.
/// Every variant is fatal: the binary prints it and exits non-zero.
#[derive(Debug)]
pub enum IoError {
    Toml(toml::de::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    /// A matrix file's rows and columns did not agree on the station set.
    NonSquareMatrix { path: String },
    /// A structural problem in the scenario itself, caught before dispatch.
    Config(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::Toml(err) => write!(f, "invalid configuration: {err}"),
            IoError::Csv(err) => write!(f, "csv error: {err}"),
            IoError::Json(err) => write!(f, "json error: {err}"),
            IoError::Io(err) => write!(f, "io error: {err}"),
            IoError::NonSquareMatrix { path } => {
                write!(f, "matrix at {path} is not square over its declared stations")
            }
            IoError::Config(reason) => write!(f, "configuration error: {reason}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<toml::de::Error> for IoError {
    fn from(err: toml::de::Error) -> Self {
        IoError::Toml(err)
    }
}

impl From<csv::Error> for IoError {
    fn from(err: csv::Error) -> Self {
        IoError::Csv(err)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(err: serde_json::Error) -> Self {
        IoError::Json(err)
    }
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err)
    }
}
