use std::path::PathBuf;

/// Result type alias for the document pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document pipeline
#[derive(Debug)]
pub enum Error {
    /// A model source could not be understood, e.g. a malformed `#[swagger]` attribute
    ParseError { file: PathBuf, message: String },
    /// A model was requested that is not a named record (struct with named fields)
    NotARecord(String),
    /// A model name that no scanned source defines
    UnknownModel(String),
    /// The JSON encoder failed; the encoder's own error is kept as-is
    SerializationError(serde_json::Error),
    YamlError(serde_yaml::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::ParseError { file, message } => {
                write!(f, "parse error in {}: {}", file.display(), message)
            }
            Error::NotARecord(name) => {
                write!(f, "model `{}` is not a record type with named fields", name)
            }
            Error::UnknownModel(name) => write!(f, "model `{}` was not found in any source file", name),
            Error::SerializationError(e) => write!(f, "{}", e),
            Error::YamlError(e) => write!(f, "YAML error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SerializationError(e) => Some(e),
            Error::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::YamlError(err)
    }
}
