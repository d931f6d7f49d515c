//! Error type for the fallible edges of the engine (configuration only;
//! event generation itself cannot fail).

use std::path::PathBuf;

#[derive(Debug)]
pub enum SimError {
    ConfigIo { path: PathBuf, source: std::io::Error },
    ConfigParse { path: PathBuf, source: serde_json::Error },
    InvalidConfig(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigIo { path, source } => {
                write!(f, "Failed to read config {}: {}", path.display(), source)
            }
            Self::ConfigParse { path, source } => {
                write!(f, "Invalid config {}: {}", path.display(), source)
            }
            Self::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigIo { source, .. } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::InvalidConfig(_) => None,
        }
    }
}
