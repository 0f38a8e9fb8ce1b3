//! Error types for trace I/O and configuration loading.

use std::fmt;
use std::io;

/// Failure reading or decoding a trace line.
#[derive(Debug)]
pub enum TraceError {
    Io(io::Error),
    Decode { line_number: usize, source: serde_json::Error },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "trace I/O error: {err}"),
            Self::Decode { line_number, source } => {
                write!(f, "malformed trace event on line {line_number}: {source}")
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for TraceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Failure loading or validating a simulator configuration.
#[derive(Debug)]
pub enum ConfigLoadError {
    Io(io::Error),
    Parse(toml::de::Error),
    UnknownPredictor(String),
    Geometry(archsim_memory::ConfigError),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read configuration file: {err}"),
            Self::Parse(err) => write!(f, "could not parse configuration: {err}"),
            Self::UnknownPredictor(name) => write!(f, "unknown predictor: {name}"),
            Self::Geometry(err) => write!(f, "invalid cache geometry: {err}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Geometry(err) => Some(err),
            Self::UnknownPredictor(_) => None,
        }
    }
}

impl From<io::Error> for ConfigLoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigLoadError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<archsim_memory::ConfigError> for ConfigLoadError {
    fn from(err: archsim_memory::ConfigError) -> Self {
        Self::Geometry(err)
    }
}
