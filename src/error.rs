use std::path::{Path, PathBuf};

use thiserror::Error;

/// The structural defect behind a [`ParseError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Missing attribute \"{attribute}\" in element <{element}>")]
    MissingAttribute { attribute: String, element: String },

    #[error("Expected an integer instead of \"{value}\" for the attribute \"{attribute}\"")]
    InvalidInteger { value: String, attribute: String },

    #[error("Missing rule name")]
    MissingRuleName,

    #[error("Missing rule description")]
    MissingRuleDescription,
}

/// A malformed-input condition found while walking an XML document.
///
/// Always fatal to the walk that produced it. `origin` is the document's
/// file path when the input came from disk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{} at line {line}", origin_suffix(.origin))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub origin: Option<PathBuf>,
}

impl ParseError {
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize, origin: Option<PathBuf>) -> Self {
        Self { kind, line, origin }
    }
}

#[allow(clippy::ref_option)]
fn origin_suffix(origin: &Option<PathBuf>) -> String {
    origin
        .as_deref()
        .map_or_else(String::new, |path: &Path| format!(" in {}", path.display()))
}

/// Why a document could not be read as XML.
#[derive(Error, Debug)]
pub enum XmlError {
    #[error(transparent)]
    Tokenizer(#[from] quick_xml::Error),

    #[error("unexpected second root element <{0}>")]
    SecondRoot(String),
}

#[derive(Error, Debug)]
pub enum NdependError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML{} at line {line}: {source}", origin_suffix(.origin))]
    MalformedXml {
        origin: Option<PathBuf>,
        line: usize,
        #[source]
        source: XmlError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to run {program}: {reason}")]
    Execution { program: PathBuf, reason: String },

    #[error("{program} did not finish within {seconds} second(s)")]
    Timeout { program: PathBuf, seconds: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl NdependError {
    /// Short category name of the error.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::MalformedXml { .. } => "MalformedXml",
            Self::Parse(_) => "Parse",
            Self::Execution { .. } | Self::Timeout { .. } => "Execution",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "TomlParse",
            Self::JsonSerialize(_) => "JsonSerialize",
        }
    }

    /// The parse error carried by this error, if any.
    #[must_use]
    pub const fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NdependError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
