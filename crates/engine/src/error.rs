use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad mode, threshold out of range, etc.).
    ConfigValidation(String),
    /// Missing required column in an input file.
    MissingColumn { source: String, column: String },
    /// Order file header block is malformed (order number / delivery date rows).
    HeaderBlock { line: usize, detail: String },
    /// IO error (file read, CSV decode, etc.).
    Io(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source}: missing column '{column}'")
            }
            Self::HeaderBlock { line, detail } => {
                write!(f, "order file line {line}: {detail}")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
