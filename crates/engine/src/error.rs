use std::fmt;

#[derive(Debug)]
pub enum MatchError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (threshold range, top_n, bad table reference).
    ConfigValidation(String),
    /// A supplied table cannot be parsed into rows and columns.
    InputFormat { table: String, detail: String },
    /// A caller-selected column is absent from a table.
    MissingColumn { table: String, column: String },
    /// IO error (file read, output write).
    Io(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InputFormat { table, detail } => {
                write!(f, "table '{table}': cannot parse input: {detail}")
            }
            Self::MissingColumn { table, column } => {
                write!(f, "table '{table}': missing column '{column}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}
