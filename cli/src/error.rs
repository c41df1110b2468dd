//! Harness-level errors: engine failures plus the CLI's own parsing and
//! script-format mistakes.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] vsparse_engine::SparseError),

    #[error("invalid hex data: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("could not read script file {path}: {source}")]
    ScriptIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed script line {line_no}: {reason}")]
    ScriptSyntax { line_no: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, CliError>;
