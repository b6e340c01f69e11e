use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Convert(#[from] tradeconv_core::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Convert(tradeconv_core::Error::Config(_) | tradeconv_core::Error::Json(_)) => 2,
            Self::Convert(_) => 10,
        }
    }
}
