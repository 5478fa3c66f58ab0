use std::path::PathBuf;

/// Top-level failure carried out of `app::run`: a message plus the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Data-quality failures. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Unrecognized period_name '{value}' (expected `current` or `previous`).")]
    MalformedPeriod { value: String },

    #[error("Malformed input in '{}':\n{details}", path.display())]
    MalformedInput { path: PathBuf, details: String },

    #[error("Missing required column `{column}` in '{}'.", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Duplicate {period} week {date} for {kind} '{entity_id}'.")]
    DuplicateWeek {
        kind: &'static str,
        period: &'static str,
        entity_id: String,
        date: chrono::NaiveDate,
    },

    #[error("Inconsistent period_id for {kind}: {detail}")]
    InconsistentPeriodId { kind: &'static str, detail: String },

    #[error("Failed to read '{}': {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl InputError {
    /// Exit code used when this error ends the process.
    pub fn exit_code(&self) -> u8 {
        match self {
            InputError::Io { .. } | InputError::MissingColumn { .. } => 2,
            InputError::MalformedPeriod { .. }
            | InputError::MalformedInput { .. }
            | InputError::DuplicateWeek { .. }
            | InputError::InconsistentPeriodId { .. } => 3,
        }
    }
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}
