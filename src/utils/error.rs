use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Catalog load failed: {0}")]
    LoadError(#[from] LoadFailure),

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Selection out of range: {index} (list has {len} entries)")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Unknown command: {input}")]
    UnknownCommand { input: String },
}

/// 目錄資料載入失敗的兩種情況，可被快取並重複回報
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    #[error("data file not found: {path}")]
    NotFound { path: String },

    #[error("data file {path} is malformed: {message}")]
    Malformed { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::IoError(_) => ErrorCategory::Io,
            DirectoryError::SerializationError(_)
            | DirectoryError::CsvError(_)
            | DirectoryError::LoadError(_)
            | DirectoryError::ProcessingError { .. } => ErrorCategory::Data,
            DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DirectoryError::SelectionOutOfRange { .. } | DirectoryError::UnknownCommand { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::IoError(_) => "Check file permissions and that the output directory exists",
            DirectoryError::SerializationError(_)
            | DirectoryError::CsvError(_)
            | DirectoryError::ProcessingError { .. } => {
                "Check that the output can be written in the requested format"
            }
            DirectoryError::LoadError(LoadFailure::NotFound { .. }) => {
                "Check --data-dir and the data file names in the configuration"
            }
            DirectoryError::LoadError(LoadFailure::Malformed { .. }) => {
                "Fix the JSON document: region -> category -> list of items"
            }
            DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
            DirectoryError::SelectionOutOfRange { .. } => "Run `list` again and pick a number from it",
            DirectoryError::UnknownCommand { .. } => "Type `help` to see the available commands",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::LoadError(failure) => format!("데이터를 불러올 수 없습니다: {}", failure),
            DirectoryError::SelectionOutOfRange { index, len } => {
                format!("{}번 항목이 없습니다 (전체 {}개)", index, len)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
