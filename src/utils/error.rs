use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid validation pattern for field '{field}': {source}")]
    InvalidPatternError {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Duplicate field name: {field}")]
    DuplicateFieldError { field: String },

    #[error("Form must declare at least one field")]
    EmptyFormError,

    #[error("Unknown field: {field}")]
    UnknownFieldError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Form session closed")]
    SessionClosedError,
}

impl FormError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::IoError(e) => format!("無法讀取檔案: {}", e),
            FormError::InvalidPatternError { field, pattern, .. } => {
                format!("欄位 '{}' 的驗證規則無效: {}", field, pattern)
            }
            FormError::DuplicateFieldError { field } => format!("欄位名稱重複: {}", field),
            FormError::EmptyFormError => "表單沒有任何欄位".to_string(),
            FormError::UnknownFieldError { field } => format!("未知的欄位: {}", field),
            FormError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 '{}' 無效: {}", field, reason)
            }
            FormError::ConfigValidationError { field, message } => {
                format!("設定錯誤 ({}): {}", field, message)
            }
            FormError::SessionClosedError => "表單已關閉".to_string(),
        }
    }

    /// 修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FormError::IoError(_) => "Check that the configuration file exists and is readable",
            FormError::InvalidPatternError { .. } => {
                "Fix the regular expression in the field's `pattern` entry"
            }
            FormError::DuplicateFieldError { .. } => "Give every [[fields]] entry a distinct name",
            FormError::EmptyFormError => "Declare at least one [[fields]] entry",
            FormError::UnknownFieldError { .. } => {
                "Use one of the field names declared in the form configuration"
            }
            FormError::InvalidConfigValueError { .. } | FormError::ConfigValidationError { .. } => {
                "Review the form configuration file"
            }
            FormError::SessionClosedError => "Create a new form session",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
