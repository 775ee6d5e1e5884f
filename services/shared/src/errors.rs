/// Shared error types for the KINO payout calculator
///
/// Design Philosophy:
/// - Standardized error codes for consistent reporting across the run
/// - Categorized by error domain (Validation, Network, Data, Configuration, Internal)
/// - Every category maps to a distinct process exit status
/// - Includes context fields for debugging (page, date, url, cause)
///
/// Usage:
/// - Components wrap their specific errors in ServiceError at the run boundary
/// - Error codes follow pattern: <CATEGORY>_<SPECIFIC>_<DETAIL>
/// - Every ServiceError is fatal to the run; there is no partial output
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error categories that map to process exit codes and logging severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Validation errors (exit 2, same as a usage error)
    /// Caller provided invalid input, detected before any network activity
    Validation,

    /// Network errors (exit 3)
    /// Draws API unreachable, timing out or rejecting the request
    Network,

    /// Data errors (exit 4)
    /// Draws API or cache returned something we cannot decode
    Data,

    /// Configuration errors (exit 5)
    /// Payout table does not cover the selection, bad environment values
    Configuration,

    /// Internal errors (exit 1)
    /// Evaluation tasks failing, serialization failures, programming errors
    Internal,
}

impl ErrorCategory {
    /// Map error category to process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Validation => 2,
            ErrorCategory::Network => 3,
            ErrorCategory::Data => 4,
            ErrorCategory::Configuration => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Map error category to log level
    pub fn log_level(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "warn",
            ErrorCategory::Network => "error",
            ErrorCategory::Data => "error",
            ErrorCategory::Configuration => "error",
            ErrorCategory::Internal => "error",
        }
    }
}

/// Standard error codes used across the calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    // Validation errors
    pub const VALIDATION_EMPTY_SELECTION: ErrorCode = ErrorCode("VALIDATION_EMPTY_SELECTION");
    pub const VALIDATION_TOO_MANY_NUMBERS: ErrorCode = ErrorCode("VALIDATION_TOO_MANY_NUMBERS");
    pub const VALIDATION_DUPLICATE_NUMBERS: ErrorCode = ErrorCode("VALIDATION_DUPLICATE_NUMBERS");
    pub const VALIDATION_NUMBER_OUT_OF_RANGE: ErrorCode =
        ErrorCode("VALIDATION_NUMBER_OUT_OF_RANGE");
    pub const VALIDATION_INVALID_DATE: ErrorCode = ErrorCode("VALIDATION_INVALID_DATE");
    pub const VALIDATION_PAGE_OUT_OF_RANGE: ErrorCode = ErrorCode("VALIDATION_PAGE_OUT_OF_RANGE");

    // Network errors
    pub const NETWORK_CONNECTION_FAILED: ErrorCode = ErrorCode("NETWORK_CONNECTION_FAILED");
    pub const NETWORK_TIMEOUT: ErrorCode = ErrorCode("NETWORK_TIMEOUT");
    pub const NETWORK_REQUEST_FAILED: ErrorCode = ErrorCode("NETWORK_REQUEST_FAILED");

    // Data errors
    pub const DATA_MALFORMED_RESPONSE: ErrorCode = ErrorCode("DATA_MALFORMED_RESPONSE");
    pub const DATA_CACHE_IO: ErrorCode = ErrorCode("DATA_CACHE_IO");

    // Configuration errors
    pub const CONFIG_MISSING_SELECTION_SIZE: ErrorCode = ErrorCode("CONFIG_MISSING_SELECTION_SIZE");
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("CONFIG_INVALID");

    // Internal errors
    pub const INTERNAL_EVALUATION_FAILED: ErrorCode = ErrorCode("INTERNAL_EVALUATION_FAILED");
    pub const INTERNAL_SERIALIZATION: ErrorCode = ErrorCode("INTERNAL_SERIALIZATION");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Standardized error structure used across the calculator
///
/// This provides consistent error reporting with:
/// - Structured error codes for programmatic handling
/// - Human-readable messages
/// - Optional context for debugging
/// - Category-based classification and exit codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    /// Error category (determines exit code and log level)
    pub category: ErrorCategory,

    /// Structured error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context (e.g., page, date, underlying cause)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ServiceError {
    /// Create a new ServiceError
    pub fn new(category: ErrorCategory, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            category,
            code: code.as_str().to_string(),
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    // Validation error constructors
    pub fn empty_selection() -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_EMPTY_SELECTION,
            "At least one number must be selected",
        )
    }

    pub fn too_many_numbers(count: usize, max: usize) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_TOO_MANY_NUMBERS,
            format!("Up to {} numbers can be selected", max),
        )
        .with_context(format!("selected: {}", count))
    }

    pub fn duplicate_numbers(duplicates: &[u8]) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_DUPLICATE_NUMBERS,
            "Selected numbers can not contain duplicates",
        )
        .with_context(format!("duplicates: {:?}", duplicates))
    }

    pub fn number_out_of_range(number: u8, min: u8, max: u8) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_NUMBER_OUT_OF_RANGE,
            format!("Number {} is out of range", number),
        )
        .with_context(format!("min: {}, max: {}", min, max))
    }

    pub fn invalid_date(input: impl fmt::Display, error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_INVALID_DATE,
            format!("Invalid draw date: {}", input),
        )
        .with_context(error.to_string())
    }

    pub fn page_out_of_range(page: u32, min: u32, max: u32) -> Self {
        Self::new(
            ErrorCategory::Validation,
            ErrorCode::VALIDATION_PAGE_OUT_OF_RANGE,
            format!("Page {} is out of range", page),
        )
        .with_context(format!("min: {}, max: {}", min, max))
    }

    // Network error constructors
    pub fn connection_failed(context: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Network,
            ErrorCode::NETWORK_CONNECTION_FAILED,
            "Exiting because of ConnectionError",
        )
        .with_context(context)
    }

    pub fn timeout(context: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Network,
            ErrorCode::NETWORK_TIMEOUT,
            "Exiting because of Timeout",
        )
        .with_context(context)
    }

    pub fn request_failed(context: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Network,
            ErrorCode::NETWORK_REQUEST_FAILED,
            "Exiting because of RequestException",
        )
        .with_context(context)
    }

    // Data error constructors
    pub fn malformed_response(context: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::Data,
            ErrorCode::DATA_MALFORMED_RESPONSE,
            "Draws API returned an unexpected payload",
        )
        .with_context(context)
    }

    pub fn cache_io(path: impl fmt::Display, error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Data,
            ErrorCode::DATA_CACHE_IO,
            "Cache I/O error",
        )
        .with_context(format!("path: {}, error: {}", path, error))
    }

    // Configuration error constructors
    pub fn missing_selection_size(size: usize) -> Self {
        Self::new(
            ErrorCategory::Configuration,
            ErrorCode::CONFIG_MISSING_SELECTION_SIZE,
            format!("Payout table has no row for {} selected numbers", size),
        )
    }

    pub fn invalid_config(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Configuration,
            ErrorCode::CONFIG_INVALID,
            "Invalid configuration",
        )
        .with_context(error.to_string())
    }

    // Internal error constructors
    pub fn evaluation_failed(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_EVALUATION_FAILED,
            "Payout evaluation task failed",
        )
        .with_context(error.to_string())
    }

    pub fn serialization_error(error: impl fmt::Display) -> Self {
        Self::new(
            ErrorCategory::Internal,
            ErrorCode::INTERNAL_SERIALIZATION,
            "Serialization error",
        )
        .with_context(error.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "[{}] {}: {}", self.code, self.message, context)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}
