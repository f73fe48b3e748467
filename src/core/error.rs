/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// An enterprise fee may only inherit its tax category from the product
    /// when its calculator charges per item
    #[error("Inheriting the tax category requires a per-item calculator.")]
    IncompatibleTaxInheritance,

    /// The order needs a shipping method before shipping fees and taxes can
    /// be computed
    #[error("The order has no shipping method selected")]
    MissingShippingMethod,

    /// Mutations attempted against an order in a state that forbids them
    #[error("{0}")]
    OrderNotEditable(String),

    /// The current user lacks permission for the attempted change; nothing
    /// is persisted
    #[error("I couldn't get authorisation to save those changes, so they remain unsaved")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_editable(msg: impl Into<String>) -> Self {
        AppError::OrderNotEditable(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
