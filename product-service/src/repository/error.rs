//! Repository error types
//!
//! Structured errors for persistence operations, carrying the operation being
//! performed, the failure category, and a human-readable message. The message
//! is passed through to the response envelope unchanged, so it should say
//! what failed without leaking credentials.
//!
//! # Example
//!
//! ```rust
//! use product_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::query_failed(RepositoryOperation::FindPage, "relation missing");
//! assert_eq!(error.kind, RepositoryErrorKind::QueryFailed);
//! assert!(!error.is_retriable());
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Establishing a store connection
    Connect,
    /// Applying schema migrations
    Migrate,
    /// Counting every row in the collection
    CountAll,
    /// Fetching the whole collection
    FindAll,
    /// Fetching a bounded slice plus the collection total
    FindPage,
    /// Finding a single record by identity
    FindById,
    /// Finding the first record matching a name
    FindByName,
    /// Inserting a new record
    Insert,
    /// Overwriting an existing record
    Update,
    /// Removing a record
    Delete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connect"),
            Self::Migrate => write!(f, "migrate"),
            Self::CountAll => write!(f, "count_all"),
            Self::FindAll => write!(f, "find_all"),
            Self::FindPage => write!(f, "find_page"),
            Self::FindById => write!(f, "find_by_id"),
            Self::FindByName => write!(f, "find_by_name"),
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Failed to reach the store
    ConnectionFailed,
    /// The store rejected or failed the query
    QueryFailed,
    /// A uniqueness constraint was violated
    AlreadyExists,
    /// A stored value could not be converted to its domain type
    TypeConversion,
    /// The operation timed out
    Timeout,
    /// Other unclassified error
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::QueryFailed => write!(f, "query_failed"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::TypeConversion => write!(f, "type_conversion"),
            Self::Timeout => write!(f, "timeout"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Additional context, e.g. the identity involved
    pub context: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ConnectionFailed, message)
    }

    /// Create a query failed error
    pub fn query_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::QueryFailed, message)
    }

    /// Create an "already exists" error for a uniqueness violation
    pub fn already_exists(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::AlreadyExists, message)
    }

    /// Create a type conversion error
    pub fn type_conversion(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::TypeConversion, message)
    }

    /// Create a timeout error
    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    /// Add context to an existing error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Whether the failure is transient and could succeed on retry.
    ///
    /// The service never retries on its own; this only feeds log context so
    /// an operator can tell transient faults from permanent ones.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "store {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref context) = self.context {
            write!(f, " [{}]", context)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(format!("{}", RepositoryOperation::CountAll), "count_all");
        assert_eq!(format!("{}", RepositoryOperation::FindPage), "find_page");
        assert_eq!(
            format!("{}", RepositoryOperation::FindByName),
            "find_by_name"
        );
        assert_eq!(format!("{}", RepositoryOperation::Delete), "delete");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            format!("{}", RepositoryErrorKind::ConnectionFailed),
            "connection_failed"
        );
        assert_eq!(
            format!("{}", RepositoryErrorKind::AlreadyExists),
            "already_exists"
        );
    }

    #[test]
    fn test_convenience_constructors() {
        let error = RepositoryError::query_failed(RepositoryOperation::FindAll, "syntax error");
        assert_eq!(error.operation, RepositoryOperation::FindAll);
        assert_eq!(error.kind, RepositoryErrorKind::QueryFailed);
        assert_eq!(error.message, "syntax error");
        assert!(error.context.is_none());
    }

    #[test]
    fn test_with_context() {
        let error = RepositoryError::already_exists(RepositoryOperation::Insert, "duplicate key")
            .with_context("prod_123");
        assert_eq!(error.context, Some("prod_123".to_string()));
    }

    #[test]
    fn test_is_retriable() {
        assert!(
            RepositoryError::connection_failed(RepositoryOperation::FindPage, "refused")
                .is_retriable()
        );
        assert!(RepositoryError::timeout(RepositoryOperation::CountAll, "30s").is_retriable());
        assert!(
            !RepositoryError::query_failed(RepositoryOperation::FindPage, "syntax").is_retriable()
        );
        assert!(
            !RepositoryError::already_exists(RepositoryOperation::Insert, "dup").is_retriable()
        );
    }

    #[test]
    fn test_display_with_context() {
        let error = RepositoryError::query_failed(RepositoryOperation::Update, "deadlock")
            .with_context("prod_abc");
        let display = format!("{}", error);
        assert!(display.contains("query_failed"));
        assert!(display.contains("update"));
        assert!(display.contains("[prod_abc]"));
    }

    #[test]
    fn test_display_without_context() {
        let display = format!(
            "{}",
            RepositoryError::timeout(RepositoryOperation::FindAll, "slow")
        );
        assert!(!display.contains('['));
    }
}
