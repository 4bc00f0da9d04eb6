use keycmp_core_types::RequestId;
use thiserror::Error;

/// Result type alias using CmpError
pub type Result<T> = std::result::Result<T, CmpError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, log events and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Two items in one collection extracted to the same key
    KeyCollision,
    /// Caller-contract violation (empty field list, blank key name, ...)
    InvalidInput,
    /// Input documents or config could not be decoded
    Serialization,
    /// Input documents or config could not be read
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::KeyCollision => "ERR_KEY_COLLISION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context needed to diagnose a failed
/// comparison: which operation, which collection, which key.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    collection: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            collection: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the offending key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add the label of the collection the error was raised for
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(collection) = &self.collection {
            write!(f, " (collection: {})", collection)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised by partitioning and comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CmpError {
    /// Two items in the same collection produced the same key
    #[error("2 or more items have the same key value: {key}, collection: {collection} (items #{first_index} and #{second_index})")]
    KeyCollision {
        key: String,
        collection: String,
        first_index: usize,
        second_index: usize,
    },

    /// A required argument was missing or unusable
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Serialization error (JSON/TOML decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl CmpError {
    /// True if this is a key collision
    pub fn is_key_collision(&self) -> bool {
        matches!(self, CmpError::KeyCollision { .. })
    }
}

impl From<CmpError> for ExError {
    fn from(err: CmpError) -> Self {
        match err {
            CmpError::KeyCollision {
                key,
                collection,
                first_index,
                second_index,
            } => ExError::new(ExErrorKind::KeyCollision)
                .with_op("partition")
                .with_key(key)
                .with_collection(collection)
                .with_message(format!(
                    "items #{} and #{} have the same key",
                    first_index, second_index
                )),

            CmpError::InvalidArgument { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            CmpError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for CmpError {
    fn from(err: serde_json::Error) -> Self {
        CmpError::Serialization {
            message: err.to_string(),
        }
    }
}
