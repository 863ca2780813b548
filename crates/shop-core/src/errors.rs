use shop_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::EntityKind;
use crate::rules::validation::{ValidationError, ValidationErrors};

/// Result type alias using ShopError
pub type Result<T> = std::result::Result<T, ShopError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used for programmatic handling,
/// log fields and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    ValidationFailed,

    // Lookup
    NotFound,
    AlreadyExists,

    // Schema constraints
    UniqueViolation,
    ForeignKeyViolation,
    Protected,
    ConstraintViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::ValidationFailed => "ERR_VALIDATION_FAILED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::UniqueViolation => "ERR_UNIQUE_VIOLATION",
            ExErrorKind::ForeignKeyViolation => "ERR_FOREIGN_KEY_VIOLATION",
            ExErrorKind::Protected => "ERR_PROTECTED",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }

    /// Whether the caller supplied bad data (as opposed to a system failure)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::ValidationFailed
                | ExErrorKind::NotFound
                | ExErrorKind::AlreadyExists
                | ExErrorKind::UniqueViolation
                | ExErrorKind::ForeignKeyViolation
                | ExErrorKind::Protected
                | ExErrorKind::ConstraintViolation
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context for debugging. Storage
/// errors keep the engine's own message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<EntityKind>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    validation: Option<ValidationErrors>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            validation: None,
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_entity(mut self, entity: EntityKind) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the individual field errors of a failed validation
    pub fn with_validation(mut self, errors: ValidationErrors) -> Self {
        self.validation = Some(errors);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<EntityKind> {
        self.entity
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        self.validation.as_ref()
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
        match (&self.entity, &self.entity_id) {
            (Some(entity), Some(id)) => write!(f, " ({} {})", entity, id)?,
            (None, Some(id)) => write!(f, " (id: {})", id)?,
            _ => {}
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " [request {}]", request_id)?;
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " [trace {}]", trace_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised by catalog operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopError {
    /// Explicitly requested validation rejected the record
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A record with the same primary key is already stored
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: EntityKind, id: String },

    /// A unique column already holds the value
    #[error("{entity} with this {field} already exists: {value}")]
    UniqueViolation {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },

    /// A foreign key points at a row that does not exist
    #[error("{entity}.{field} references missing {target} {id}")]
    DanglingReference {
        entity: EntityKind,
        field: &'static str,
        target: EntityKind,
        id: String,
    },

    /// Delete refused because protected rows still reference the record
    #[error("Cannot delete {entity} {id}: referenced by {count} {dependent} row(s)")]
    Protected {
        entity: EntityKind,
        id: String,
        dependent: EntityKind,
        count: usize,
    },

}

impl From<ValidationErrors> for ShopError {
    fn from(errors: ValidationErrors) -> Self {
        ShopError::Validation(errors)
    }
}

impl From<ValidationError> for ShopError {
    fn from(error: ValidationError) -> Self {
        ShopError::Validation(error.into())
    }
}

/// Conversion into the canonical facility
impl From<ShopError> for ExError {
    fn from(err: ShopError) -> Self {
        let message = err.to_string();
        match err {
            ShopError::Validation(errors) => ExError::new(ExErrorKind::ValidationFailed)
                .with_message(message)
                .with_validation(errors),

            ShopError::NotFound { entity, id } => ExError::new(ExErrorKind::NotFound)
                .with_entity(entity)
                .with_entity_id(id)
                .with_message(message),

            ShopError::AlreadyExists { entity, id } => ExError::new(ExErrorKind::AlreadyExists)
                .with_entity(entity)
                .with_entity_id(id)
                .with_message(message),

            ShopError::UniqueViolation { entity, .. } => {
                ExError::new(ExErrorKind::UniqueViolation)
                    .with_entity(entity)
                    .with_message(message)
            }

            ShopError::DanglingReference { entity, .. } => {
                ExError::new(ExErrorKind::ForeignKeyViolation)
                    .with_entity(entity)
                    .with_message(message)
            }

            ShopError::Protected { entity, id, .. } => ExError::new(ExErrorKind::Protected)
                .with_entity(entity)
                .with_entity_id(id)
                .with_message(message),
        }
    }
}
