use thiserror::Error;

/// Which boundary of a candidate business-hours range collided with an
/// existing range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end"),
        }
    }
}

/// Field a validation failure is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Start,
    Pause,
    Stop,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Start => write!(f, "start"),
            Field::Pause => write!(f, "pause"),
            Field::Stop => write!(f, "stop"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Business hours {boundary} overlaps an existing range")]
    Overlap { boundary: Boundary },
    #[error("Invalid business hours range: {start}..{end}")]
    InvalidRange { start: u64, end: u64 },
    #[error("Pause statuses intersect {field} statuses")]
    SlaBound { field: Field },
    #[error("Field {field} is required")]
    Required { field: Field },
    #[error("A calendar needs at least one business hours range")]
    NoBusinessHours,
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("Invalid calendar snapshot: {0}")]
    InvalidSnapshot(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("A calendar must keep at least one business hours range")]
    LastRangeRemoval,
    #[error("Still referenced: {0}")]
    Referenced(String),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
