use crate::domain::entities::time_range::{TimeRange, MILLIS_PER_DAY};
use crate::domain::errors::{Boundary, ValidationError};

/// Validate a candidate business hours range against the other ranges of the
/// same calendar.
///
/// `existing` must not contain the range being updated. The first colliding
/// range (in the order given) decides which boundary is reported:
/// - the candidate starts inside it, or swallows it whole: [`Boundary::Start`]
/// - only the candidate's end reaches into it: [`Boundary::End`]
pub fn validate<'a, I>(candidate: &TimeRange, existing: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a TimeRange>,
{
    validate_bounds(candidate.start, candidate.end)?;

    for other in existing {
        if !candidate.overlaps(other) {
            continue;
        }
        let boundary = if candidate.start >= other.start || candidate.end > other.end {
            Boundary::Start
        } else {
            Boundary::End
        };
        return Err(ValidationError::Overlap { boundary });
    }

    Ok(())
}

/// Reject inverted, empty or out-of-day bounds.
pub fn validate_bounds(start: u64, end: u64) -> Result<(), ValidationError> {
    if start >= end || end > MILLIS_PER_DAY {
        return Err(ValidationError::InvalidRange { start, end });
    }
    Ok(())
}
