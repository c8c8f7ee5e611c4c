//! Write-time guard keeping a product's price schedules pairwise disjoint.
//!
//! Checks run in a fixed order and the first failing one decides the reported
//! reason. Together they reject a candidate exactly when its range shares a day
//! with some sibling's range.

use smilewidgets_core::{DateOverlapError, DateRange};

use crate::schedule::PriceSchedule;

/// Validate `candidate` against the already-stored `siblings` of the same product.
///
/// When updating a row, `siblings` must not include the row being replaced.
pub fn check_no_overlap<S: PriceSchedule>(
    siblings: &[S],
    candidate: &DateRange,
) -> Result<(), DateOverlapError> {
    let ranges = || siblings.iter().map(PriceSchedule::range);
    let start = candidate.start();

    if ranges().any(|r| r.contains(start)) {
        return Err(DateOverlapError::StartsInsideExisting);
    }

    match candidate.end() {
        Some(end) => {
            // `end` is exclusive: ending on a sibling's start is adjacency, not overlap.
            if ranges().any(|r| r.start() < end && r.end().is_none_or(|e| end <= e)) {
                return Err(DateOverlapError::PartialOverlap);
            }
            if ranges().any(|r| start <= r.start() && r.start() < end) {
                return Err(DateOverlapError::EnclosesExisting);
            }
        }
        None => {
            if ranges().any(|r| r.start() >= start) {
                return Err(DateOverlapError::OpenEndedSwallowsLater);
            }
        }
    }

    Ok(())
}
