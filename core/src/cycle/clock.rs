use crate::prelude::{Phase, PhaseResult, SignalResult};
use crate::site::SignalSite;
use chrono::{DateTime, Utc};

/// Resolves the phase shown by `site` at `query` and the whole seconds left in it.
///
/// Before the site's reference instant the signal reads RED, counting down to
/// the reference. From the reference onward the cycle repeats YELLOW, RED,
/// GREEN with YELLOW starting at offset zero.
pub fn evaluate(site: &SignalSite, query: DateTime<Utc>) -> SignalResult<PhaseResult> {
    if query < site.reference() {
        let gap_ms = site.reference().signed_duration_since(query).num_milliseconds();
        return Ok(PhaseResult::new(Phase::Red, gap_ms.unsigned_abs() / 1000));
    }

    // Non-negative here, so truncation toward zero is a floor.
    let elapsed_ms = query
        .signed_duration_since(site.reference())
        .num_milliseconds();
    let cycle_ms = site.durations().cycle_length()? * 1000;
    let position = (elapsed_ms.unsigned_abs() % cycle_ms) / 1000;
    site.durations().locate(position)
}
