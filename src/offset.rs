//! Shifting reference split points onto another recording's timeline.

use crate::config::SplitPoint;
use crate::timecode::{seconds_to_time, time_to_seconds, TimecodeError};

/// Seconds to add to a reference-timeline position to land on the same
/// moment in the other file.
pub fn sync_offset(reference_sync: &str, file_sync: &str) -> Result<f64, TimecodeError> {
    Ok(time_to_seconds(file_sync)? - time_to_seconds(reference_sync)?)
}

/// Re-express `points` on the timeline of a file synced at `file_sync`.
///
/// Order and titles are preserved. Positions that would fall before the
/// start of the file are pinned to `00:00:00`.
pub fn relative_split_points(
    reference_sync: &str,
    file_sync: &str,
    points: &[SplitPoint],
) -> Result<Vec<SplitPoint>, TimecodeError> {
    let offset = sync_offset(reference_sync, file_sync)?;

    points
        .iter()
        .map(|p| -> Result<SplitPoint, TimecodeError> {
            let shifted = (time_to_seconds(&p.time)? + offset).max(0.0);
            Ok(SplitPoint::new(seconds_to_time(shifted), p.title.clone()))
        })
        .collect()
}
