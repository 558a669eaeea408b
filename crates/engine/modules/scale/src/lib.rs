//! Nearest-size matching against a designer-approved pixel scale.
//!
//! The matcher only ever sees non-negative magnitudes; sign handling (and the
//! tie-direction inversion for negative source values) is the caller's job.

#![forbid(unsafe_code)]

/// Find the element of `allowed` closest to `target`.
///
/// When two candidates are equidistant the larger wins if `tie_break_up`,
/// otherwise the smaller. The result does not depend on the order of
/// `allowed`.
///
/// Returns `None` only for an empty `allowed` set, which is a configuration
/// error the caller must report rather than default away.
pub fn closest(allowed: &[f64], target: f64, tie_break_up: bool) -> Option<f64> {
    let mut candidates = allowed.iter().copied();
    let mut best = candidates.next()?;
    for candidate in candidates {
        let best_distance = (best - target).abs();
        let candidate_distance = (candidate - target).abs();
        if candidate_distance < best_distance {
            best = candidate;
        } else if candidate_distance == best_distance {
            let wins = if tie_break_up { candidate > best } else { candidate < best };
            if wins {
                best = candidate;
            }
        }
    }
    Some(best)
}
