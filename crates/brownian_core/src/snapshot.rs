//! Validation of the step numbers a caller wants plotted.

use crate::error::{ManifoldError, Result};

pub const MAX_SNAPSHOTS: usize = 4;

/// Resolves requested snapshot steps against a walk of `n_steps` steps.
///
/// An empty request means a single snapshot of the whole walk. Steps are
/// one-based: step `k` shows the first `k` points.
pub fn resolve_snapshots(requested: &[usize], n_steps: usize) -> Result<Vec<usize>> {
    if requested.is_empty() {
        return Ok(vec![n_steps]);
    }
    if requested.len() > MAX_SNAPSHOTS {
        return Err(ManifoldError::InvalidSnapshot(format!(
            "can only plot up to {MAX_SNAPSHOTS} snapshots!"
        )));
    }
    if requested.iter().any(|&step| step > n_steps) {
        return Err(ManifoldError::InvalidSnapshot(format!(
            "you chose step(s) > {n_steps} (the total steps)"
        )));
    }
    if requested.contains(&0) {
        return Err(ManifoldError::InvalidSnapshot(
            "you chose one or more invalid step(s) to plot".into(),
        ));
    }
    Ok(requested.to_vec())
}
