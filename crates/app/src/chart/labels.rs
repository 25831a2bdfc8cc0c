//! Axis label thinning.

/// Label every `stride`-th point so that about `desired` labels remain.
#[must_use]
pub fn label_stride(count: usize, desired: usize) -> usize {
    count.div_ceil(desired.max(1)).max(1)
}

/// Indices of the points that get a label.
///
/// With `include_last` the final point is labelled even when the stride
/// skips it.
#[must_use]
pub fn label_indices(count: usize, desired: usize, include_last: bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).step_by(label_stride(count, desired)).collect();
    if include_last && count > 0 && indices.last() != Some(&(count - 1)) {
        indices.push(count - 1);
    }
    indices
}
