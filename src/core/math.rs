// Math utilities and helper functions

/// Direction (+1/-1) of an axis reading, or `fallback` when the axis is
/// exactly neutral
///
/// Only an exact 0.0 counts as neutral; any deflection, however small,
/// picks its sign.
pub fn direction_or(axis: f32, fallback: f32) -> f32 {
    if axis == 0.0 {
        fallback
    } else {
        axis.signum()
    }
}

/// Check if an axis reading points the opposite way to `facing`
pub fn opposes(axis: f32, facing: f32) -> bool {
    axis != 0.0 && axis.signum() != facing.signum()
}
