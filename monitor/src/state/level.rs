use crate::constants::MAX_DISTANCE_CM;

/// Clamps a raw sensor reading to `[0, MAX_DISTANCE_CM]`. The HC-SR04
/// reports nonsense beyond four meters, so the ceiling doubles as the
/// "no target detected" sentinel.
pub fn clamp_distance(raw_cm: f32) -> f32 {
    raw_cm.clamp(0.0, MAX_DISTANCE_CM)
}

/// Converts a distance to a fill percentage, assuming the sensor sits at the
/// top of the container pointing down: 100% at distance zero, 0% at the full
/// container height, linear in between.
pub fn fill_percentage(distance_cm: f32, container_height_cm: f32) -> f32 {
    if distance_cm >= container_height_cm {
        0.0
    } else if distance_cm <= 0.0 {
        100.0
    } else {
        100.0 * (1.0 - distance_cm / container_height_cm)
    }
}
