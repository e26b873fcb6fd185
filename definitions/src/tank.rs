use serde::{Deserialize, Serialize};

use crate::Parameters;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TankState {
    /// The tunable configuration the monitor is currently running with.
    pub parameters: Parameters,
    /// The last distance measured by the ultrasonic sensor, in centimeters,
    /// already clamped to the sensor's maximum range. The sensor points down
    /// from the top of the container, so a small distance means a full tank.
    pub distance_cm: f32,
    /// How full the monitored container is, in `[0, 100]`. Derived from
    /// [TankState::distance_cm] and the configured container height.
    pub fill_percentage: f32,
    /// Whether the pump relay is currently driven on. Written only by the
    /// pump service, right after the relay line has been set, so this never
    /// disagrees with the physical output.
    pub pump_on: bool,
    /// Number of completed sampling cycles since startup.
    pub samples: u64,
    /// Whether there was an error talking to any collaborator.
    pub errors: Errors,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Errors {
    /// Did the last distance measurement fail or time out?
    pub sensor: bool,
    /// Was there an error rendering to the display?
    pub display: bool,
    /// Was there an error delivering a notification?
    pub notification: bool,
}
