use serde::{Deserialize, Serialize};

/// Tunable values loaded from `parameters.json` in the data directory.
/// Everything here can be adjusted without recompiling; pin assignments and
/// other wiring facts stay as constants in the monitor crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Height of the water container in centimeters, measured from the
    /// bottom to the sensor membrane.
    pub container_height_cm: f32,
    /// Fill percentage above which the pump is shut off automatically.
    pub full_threshold: f32,
    /// Delay between the end of one sampling cycle and the start of the next.
    pub sample_interval_ms: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            container_height_cm: 20.0,
            full_threshold: 95.0,
            sample_interval_ms: 2000,
        }
    }
}
