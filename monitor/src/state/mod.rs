pub(crate) mod tests;
pub mod level;
pub mod parameters;

use std::sync::{Arc, Mutex, MutexGuard};

use definitions::{Parameters, TankState};

/// Clone-able handle to the shared tank snapshot. The snapshot is reporting
/// data for the display and the web API; the authoritative pump boolean lives
/// in the pump service, which is the only writer of [TankState::pump_on].
#[derive(Debug, Clone)]
pub struct StateHandler {
    state: Arc<Mutex<TankState>>,
}

fn acquire(state: &Arc<Mutex<TankState>>) -> MutexGuard<'_, TankState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

macro_rules! mutate_state {
    ($state:expr, $($($field:ident).+ = $value:expr),+ $(,)?) => {
        {
            let mut state = acquire($state);
            $(state$(.$field)+ = $value;)*
        }
    };
}

impl StateHandler {
    pub fn new(parameters: Parameters) -> StateHandler {
        StateHandler {
            state: Arc::new(Mutex::new(TankState {
                parameters,
                ..Default::default()
            })),
        }
    }

    pub fn get_state(&self) -> TankState {
        acquire(&self.state).clone()
    }

    /// Records a completed measurement cycle and clears the sensor error flag.
    pub fn record_sample(&self, distance_cm: f32, fill_percentage: f32) {
        let mut state = acquire(&self.state);
        state.distance_cm = distance_cm;
        state.fill_percentage = fill_percentage;
        state.samples += 1;
        state.errors.sensor = false;
    }

    pub fn record_sensor_error(&self) {
        mutate_state!(&self.state, errors.sensor = true);
    }

    pub fn record_display_error(&self, failed: bool) {
        mutate_state!(&self.state, errors.display = failed);
    }

    pub fn record_notification_error(&self) {
        mutate_state!(&self.state, errors.notification = true);
    }

    /// Called by the pump service right after the relay line has been driven.
    pub fn record_pump(&self, on: bool) {
        mutate_state!(&self.state, pump_on = on);
    }
}
