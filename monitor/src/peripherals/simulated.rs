use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;

use super::{
    DeliveryError, DisplayError, DistanceSensor, FillDisplay, Notifier, RelayError, RelayLine,
    SensorError,
};

const FILL_RATE_CM_PER_SEC: f32 = 0.5;
const DRAIN_RATE_CM_PER_SEC: f32 = 0.05;

/// Software model of the water container: the level rises while the pump is
/// on and drains slowly otherwise. Shared between the simulated sensor and
/// the simulated relay, the same way the real tank couples the real ones.
pub struct SimTank {
    container_height_cm: f32,
    fill_cm: f32,
    pump_on: bool,
    last_update: Instant,
}

impl SimTank {
    pub fn shared(container_height_cm: f32) -> Arc<Mutex<SimTank>> {
        Arc::new(Mutex::new(SimTank {
            container_height_cm,
            fill_cm: container_height_cm * 0.5,
            pump_on: false,
            last_update: Instant::now(),
        }))
    }

    fn update(&mut self) {
        let dt = self.last_update.elapsed().as_secs_f32();
        self.last_update = Instant::now();
        let rate = if self.pump_on {
            FILL_RATE_CM_PER_SEC
        } else {
            -DRAIN_RATE_CM_PER_SEC
        };
        self.fill_cm = (self.fill_cm + rate * dt).clamp(0.0, self.container_height_cm);
    }

    fn distance_cm(&mut self) -> f32 {
        self.update();
        self.container_height_cm - self.fill_cm
    }

    fn set_pump(&mut self, on: bool) {
        self.update();
        self.pump_on = on;
    }
}

pub struct SimulatedSensor {
    tank: Arc<Mutex<SimTank>>,
}

impl SimulatedSensor {
    pub fn new(tank: Arc<Mutex<SimTank>>) -> SimulatedSensor {
        SimulatedSensor { tank }
    }
}

#[async_trait]
impl DistanceSensor for SimulatedSensor {
    async fn measure(&mut self) -> Result<f32, SensorError> {
        let mut tank = self
            .tank
            .lock()
            .map_err(|e| SensorError::Read(e.to_string()))?;
        Ok(tank.distance_cm())
    }
}

/// The 128 px wide panel fits this many characters of the default font.
const DISPLAY_LINE_CHARS: usize = 21;

#[derive(Default)]
pub struct SimulatedDisplay {}

#[async_trait]
impl FillDisplay for SimulatedDisplay {
    async fn render(&mut self, text: &str) -> Result<(), DisplayError> {
        if text.chars().count() > DISPLAY_LINE_CHARS {
            return Err(DisplayError::Render(format!("text does not fit: {text:?}")));
        }
        log::debug!("[display] {text}");
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), DisplayError> {
        log::debug!("[display] cleared");
        Ok(())
    }
}

/// Writes notifications to the log instead of a push transport.
#[derive(Default)]
pub struct LogNotifier {}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, title: &str, message: &str) -> Result<(), DeliveryError> {
        // push APIs reject empty bodies, so the stand-in does too
        if message.is_empty() {
            return Err(DeliveryError::Transport("empty message".to_string()));
        }
        log::info!("Notification: {title}: {message}");
        Ok(())
    }
}

pub struct SimulatedRelay {
    tank: Arc<Mutex<SimTank>>,
}

impl SimulatedRelay {
    pub fn new(tank: Arc<Mutex<SimTank>>) -> SimulatedRelay {
        SimulatedRelay { tank }
    }
}

#[async_trait]
impl RelayLine for SimulatedRelay {
    async fn set(&mut self, on: bool) -> Result<(), RelayError> {
        let mut tank = self.tank.lock().map_err(|e| RelayError::Gpio(e.to_string()))?;
        tank.set_pump(on);
        Ok(())
    }
}
