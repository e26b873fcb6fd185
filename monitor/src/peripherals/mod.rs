pub mod simulated;
pub(crate) mod test_helpers;

use std::fmt;
use std::process::exit;

use async_trait::async_trait;

use crate::constants::{ECHO_PIN, OLED_ADDRESS, RELAY_PIN, TRIG_PIN};

use self::simulated::{LogNotifier, SimTank, SimulatedDisplay, SimulatedRelay, SimulatedSensor};

/// Measures the distance from the sensor membrane down to the water surface.
#[async_trait]
pub trait DistanceSensor: Send {
    /// Returns the raw measured distance in centimeters, not yet clamped.
    async fn measure(&mut self) -> Result<f32, SensorError>;
}

/// The small status display mounted next to the container.
#[async_trait]
pub trait FillDisplay: Send {
    async fn render(&mut self, text: &str) -> Result<(), DisplayError>;
    /// Blanks the display. Called on shutdown.
    async fn clear(&mut self) -> Result<(), DisplayError>;
}

/// Push-notification transport. Delivery failures are reported, never fatal.
#[async_trait]
pub trait Notifier: Send {
    async fn send(&self, title: &str, message: &str) -> Result<(), DeliveryError>;
}

/// The physical relay line powering the pump. Implementations only drive the
/// output; all state bookkeeping lives in the pump service.
#[async_trait]
pub trait RelayLine: Send {
    async fn set(&mut self, on: bool) -> Result<(), RelayError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensorError {
    /// No echo arrived within the configured timeout.
    Timeout,
    Read(String),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Timeout => write!(f, "no echo received before the timeout"),
            SensorError::Read(e) => write!(f, "sensor read error: {e}"),
        }
    }
}

impl std::error::Error for SensorError {}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayError {
    Render(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Render(e) => write!(f, "display error: {e}"),
        }
    }
}

impl std::error::Error for DisplayError {}

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryError {
    Transport(String),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Transport(e) => write!(f, "notification transport error: {e}"),
        }
    }
}

impl std::error::Error for DeliveryError {}

#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    Gpio(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Gpio(e) => write!(f, "relay GPIO error: {e}"),
        }
    }
}

impl std::error::Error for RelayError {}

/// The full set of collaborators the monitor talks to.
pub struct Peripherals {
    pub sensor: Box<dyn DistanceSensor>,
    pub display: Box<dyn FillDisplay>,
    pub notifier: Box<dyn Notifier>,
    pub relay: Box<dyn RelayLine>,
}

#[derive(Debug, Clone)]
pub enum PeripheralsChoice {
    Simulated,
    Gpio,
}

impl PeripheralsChoice {
    pub fn parse(s: &str) -> Result<PeripheralsChoice, String> {
        match s {
            "simulated" => Ok(PeripheralsChoice::Simulated),
            "gpio" => Ok(PeripheralsChoice::Gpio),
            _ => Err(format!("unknown peripherals choice: {s}")),
        }
    }

    pub fn build(&self, container_height_cm: f32) -> Peripherals {
        match self {
            PeripheralsChoice::Simulated => Self::build_simulated(container_height_cm),
            PeripheralsChoice::Gpio => Self::build_gpio(),
        }
    }

    fn build_simulated(container_height_cm: f32) -> Peripherals {
        let tank = SimTank::shared(container_height_cm);
        Peripherals {
            sensor: Box::new(SimulatedSensor::new(tank.clone())),
            display: Box::new(SimulatedDisplay::default()),
            notifier: Box::new(LogNotifier::default()),
            relay: Box::new(SimulatedRelay::new(tank)),
        }
    }

    fn build_gpio() -> Peripherals {
        eprintln!(
            "GPIO peripherals (trigger={TRIG_PIN}, echo={ECHO_PIN}, relay={RELAY_PIN}, \
             display=0x{OLED_ADDRESS:02X}) are not implemented yet, \
             pass parameter `--peripherals=simulated` for now"
        );
        exit(1);
    }
}
