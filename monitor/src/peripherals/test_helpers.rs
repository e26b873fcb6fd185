#![cfg(test)]

use std::collections::VecDeque;
use std::future::pending;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{
    DeliveryError, DisplayError, DistanceSensor, FillDisplay, Notifier, RelayError, RelayLine,
    SensorError,
};

/// Replays a scripted list of sensor results, then keeps repeating the last
/// one once the script runs out.
pub struct ScriptedSensor {
    readings: VecDeque<Result<f32, SensorError>>,
    last: Result<f32, SensorError>,
}

impl ScriptedSensor {
    pub fn new<I>(readings: I) -> ScriptedSensor
    where
        I: IntoIterator<Item = Result<f32, SensorError>>,
    {
        ScriptedSensor {
            readings: readings.into_iter().collect(),
            last: Ok(0.0),
        }
    }
}

#[async_trait]
impl DistanceSensor for ScriptedSensor {
    async fn measure(&mut self) -> Result<f32, SensorError> {
        match self.readings.pop_front() {
            Some(reading) => {
                self.last = reading.clone();
                reading
            }
            None => self.last.clone(),
        }
    }
}

/// A sensor that never produces an echo, to exercise the timeout path.
pub struct HangingSensor;

#[async_trait]
impl DistanceSensor for HangingSensor {
    async fn measure(&mut self) -> Result<f32, SensorError> {
        pending().await
    }
}

#[derive(Debug, Default)]
pub struct RelayRecord {
    /// Current physical line level.
    pub on: bool,
    /// Every level ever driven, including re-assertions of the same level.
    pub assertions: Vec<bool>,
}

pub struct RecordingRelay {
    record: Arc<Mutex<RelayRecord>>,
}

impl RecordingRelay {
    pub fn new(record: Arc<Mutex<RelayRecord>>) -> RecordingRelay {
        RecordingRelay { record }
    }
}

#[async_trait]
impl RelayLine for RecordingRelay {
    async fn set(&mut self, on: bool) -> Result<(), RelayError> {
        let mut record = self.record.lock().unwrap();
        record.on = on;
        record.assertions.push(on);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub rendered: Arc<Mutex<Vec<String>>>,
    pub cleared: Arc<Mutex<bool>>,
}

#[async_trait]
impl FillDisplay for RecordingDisplay {
    async fn render(&mut self, text: &str) -> Result<(), DisplayError> {
        self.rendered.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), DisplayError> {
        *self.cleared.lock().unwrap() = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, _title: &str, message: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// A notifier whose transport is always down.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _title: &str, _message: &str) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("connection refused".to_string()))
    }
}
