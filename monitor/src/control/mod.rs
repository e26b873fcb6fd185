
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

use crate::constants::{FULL_TANK_MESSAGE, NOTIFICATION_TITLE, SENSOR_TIMEOUT};
use crate::peripherals::{DistanceSensor, FillDisplay, Notifier, SensorError};
use crate::pump::PumpHandler;
use crate::state::level::{clamp_distance, fill_percentage};
use crate::state::StateHandler;

/// The automatic controller: measures, estimates, renders and applies the
/// full-container shutoff policy on a fixed cadence, until stopped.
///
/// The cadence is a fixed delay between the end of one cycle and the start of
/// the next, not a fixed wall-clock rate: a slow sensor stretches the period
/// instead of piling up cycles.
pub struct LevelMonitor {
    sensor: Box<dyn DistanceSensor>,
    display: Box<dyn FillDisplay>,
    notifier: Box<dyn Notifier>,
    state_handler: StateHandler,
    pump_handler: PumpHandler,
    stop: watch::Receiver<bool>,
}

impl LevelMonitor {
    /// Returns the monitor and the sender that stops it. Sending `true`
    /// makes the loop exit at the next cycle boundary and run its teardown.
    pub fn new(
        sensor: Box<dyn DistanceSensor>,
        display: Box<dyn FillDisplay>,
        notifier: Box<dyn Notifier>,
        state_handler: StateHandler,
        pump_handler: PumpHandler,
    ) -> (LevelMonitor, watch::Sender<bool>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        (
            LevelMonitor {
                sensor,
                display,
                notifier,
                state_handler,
                pump_handler,
                stop: stop_rx,
            },
            stop_tx,
        )
    }

    pub async fn run(mut self) {
        loop {
            self.run_cycle().await;

            let interval = Duration::from_millis(
                self.state_handler.get_state().parameters.sample_interval_ms,
            );
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = self.stop.changed() => {}
            }
            if *self.stop.borrow() {
                break;
            }
        }
        self.teardown().await;
    }

    async fn run_cycle(&mut self) {
        let parameters = self.state_handler.get_state().parameters;

        let raw = match timeout(SENSOR_TIMEOUT, self.sensor.measure()).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                log::warn!("Sensor read failed, skipping this cycle: {e}");
                self.state_handler.record_sensor_error();
                return;
            }
            Err(_) => {
                log::warn!(
                    "Sensor read failed, skipping this cycle: {}",
                    SensorError::Timeout
                );
                self.state_handler.record_sensor_error();
                return;
            }
        };

        let distance = clamp_distance(raw);
        let fill = fill_percentage(distance, parameters.container_height_cm);
        self.state_handler.record_sample(distance, fill);
        log::debug!("Distance {distance:.2} cm, fill {fill:.1}%");

        match self.display.render(&format!("Nivel: {fill:.1}%")).await {
            Ok(()) => self.state_handler.record_display_error(false),
            Err(e) => {
                log::warn!("Could not render the fill level: {e}");
                self.state_handler.record_display_error(true);
            }
        }

        if fill > parameters.full_threshold {
            self.auto_shutoff().await;
        }
    }

    /// Shuts the pump off when the container is full. The notification is
    /// sent only when the pump service reports an actual on-to-off
    /// transition, so a level that stays above the threshold does not notify
    /// again on every cycle.
    async fn auto_shutoff(&mut self) {
        match self.pump_handler.shutoff_if_on().await {
            Ok(true) => {
                log::info!("Container full, pump shut off automatically");
                if let Err(e) = self
                    .notifier
                    .send(NOTIFICATION_TITLE, FULL_TANK_MESSAGE)
                    .await
                {
                    log::error!("Could not deliver the full-container notification: {e}");
                    self.state_handler.record_notification_error();
                }
            }
            Ok(false) => {}
            Err(e) => log::error!("Could not apply the automatic shutoff: {e}"),
        }
    }

    /// Releases the hardware on every exit path: pump off, display blank.
    async fn teardown(&mut self) {
        if let Err(e) = self.pump_handler.set(false).await {
            log::error!("Could not turn the pump off during shutdown: {e}");
        }
        if let Err(e) = self.display.clear().await {
            log::error!("Could not clear the display during shutdown: {e}");
        }
    }
}
