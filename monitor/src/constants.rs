use std::time::Duration;

// BCM pin numbers for the HC-SR04 ultrasonic sensor
pub const TRIG_PIN: u8 = 23;
pub const ECHO_PIN: u8 = 24;
// BCM pin driving the pump relay
pub const RELAY_PIN: u8 = 17;
// I2C address of the SSD1306 OLED
pub const OLED_ADDRESS: u8 = 0x3C;

/// Readings above this are reported as exactly this value ("no target detected").
pub const MAX_DISTANCE_CM: f32 = 400.0;

/// How long to wait for an echo before giving up on the cycle. A 400 cm
/// round trip takes about 23 ms, so anything near a second means the sensor
/// is hung, not slow.
pub const SENSOR_TIMEOUT: Duration = Duration::from_millis(1000);

pub const NOTIFICATION_TITLE: &str = "Monitor de Nivel de Agua";
pub const FULL_TANK_MESSAGE: &str =
    "¡El recipiente está lleno! La bomba se ha apagado automáticamente.";
