//! Application state shared by request handlers.

use std::sync::Mutex;

use coresense_sensors::{Result, SensorReader};

/// Shared handler state owning the sensor readers.
///
/// Sampling is serialized behind a mutex: the CPU sensor keeps a snapshot
/// baseline between requests. The lock is held only for the two sensor
/// reads; each request assembles its own response values.
pub struct AppState {
    sensors: Mutex<Box<dyn SensorReader>>,
}

impl AppState {
    /// Creates state around any sensor reader implementation.
    pub fn new(sensors: Box<dyn SensorReader>) -> Self {
        Self {
            sensors: Mutex::new(sensors),
        }
    }

    /// Samples CPU utilization followed by the temperature group.
    pub fn sample(&self) -> Result<(f64, Vec<i64>)> {
        let mut sensors = self.sensors.lock().unwrap();
        let cpu = sensors.sample_cpu_percent();
        let temperatures = sensors.sample_temperatures()?;
        Ok((cpu, temperatures))
    }
}
