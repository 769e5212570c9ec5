//! Coresense Sensor Library
//!
//! Reads CPU utilization and per-core temperatures from the Linux kernel's
//! /proc and hwmon sysfs interfaces.

pub mod cpu;
pub mod error;
pub mod thermal;

pub use cpu::CpuSensor;
pub use error::{Error, Result};
pub use thermal::{TemperatureSensor, DEFAULT_CHIP};

/// Interface over the host's hardware monitoring counters.
///
/// The daemon consumes sensors only through this trait, so tests can
/// substitute a scripted implementation.
pub trait SensorReader: Send {
    /// Instantaneous CPU utilization as a percentage in [0, 100].
    fn sample_cpu_percent(&mut self) -> f64;

    /// Current reading of every sensor in the temperature group, in whole
    /// degrees Celsius, ordered by sensor label.
    fn sample_temperatures(&mut self) -> Result<Vec<i64>>;
}

/// Sensor readers backed by the live operating system.
pub struct SystemSensors {
    cpu: CpuSensor,
    temperature: TemperatureSensor,
}

impl SystemSensors {
    /// Creates live sensors for the given hwmon chip name.
    pub fn new(chip: &str) -> Self {
        Self {
            cpu: CpuSensor::new(),
            temperature: TemperatureSensor::new(chip),
        }
    }
}

impl SensorReader for SystemSensors {
    fn sample_cpu_percent(&mut self) -> f64 {
        self.cpu.sample_percent()
    }

    fn sample_temperatures(&mut self) -> Result<Vec<i64>> {
        self.temperature.sample()
    }
}
