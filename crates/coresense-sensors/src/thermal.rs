//! Core temperature sensor group.
//!
//! Reads the temperature channels of a single hwmon chip, identified by its
//! name attribute (e.g. `coretemp` for Intel package/core sensors).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Result};

/// Default sysfs root of the hardware monitoring class.
const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Default chip name for per-core CPU temperatures.
pub const DEFAULT_CHIP: &str = "coretemp";

/// One temperature channel of a chip.
struct Channel {
    label: String,
    index: u32,
    degrees: i64,
}

/// Temperature sensor group reader backed by the hwmon sysfs tree.
pub struct TemperatureSensor {
    root: PathBuf,
    chip: String,
}

impl TemperatureSensor {
    /// Creates a reader for the named chip under /sys/class/hwmon.
    pub fn new(chip: &str) -> Self {
        Self::with_root(HWMON_ROOT, chip)
    }

    /// Creates a reader scanning an alternate sysfs root.
    pub fn with_root<P: AsRef<Path>>(root: P, chip: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            chip: chip.to_string(),
        }
    }

    /// Returns the configured chip name.
    pub fn chip(&self) -> &str {
        &self.chip
    }

    /// Reads every temperature channel of the chip, ordered by label.
    ///
    /// Values are truncated to whole degrees Celsius. Label ties are broken
    /// by channel index so the ordering is stable across reads.
    pub fn sample(&self) -> Result<Vec<i64>> {
        let chip_dir = self.find_chip()?;
        let mut channels = read_channels(&chip_dir)?;
        channels.sort_by(|a, b| a.label.cmp(&b.label).then(a.index.cmp(&b.index)));
        Ok(channels.into_iter().map(|c| c.degrees).collect())
    }

    /// Locates the hwmon directory whose name attribute matches the chip.
    fn find_chip(&self) -> Result<PathBuf> {
        let entries = fs::read_dir(&self.root)
            .map_err(|_| Error::SensorUnavailable(self.chip.clone()))?;

        for entry in entries.flatten() {
            let dir = entry.path();
            let Ok(name) = fs::read_to_string(dir.join("name")) else {
                continue;
            };
            if name.trim() == self.chip {
                debug!("Found sensor group '{}' at {}", self.chip, dir.display());
                return Ok(dir);
            }
        }

        Err(Error::SensorUnavailable(self.chip.clone()))
    }
}

/// Reads all temp<N>_input channels in a chip directory.
fn read_channels(dir: &Path) -> Result<Vec<Channel>> {
    let mut channels = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(index) = channel_index(&file_name.to_string_lossy()) else {
            continue;
        };

        let path = entry.path();
        let raw = fs::read_to_string(&path)?;
        let millidegrees: i64 = raw.trim().parse().map_err(|_| Error::Malformed {
            path: path.display().to_string(),
            value: raw.trim().to_string(),
        })?;

        // Label file is optional; unlabeled channels sort first.
        let label = fs::read_to_string(dir.join(format!("temp{index}_label")))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        channels.push(Channel {
            label,
            index,
            degrees: millidegrees / 1000,
        });
    }

    Ok(channels)
}

/// Extracts N from a file named temp<N>_input.
fn channel_index(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("temp")?
        .strip_suffix("_input")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn chip_dir(root: &TempDir, hwmon: &str, name: &str) -> PathBuf {
        let dir = root.path().join(hwmon);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("name"), format!("{name}\n")).unwrap();
        dir
    }

    fn channel(dir: &Path, index: u32, label: &str, millidegrees: i64) {
        fs::write(dir.join(format!("temp{index}_input")), format!("{millidegrees}\n")).unwrap();
        fs::write(dir.join(format!("temp{index}_label")), format!("{label}\n")).unwrap();
    }

    #[test]
    fn test_channel_index() {
        assert_eq!(channel_index("temp1_input"), Some(1));
        assert_eq!(channel_index("temp12_input"), Some(12));
        assert_eq!(channel_index("temp1_label"), None);
        assert_eq!(channel_index("temp_input"), None);
        assert_eq!(channel_index("fan1_input"), None);
    }

    #[test]
    fn test_sample_sorts_by_label_and_truncates() {
        let root = TempDir::new().unwrap();
        let dir = chip_dir(&root, "hwmon1", "coretemp");
        // Channel order on disk differs from label order
        channel(&dir, 1, "Package id 0", 45900);
        channel(&dir, 2, "Core 0", 44200);
        channel(&dir, 3, "Core 1", 50900);

        let sensor = TemperatureSensor::with_root(root.path(), "coretemp");
        assert_eq!(sensor.sample().unwrap(), vec![44, 50, 45]);
    }

    #[test]
    fn test_other_chips_are_ignored() {
        let root = TempDir::new().unwrap();
        let nvme = chip_dir(&root, "hwmon0", "nvme");
        channel(&nvme, 1, "Composite", 31800);
        let cpu = chip_dir(&root, "hwmon1", "coretemp");
        channel(&cpu, 1, "Core 0", 41000);

        let sensor = TemperatureSensor::with_root(root.path(), "coretemp");
        assert_eq!(sensor.sample().unwrap(), vec![41]);
    }

    #[test]
    fn test_missing_group_is_unavailable() {
        let root = TempDir::new().unwrap();
        chip_dir(&root, "hwmon0", "nvme");

        let sensor = TemperatureSensor::with_root(root.path(), "coretemp");
        assert!(matches!(
            sensor.sample(),
            Err(Error::SensorUnavailable(chip)) if chip == "coretemp"
        ));
    }

    #[test]
    fn test_missing_root_is_unavailable() {
        let root = TempDir::new().unwrap();
        let sensor =
            TemperatureSensor::with_root(root.path().join("does-not-exist"), "coretemp");
        assert!(matches!(sensor.sample(), Err(Error::SensorUnavailable(_))));
    }

    #[test]
    fn test_empty_group_yields_no_readings() {
        let root = TempDir::new().unwrap();
        chip_dir(&root, "hwmon1", "coretemp");

        let sensor = TemperatureSensor::with_root(root.path(), "coretemp");
        assert_eq!(sensor.sample().unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_unlabeled_channel_sorts_first() {
        let root = TempDir::new().unwrap();
        let dir = chip_dir(&root, "hwmon1", "coretemp");
        channel(&dir, 1, "Core 0", 44000);
        fs::write(dir.join("temp2_input"), "39000\n").unwrap();

        let sensor = TemperatureSensor::with_root(root.path(), "coretemp");
        assert_eq!(sensor.sample().unwrap(), vec![39, 44]);
    }

    #[test]
    fn test_negative_reading_truncates_toward_zero() {
        let root = TempDir::new().unwrap();
        let dir = chip_dir(&root, "hwmon1", "coretemp");
        channel(&dir, 1, "Core 0", -500);

        let sensor = TemperatureSensor::with_root(root.path(), "coretemp");
        assert_eq!(sensor.sample().unwrap(), vec![0]);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let root = TempDir::new().unwrap();
        let dir = chip_dir(&root, "hwmon1", "coretemp");
        fs::write(dir.join("temp1_input"), "garbage\n").unwrap();

        let sensor = TemperatureSensor::with_root(root.path(), "coretemp");
        assert!(matches!(sensor.sample(), Err(Error::Malformed { .. })));
    }
}
