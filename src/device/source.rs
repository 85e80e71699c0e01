//! Device reading sources
//!
//! `MockDeviceSource` synthesizes a plausible day of readings for each
//! appliance in a catalog. `JsonFileSource` loads a device set exported by a
//! telemetry adapter in the same shape.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::types::*;
use crate::errors::SourceError;

/// Probability of an appliance that is not on being in standby instead of off.
const STANDBY_CHANCE: f64 = 0.5;
/// Fraction of the base wattage drawn in standby.
const STANDBY_FACTOR: f64 = 0.05;
/// Spread of the instantaneous draw around the base wattage (+/- 10%).
const WATTAGE_VARIANCE: f64 = 0.1;
/// Spread of the hourly usage around the base wattage (+/- 25%).
const HOURLY_VARIANCE: f64 = 0.25;
const PEAK_HOUR_FACTOR: f64 = 1.5;
const OFF_PEAK_HOUR_FACTOR: f64 = 0.5;

/// Anything that can produce the current device set.
pub trait DeviceSource {
    fn read_devices(&mut self) -> Result<Vec<Device>, SourceError>;
}

/// Evening and night hours (before 08:00 and after 18:00) see more use.
pub fn is_peak_hour(hour: usize) -> bool {
    hour > 18 || hour < 8
}

/// Uniform draw in `base +/- base * variance`.
fn vary(rng: &mut impl Rng, base: f64, variance: f64) -> f64 {
    base + (rng.random::<f64>() * base * variance * 2.0 - base * variance)
}

fn generate_device(profile: &ApplianceProfile, rng: &mut impl Rng) -> Device {
    let status = if rng.random::<f64>() < profile.on_chance {
        DeviceStatus::On
    } else if rng.random::<f64>() < STANDBY_CHANCE {
        DeviceStatus::Standby
    } else {
        DeviceStatus::Off
    };

    let current_wattage = match status {
        DeviceStatus::On => vary(rng, profile.base_wattage, WATTAGE_VARIANCE),
        DeviceStatus::Standby => profile.base_wattage * STANDBY_FACTOR,
        DeviceStatus::Off => 0.0,
    };

    let hourly_history_kwh: Vec<f64> = (0..HOURS_PER_DAY)
        .map(|hour| {
            let factor = if is_peak_hour(hour) {
                PEAK_HOUR_FACTOR
            } else {
                OFF_PEAK_HOUR_FACTOR
            };
            if rng.random::<f64>() < profile.on_chance * factor {
                let usage = vary(rng, profile.base_wattage, HOURLY_VARIANCE);
                round(usage / 1000.0, 3)
            } else {
                0.0
            }
        })
        .collect();

    let today_kwh = round(hourly_history_kwh.iter().sum(), 2);
    let device_id =
        DeviceId::from_uuid(uuid::Builder::from_random_bytes(rng.random()).into_uuid());

    debug!(
        "Generated {} ({}): status={} wattage={:.2}W today={:.2}kWh",
        profile.name, device_id, status, current_wattage, today_kwh
    );

    Device {
        device_id,
        device_name: profile.name.clone(),
        status,
        current_wattage: round(current_wattage, 2),
        today_kwh,
        hourly_history_kwh,
        icon: profile.icon,
    }
}

/// Synthesizes readings for a fixed appliance catalog
pub struct MockDeviceSource {
    profiles: Vec<ApplianceProfile>,
    rng: StdRng,
}

impl MockDeviceSource {
    /// Create a source over `profiles`.
    ///
    /// With a `seed` every read sequence is reproducible, device ids included.
    ///
    /// # Errors
    /// Returns error if any profile is invalid
    pub fn new(profiles: Vec<ApplianceProfile>, seed: Option<u64>) -> Result<Self, SourceError> {
        for profile in &profiles {
            profile.validate()?;
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self { profiles, rng })
    }

    pub fn profiles(&self) -> &[ApplianceProfile] {
        &self.profiles
    }
}

impl DeviceSource for MockDeviceSource {
    fn read_devices(&mut self) -> Result<Vec<Device>, SourceError> {
        let devices: Vec<Device> = self
            .profiles
            .iter()
            .map(|profile| generate_device(profile, &mut self.rng))
            .collect();

        info!("Generated mock readings for {} device(s)", devices.len());
        Ok(devices)
    }
}

/// Loads a device set from a JSON file
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse and validate a JSON array of devices.
    pub fn parse(contents: &str) -> Result<Vec<Device>, SourceError> {
        let devices: Vec<Device> =
            serde_json::from_str(contents).map_err(|e| SourceError::ParseError(e.to_string()))?;

        for device in &devices {
            device.validate_readings()?;
        }

        Ok(devices)
    }
}

impl DeviceSource for JsonFileSource {
    fn read_devices(&mut self) -> Result<Vec<Device>, SourceError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| SourceError::ReadFailed {
            path: self.path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;

        let devices = Self::parse(&contents)?;
        info!(
            "Loaded {} device(s) from {}",
            devices.len(),
            self.path.display()
        );
        Ok(devices)
    }
}
