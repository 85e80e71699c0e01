//! Data types for monitored appliances
//!
//! Field names serialize in the camelCase shape the dashboard frontend and
//! telemetry adapters exchange (`deviceId`, `todayKWh`, ...).

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SourceError;

/// Number of hourly slots in a device history.
pub const HOURS_PER_DAY: usize = 24;

pub(crate) fn round(value: f64, decimals: i32) -> f64 {
    let multiplier = 10_f64.powi(decimals);
    (value * multiplier).round() / multiplier
}

/// Opaque device identifier, stable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    On,
    Off,
    Standby,
}

impl DeviceStatus {
    pub fn is_on(&self) -> bool {
        matches!(self, DeviceStatus::On)
    }

    /// Status after a user toggle.
    ///
    /// `On` becomes `Off`; `Off` and `Standby` both become `On`. There is no
    /// transition into `Standby`.
    pub fn toggled(&self) -> Self {
        match self {
            DeviceStatus::On => DeviceStatus::Off,
            DeviceStatus::Off | DeviceStatus::Standby => DeviceStatus::On,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::On => "on",
            DeviceStatus::Off => "off",
            DeviceStatus::Standby => "standby",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Icon vocabulary understood by renderers.
///
/// Unrecognized keys, and values that are not strings at all, map to
/// `Unknown` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceIcon {
    Refrigerator,
    Ac,
    WashingMachine,
    Tv,
    Lightbulb,
    Computer,
    Charger,
    #[default]
    Unknown,
}

impl DeviceIcon {
    pub fn from_key(key: &str) -> Self {
        match key {
            "refrigerator" => DeviceIcon::Refrigerator,
            "ac" => DeviceIcon::Ac,
            "washing-machine" => DeviceIcon::WashingMachine,
            "tv" => DeviceIcon::Tv,
            "lightbulb" => DeviceIcon::Lightbulb,
            "computer" => DeviceIcon::Computer,
            "charger" => DeviceIcon::Charger,
            _ => DeviceIcon::Unknown,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DeviceIcon::Refrigerator => "refrigerator",
            DeviceIcon::Ac => "ac",
            DeviceIcon::WashingMachine => "washing-machine",
            DeviceIcon::Tv => "tv",
            DeviceIcon::Lightbulb => "lightbulb",
            DeviceIcon::Computer => "computer",
            DeviceIcon::Charger => "charger",
            DeviceIcon::Unknown => "unknown",
        }
    }
}

struct IconVisitor;

impl<'de> Visitor<'de> for IconVisitor {
    type Value = DeviceIcon;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("an icon key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DeviceIcon, E> {
        Ok(DeviceIcon::from_key(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<DeviceIcon, E> {
        Ok(DeviceIcon::Unknown)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<DeviceIcon, E> {
        Ok(DeviceIcon::Unknown)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<DeviceIcon, E> {
        Ok(DeviceIcon::Unknown)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<DeviceIcon, E> {
        Ok(DeviceIcon::Unknown)
    }

    fn visit_unit<E: de::Error>(self) -> Result<DeviceIcon, E> {
        Ok(DeviceIcon::Unknown)
    }

    fn visit_none<E: de::Error>(self) -> Result<DeviceIcon, E> {
        Ok(DeviceIcon::Unknown)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<DeviceIcon, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DeviceIcon, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(DeviceIcon::Unknown)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DeviceIcon, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(DeviceIcon::Unknown)
    }
}

impl<'de> Deserialize<'de> for DeviceIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IconVisitor)
    }
}

/// One monitored appliance and its readings for the current day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: DeviceId,
    pub device_name: String,
    pub status: DeviceStatus,
    pub current_wattage: f64, // W
    #[serde(rename = "todayKWh")]
    pub today_kwh: f64, // kWh, fixed at creation
    /// Energy per hour of day, index = hour. Not guaranteed to hold 24 slots.
    #[serde(rename = "hourlyHistoryKWh")]
    pub hourly_history_kwh: Vec<f64>, // kWh
    #[serde(default)]
    pub icon: DeviceIcon,
}

impl Device {
    /// Whether this device's wattage counts towards the current draw.
    pub fn is_contributing(&self) -> bool {
        self.status.is_on()
    }

    /// Reject readings no meter can produce: negative or non-finite values.
    pub fn validate_readings(&self) -> Result<(), SourceError> {
        let invalid = |reason: String| SourceError::InvalidReading {
            device: self.device_name.clone(),
            reason,
        };

        if !self.current_wattage.is_finite() || self.current_wattage < 0.0 {
            return Err(invalid(format!(
                "currentWattage must be a non-negative number, got {}",
                self.current_wattage
            )));
        }
        if !self.today_kwh.is_finite() || self.today_kwh < 0.0 {
            return Err(invalid(format!(
                "todayKWh must be a non-negative number, got {}",
                self.today_kwh
            )));
        }
        if let Some((hour, value)) = self
            .hourly_history_kwh
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(invalid(format!(
                "hourlyHistoryKWh[{}] must be a non-negative number, got {}",
                hour, value
            )));
        }
        Ok(())
    }
}

/// Appliance type known to the mock source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceProfile {
    pub name: String,
    pub base_wattage: f64, // W
    /// Probability of the appliance being on at any moment (0..=1)
    pub on_chance: f64,
    #[serde(default)]
    pub icon: DeviceIcon,
}

impl ApplianceProfile {
    pub fn new(
        name: impl Into<String>,
        base_wattage: f64,
        on_chance: f64,
        icon: DeviceIcon,
    ) -> Self {
        Self {
            name: name.into(),
            base_wattage,
            on_chance,
            icon,
        }
    }

    pub fn validate(&self) -> Result<(), SourceError> {
        let invalid = |reason: &str| SourceError::InvalidProfile {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !self.base_wattage.is_finite() || self.base_wattage < 0.0 {
            return Err(invalid("base_wattage must be a non-negative number"));
        }
        if !(0.0..=1.0).contains(&self.on_chance) {
            return Err(invalid("on_chance must be within 0 and 1"));
        }
        Ok(())
    }
}

/// The household appliances the mock dashboard ships with.
pub fn default_catalog() -> Vec<ApplianceProfile> {
    vec![
        ApplianceProfile::new("Refrigerador", 150.0, 0.95, DeviceIcon::Refrigerator),
        ApplianceProfile::new("Aire Acondicionado", 1500.0, 0.2, DeviceIcon::Ac),
        ApplianceProfile::new("Lavadora", 500.0, 0.05, DeviceIcon::WashingMachine),
        ApplianceProfile::new("Televisor Living", 150.0, 0.4, DeviceIcon::Tv),
        ApplianceProfile::new("Luces Cocina", 60.0, 0.5, DeviceIcon::Lightbulb),
        ApplianceProfile::new("Computador Oficina", 300.0, 0.6, DeviceIcon::Computer),
        ApplianceProfile::new("Cargador Celular", 10.0, 0.8, DeviceIcon::Charger),
    ]
}
