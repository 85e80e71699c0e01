use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceId};

/// Short day-month-year form used for every rendered date.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Peak label when there is no data to pick an hour from.
pub const NO_PEAK_LABEL: &str = "N/A";

mod short_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Total consumption of all devices during one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionDataPoint {
    /// "HH:00"
    pub time: String,
    /// Day the series was computed on
    #[serde(with = "short_date")]
    pub date: NaiveDate,
    pub consumption: f64, // kWh, 2 decimals
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakConsumption {
    pub time: String,
    pub value: f64, // kWh
}

/// Headline metrics shown on the dashboard cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub current_consumption: f64,     // kW, draw of devices that are on
    pub estimated_cost: i64,          // projected monthly cost, whole currency units
    pub today_total_consumption: f64, // kWh
    pub peak_consumption: PeakConsumption,
}

impl Default for KpiSummary {
    fn default() -> Self {
        Self {
            current_consumption: 0.0,
            estimated_cost: 0,
            today_total_consumption: 0.0,
            peak_consumption: PeakConsumption {
                time: NO_PEAK_LABEL.to_string(),
                value: 0.0,
            },
        }
    }
}

/// Energy price used for the monthly cost projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    /// Price of one kWh in `currency`
    #[serde(default = "default_price_per_kwh")]
    pub price_per_kwh: f64,

    /// Days today's consumption is extrapolated over
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,

    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_price_per_kwh() -> f64 {
    150.0
}

fn default_days_per_month() -> u32 {
    30
}

fn default_currency() -> String {
    "CLP".to_string()
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            price_per_kwh: default_price_per_kwh(),
            days_per_month: default_days_per_month(),
            currency: default_currency(),
        }
    }
}

/// One slice of the current-draw breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceShare {
    pub device_id: DeviceId,
    pub name: String,
    pub watts: f64,
    /// Fraction of the total draw of devices that are on (0..=1)
    pub share: f64,
}

/// Everything a renderer needs for one frame of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot<'a> {
    pub devices: &'a [Device],
    pub consumption: &'a [ConsumptionDataPoint],
    pub kpis: &'a KpiSummary,
    pub breakdown: &'a [ApplianceShare],
    pub currency: &'a str,
}
