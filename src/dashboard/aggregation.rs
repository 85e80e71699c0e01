//! Hourly aggregation
//!
//! Folds every device's hourly history into one 24-point series of total
//! consumption.

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::types::ConsumptionDataPoint;
use crate::device::types::round;
use crate::device::{Device, HOURS_PER_DAY};

/// "HH:00" label for an hour of the day.
pub fn hour_label(hour: usize) -> String {
    format!("{:02}:00", hour)
}

/// Exactly 24 slots: missing hours count as 0, extra hours are dropped.
pub fn normalize_history(history: &[f64]) -> [f64; HOURS_PER_DAY] {
    let mut slots = [0.0; HOURS_PER_DAY];
    for (slot, value) in slots.iter_mut().zip(history) {
        *slot = *value;
    }
    slots
}

/// Unrounded per-hour sums over all devices.
pub fn hourly_totals(devices: &[Device]) -> [f64; HOURS_PER_DAY] {
    let mut totals = [0.0; HOURS_PER_DAY];
    for device in devices {
        if device.hourly_history_kwh.len() != HOURS_PER_DAY {
            debug!(
                "Normalizing history of {} from {} to {} hours",
                device.device_name,
                device.hourly_history_kwh.len(),
                HOURS_PER_DAY
            );
        }
        for (total, kwh) in totals
            .iter_mut()
            .zip(normalize_history(&device.hourly_history_kwh))
        {
            *total += kwh;
        }
    }
    totals
}

/// Aggregate the device set into a consumption series dated today.
pub fn aggregate(devices: &[Device]) -> Vec<ConsumptionDataPoint> {
    aggregate_on(devices, Local::now().date_naive())
}

/// Aggregate the device set into a consumption series dated `date`.
///
/// An empty device set yields an empty series, not 24 zero points.
pub fn aggregate_on(devices: &[Device], date: NaiveDate) -> Vec<ConsumptionDataPoint> {
    if devices.is_empty() {
        return Vec::new();
    }

    hourly_totals(devices)
        .iter()
        .enumerate()
        .map(|(hour, total)| ConsumptionDataPoint {
            time: hour_label(hour),
            date,
            consumption: round(*total, 2),
        })
        .collect()
}
