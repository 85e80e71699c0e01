//! Snapshot rendering
//!
//! JSON for frontends, plain text for terminals.

use std::fmt::Write;

use super::types::{DashboardSnapshot, DATE_FORMAT};
use crate::errors::ReportError;

/// Whole number with `.` as thousands separator, e.g. `17.100`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

pub fn render_json(snapshot: &DashboardSnapshot) -> Result<String, ReportError> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|error| ReportError::SerializationError { error })
}

pub fn render_text(snapshot: &DashboardSnapshot) -> Result<String, ReportError> {
    let mut out = String::new();
    let kpis = snapshot.kpis;

    writeln!(out, "Current consumption:    {:.2} kW", kpis.current_consumption)?;
    writeln!(
        out,
        "Estimated monthly cost: {} {}",
        format_thousands(kpis.estimated_cost),
        snapshot.currency
    )?;
    writeln!(out, "Today's consumption:    {:.2} kWh", kpis.today_total_consumption)?;
    writeln!(
        out,
        "Peak consumption:       {:.2} kWh at {}",
        kpis.peak_consumption.value, kpis.peak_consumption.time
    )?;

    writeln!(out)?;
    match snapshot.consumption.first() {
        Some(first) => {
            writeln!(out, "Hourly consumption ({})", first.date.format(DATE_FORMAT))?;
            for point in snapshot.consumption {
                writeln!(out, "  {}  {:>8.2} kWh", point.time, point.consumption)?;
            }
        }
        None => writeln!(out, "Hourly consumption: no data")?,
    }

    writeln!(out)?;
    writeln!(out, "Devices")?;
    for device in snapshot.devices {
        writeln!(
            out,
            "  {:<20} {:<8} {:>9.2} W  {}",
            device.device_name,
            device.status,
            device.current_wattage,
            device.icon.key()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Current draw by appliance")?;
    if snapshot.breakdown.is_empty() {
        writeln!(out, "  No devices on")?;
    }
    for share in snapshot.breakdown {
        writeln!(
            out,
            "  {:<20} {:>9.2} W  ({:.1}%)",
            share.name,
            share.watts,
            share.share * 100.0
        )?;
    }

    Ok(out)
}
