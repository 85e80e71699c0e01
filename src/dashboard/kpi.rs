//! KPI derivation
//!
//! Pure summary statistics over the device set and its aggregated series.

use super::types::{ConsumptionDataPoint, KpiSummary, PeakConsumption, Tariff};
use crate::device::types::round;
use crate::device::Device;

/// Hour with the highest consumption; the earliest hour wins ties.
pub fn peak_consumption(series: &[ConsumptionDataPoint]) -> Option<PeakConsumption> {
    let first = series.first()?;
    let peak = series[1..].iter().fold(first, |max, point| {
        if point.consumption > max.consumption {
            point
        } else {
            max
        }
    });

    Some(PeakConsumption {
        time: peak.time.clone(),
        value: peak.consumption,
    })
}

/// Draw of the devices that are on, W converted to kW.
pub fn current_consumption(devices: &[Device]) -> f64 {
    let watts: f64 = devices
        .iter()
        .filter(|d| d.is_contributing())
        .map(|d| d.current_wattage)
        .sum();
    round(watts / 1000.0, 2)
}

/// Today's consumption extrapolated over a month, rounded to whole units.
pub fn estimated_monthly_cost(today_kwh: f64, tariff: &Tariff) -> i64 {
    (today_kwh * f64::from(tariff.days_per_month) * tariff.price_per_kwh).round() as i64
}

/// Derive the headline metrics.
///
/// Either input being empty yields the zero summary with a peak of "N/A".
pub fn derive_kpis(
    devices: &[Device],
    series: &[ConsumptionDataPoint],
    tariff: &Tariff,
) -> KpiSummary {
    let Some(peak) = peak_consumption(series) else {
        return KpiSummary::default();
    };
    if devices.is_empty() {
        return KpiSummary::default();
    }

    let today_kwh: f64 = devices.iter().map(|d| d.today_kwh).sum();

    KpiSummary {
        current_consumption: current_consumption(devices),
        estimated_cost: estimated_monthly_cost(today_kwh, tariff),
        today_total_consumption: round(today_kwh, 2),
        peak_consumption: peak,
    }
}
