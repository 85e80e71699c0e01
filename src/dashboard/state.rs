//! Dashboard state holder
//!
//! Owns the device set, the single source of truth, and caches the views
//! derived from it. The device set only changes through [`Dashboard::toggle`]
//! and [`Dashboard::reload`].

use tracing::{debug, info, warn};

use super::aggregation::aggregate;
use super::breakdown::breakdown;
use super::kpi::derive_kpis;
use super::types::{ApplianceShare, ConsumptionDataPoint, DashboardSnapshot, KpiSummary, Tariff};
use crate::device::{Device, DeviceId, DeviceSource, DeviceStatus};
use crate::errors::SourceError;

/// Flip the status of the device with `device_id`.
///
/// Returns a new device set; the input is left untouched. Wattage, today's
/// total and the hourly history keep their old values. An unknown id yields
/// an unchanged copy.
pub fn toggle(devices: &[Device], device_id: &DeviceId) -> Vec<Device> {
    devices
        .iter()
        .map(|device| {
            if &device.device_id == device_id {
                Device {
                    status: device.status.toggled(),
                    ..device.clone()
                }
            } else {
                device.clone()
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Toggled {
        device_id: DeviceId,
        from: DeviceStatus,
        to: DeviceStatus,
    },
    NotFound,
}

pub struct Dashboard {
    devices: Vec<Device>,
    tariff: Tariff,
    consumption: Vec<ConsumptionDataPoint>,
    kpis: KpiSummary,
    breakdown: Vec<ApplianceShare>,
}

impl Dashboard {
    pub fn new(devices: Vec<Device>, tariff: Tariff) -> Self {
        let mut dashboard = Self {
            devices,
            tariff,
            consumption: Vec::new(),
            kpis: KpiSummary::default(),
            breakdown: Vec::new(),
        };
        dashboard.recompute();
        dashboard
    }

    /// Build a dashboard from a first read of `source`.
    pub fn from_source(
        source: &mut dyn DeviceSource,
        tariff: Tariff,
    ) -> Result<Self, SourceError> {
        Ok(Self::new(source.read_devices()?, tariff))
    }

    /// Replace the device set with a fresh read, discarding toggles.
    pub fn reload(&mut self, source: &mut dyn DeviceSource) -> Result<(), SourceError> {
        self.devices = source.read_devices()?;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.consumption = aggregate(&self.devices);
        self.kpis = derive_kpis(&self.devices, &self.consumption, &self.tariff);
        self.breakdown = breakdown(&self.devices);
        debug!(
            "Recomputed views: current={:.2}kW today={:.2}kWh cost={} peak={}",
            self.kpis.current_consumption,
            self.kpis.today_total_consumption,
            self.kpis.estimated_cost,
            self.kpis.peak_consumption.time
        );
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, device_id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.device_id == device_id)
    }

    /// Look a device up by id, falling back to the first exact name match.
    pub fn find(&self, id_or_name: &str) -> Option<&Device> {
        self.devices
            .iter()
            .find(|d| d.device_id.as_str() == id_or_name)
            .or_else(|| self.devices.iter().find(|d| d.device_name == id_or_name))
    }

    pub fn toggle(&mut self, device_id: &DeviceId) -> ToggleOutcome {
        let Some(from) = self.device(device_id).map(|d| d.status) else {
            warn!("Toggle ignored, unknown device id: {}", device_id);
            return ToggleOutcome::NotFound;
        };

        self.devices = toggle(&self.devices, device_id);
        self.recompute();

        let to = from.toggled();
        info!("Device {} toggled: {} -> {}", device_id, from, to);
        ToggleOutcome::Toggled {
            device_id: device_id.clone(),
            from,
            to,
        }
    }

    pub fn consumption(&self) -> &[ConsumptionDataPoint] {
        &self.consumption
    }

    pub fn kpis(&self) -> &KpiSummary {
        &self.kpis
    }

    pub fn breakdown(&self) -> &[ApplianceShare] {
        &self.breakdown
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        DashboardSnapshot {
            devices: &self.devices,
            consumption: &self.consumption,
            kpis: &self.kpis,
            breakdown: &self.breakdown,
            currency: &self.tariff.currency,
        }
    }
}
