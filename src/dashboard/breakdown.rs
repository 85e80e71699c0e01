use super::types::ApplianceShare;
use crate::device::Device;

/// Split the current draw of devices that are on by appliance.
///
/// Devices drawing nothing are skipped. Returns an empty list when nothing
/// draws power.
pub fn breakdown(devices: &[Device]) -> Vec<ApplianceShare> {
    let active: Vec<&Device> = devices
        .iter()
        .filter(|d| d.is_contributing() && d.current_wattage > 0.0)
        .collect();
    let total: f64 = active.iter().map(|d| d.current_wattage).sum();

    if total == 0.0 {
        return Vec::new();
    }

    active
        .into_iter()
        .map(|d| ApplianceShare {
            device_id: d.device_id.clone(),
            name: d.device_name.clone(),
            watts: d.current_wattage,
            share: d.current_wattage / total,
        })
        .collect()
}
