//! Integration tests for home-energy-dashboard
//!
//! These tests drive the public API end to end without any real devices.

use chrono::NaiveDate;
use home_energy_dashboard::config::{Config, ConfigError};
use home_energy_dashboard::dashboard::{
    aggregate, aggregate_on, derive_kpis, report, toggle, Dashboard, KpiSummary, Tariff,
    ToggleOutcome,
};
use home_energy_dashboard::device::{
    default_catalog, Device, DeviceIcon, DeviceId, DeviceSource, DeviceStatus, JsonFileSource,
    MockDeviceSource,
};
use home_energy_dashboard::errors::{ReportError, SourceError};

fn device(id: &str, status: DeviceStatus, wattage: f64, history: Vec<f64>) -> Device {
    let today_kwh = history.iter().sum();
    Device {
        device_id: DeviceId::new(id),
        device_name: id.to_string(),
        status,
        current_wattage: wattage,
        today_kwh,
        hourly_history_kwh: history,
        icon: DeviceIcon::Unknown,
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn seeded_devices(seed: u64) -> Vec<Device> {
    MockDeviceSource::new(default_catalog(), Some(seed))
        .unwrap()
        .read_devices()
        .unwrap()
}

// ============================================================================
// Aggregation Tests
// ============================================================================

#[test]
fn test_aggregate_shape() {
    for seed in 0..10 {
        let series = aggregate(&seeded_devices(seed));
        assert_eq!(series.len(), 24);
        for (hour, point) in series.iter().enumerate() {
            assert_eq!(point.time, format!("{:02}:00", hour));
            assert_eq!(point.time.len(), 5);
            assert!(point.time[..2].chars().all(|c| c.is_ascii_digit()));
            assert!(point.time.ends_with(":00"));
        }
    }
}

#[test]
fn test_aggregate_empty() {
    assert!(aggregate(&[]).is_empty());
}

#[test]
fn test_aggregate_conserves_energy() {
    let devices = vec![
        device("a", DeviceStatus::On, 0.0, vec![0.5; 24]),
        device("b", DeviceStatus::Off, 0.0, vec![0.25; 10]),
        // hours past the 24th are dropped before summing
        device("c", DeviceStatus::Standby, 0.0, vec![0.25; 30]),
    ];
    let series = aggregate_on(&devices, date());
    let total: f64 = series.iter().map(|p| p.consumption).sum();

    let expected = 0.5 * 24.0 + 0.25 * 10.0 + 0.25 * 24.0;
    assert!((total - expected).abs() < 1e-9);
}

#[test]
fn test_aggregate_is_idempotent() {
    let devices = seeded_devices(11);
    let first = aggregate_on(&devices, date());
    let second = aggregate_on(&devices, date());
    assert_eq!(first, second);
}

#[test]
fn test_aggregate_date_serialization() {
    let devices = vec![device("a", DeviceStatus::On, 0.0, vec![1.0])];
    let series = aggregate_on(&devices, date());
    let json = serde_json::to_value(&series[0]).unwrap();

    assert_eq!(json["time"], "00:00");
    assert_eq!(json["date"], "15-01-2024");
    assert_eq!(json["consumption"], 1.0);
}

// ============================================================================
// KPI Tests
// ============================================================================

#[test]
fn test_kpis_empty() {
    let kpis = derive_kpis(&[], &[], &Tariff::default());
    assert_eq!(kpis.current_consumption, 0.0);
    assert_eq!(kpis.estimated_cost, 0);
    assert_eq!(kpis.today_total_consumption, 0.0);
    assert_eq!(kpis.peak_consumption.time, "N/A");
    assert_eq!(kpis.peak_consumption.value, 0.0);
}

#[test]
fn test_kpis_today_total_and_cost() {
    let mut devices = vec![
        device("a", DeviceStatus::On, 100.0, vec![0.0; 24]),
        device("b", DeviceStatus::Off, 0.0, vec![0.0; 24]),
        device("c", DeviceStatus::Standby, 5.0, vec![0.0; 24]),
    ];
    devices[0].today_kwh = 1.0;
    devices[1].today_kwh = 2.5;
    devices[2].today_kwh = 0.3;

    let series = aggregate_on(&devices, date());
    let kpis = derive_kpis(&devices, &series, &Tariff::default());

    assert_eq!(kpis.today_total_consumption, 3.8);
    assert_eq!(kpis.estimated_cost, 17100);
    assert_eq!(kpis.current_consumption, 0.1);
}

#[test]
fn test_kpis_peak_tie_breaks_to_earliest_hour() {
    let mut history = vec![0.0; 24];
    history[10] = 5.0;
    history[20] = 5.0;
    let devices = vec![device("a", DeviceStatus::On, 0.0, history)];

    let series = aggregate_on(&devices, date());
    let kpis = derive_kpis(&devices, &series, &Tariff::default());

    assert_eq!(kpis.peak_consumption.time, "10:00");
    assert_eq!(kpis.peak_consumption.value, 5.0);
}

#[test]
fn test_kpis_zero_wattage_standby_tolerated() {
    let devices = vec![device("a", DeviceStatus::Standby, 0.0, vec![0.5])];
    let series = aggregate_on(&devices, date());
    let kpis = derive_kpis(&devices, &series, &Tariff::default());

    assert_eq!(kpis.current_consumption, 0.0);
    assert_eq!(kpis.today_total_consumption, 0.5);
}

#[test]
fn test_kpis_json_field_names() {
    let json = serde_json::to_value(KpiSummary::default()).unwrap();
    assert_eq!(json["currentConsumption"], 0.0);
    assert_eq!(json["estimatedCost"], 0);
    assert_eq!(json["todayTotalConsumption"], 0.0);
    assert_eq!(json["peakConsumption"]["time"], "N/A");
}

// ============================================================================
// Toggle Tests
// ============================================================================

#[test]
fn test_toggle_semantics() {
    let devices = vec![
        device("on", DeviceStatus::On, 150.0, vec![0.15; 24]),
        device("standby", DeviceStatus::Standby, 7.5, vec![0.0; 24]),
        device("off", DeviceStatus::Off, 0.0, vec![0.0; 24]),
    ];

    let after = toggle(&devices, &DeviceId::new("on"));
    assert_eq!(after[0].status, DeviceStatus::Off);
    assert_eq!(after[0].current_wattage, devices[0].current_wattage);
    assert_eq!(after[0].today_kwh, devices[0].today_kwh);
    assert_eq!(after[0].hourly_history_kwh, devices[0].hourly_history_kwh);

    let after = toggle(&devices, &DeviceId::new("standby"));
    assert_eq!(after[1].status, DeviceStatus::On);

    let after = toggle(&devices, &DeviceId::new("off"));
    assert_eq!(after[2].status, DeviceStatus::On);

    assert_eq!(toggle(&devices, &DeviceId::new("missing")), devices);
}

#[test]
fn test_toggle_twice_never_returns_to_standby() {
    let devices = vec![device("tv", DeviceStatus::Standby, 7.5, vec![])];
    let id = DeviceId::new("tv");
    let after = toggle(&toggle(&devices, &id), &id);
    assert_eq!(after[0].status, DeviceStatus::Off);
}

#[test]
fn test_dashboard_with_seeded_source() {
    let mut source = MockDeviceSource::new(default_catalog(), Some(5)).unwrap();
    assert_eq!(source.profiles().len(), 7);
    let mut dashboard = Dashboard::from_source(&mut source, Tariff::default()).unwrap();

    assert_eq!(dashboard.tariff(), &Tariff::default());
    assert_eq!(dashboard.devices().len(), 7);
    assert_eq!(dashboard.consumption().len(), 24);

    let fridge = dashboard.find("Refrigerador").unwrap().clone();
    let outcome = dashboard.toggle(&fridge.device_id);
    assert_eq!(
        outcome,
        ToggleOutcome::Toggled {
            device_id: fridge.device_id.clone(),
            from: fridge.status,
            to: fridge.status.toggled(),
        }
    );

    let toggled = dashboard.device(&fridge.device_id).unwrap();
    assert_eq!(toggled.current_wattage, fridge.current_wattage);
    assert_eq!(toggled.today_kwh, fridge.today_kwh);

    let expected = derive_kpis(dashboard.devices(), dashboard.consumption(), &Tariff::default());
    assert_eq!(dashboard.kpis(), &expected);
}

// ============================================================================
// Source Tests
// ============================================================================

#[test]
fn test_json_file_source() {
    let path = std::env::temp_dir().join(format!(
        "home-energy-dashboard-test-{}.json",
        std::process::id()
    ));
    let json = r#"[
        {
            "deviceId": "heat-pump-1",
            "deviceName": "Heat pump",
            "status": "on",
            "currentWattage": 2200,
            "todayKWh": 4.5,
            "hourlyHistoryKWh": [1.5, 1.5, 1.5],
            "icon": "heat-pump"
        },
        {
            "deviceId": "tv-1",
            "deviceName": "TV",
            "status": "standby",
            "currentWattage": 0,
            "todayKWh": 0,
            "hourlyHistoryKWh": [],
            "icon": "tv"
        }
    ]"#;
    std::fs::write(&path, json).unwrap();

    let mut source = JsonFileSource::new(&path);
    let devices = source.read_devices().unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].icon, DeviceIcon::Unknown);
    assert_eq!(devices[1].icon, DeviceIcon::Tv);

    let dashboard = Dashboard::new(devices, Tariff::default());
    assert_eq!(dashboard.kpis().current_consumption, 2.2);
    assert_eq!(dashboard.kpis().today_total_consumption, 4.5);
    assert_eq!(dashboard.kpis().estimated_cost, 20250);
    assert_eq!(dashboard.kpis().peak_consumption.time, "00:00");
    assert_eq!(dashboard.consumption()[3].consumption, 0.0);
}

#[test]
fn test_source_error_display() {
    let error = SourceError::InvalidReading {
        device: "Pump".to_string(),
        reason: "negative".to_string(),
    };
    let error_string = format!("{}", error);
    assert!(error_string.contains("Pump"));
    assert!(error_string.contains("negative"));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_render_text() {
    let devices = vec![
        device("Fridge", DeviceStatus::On, 150.0, vec![0.5, 0.25]),
        device("TV", DeviceStatus::Off, 0.0, vec![]),
    ];
    let dashboard = Dashboard::new(devices, Tariff::default());
    let text = report::render_text(&dashboard.snapshot()).unwrap();

    assert!(text.contains("Estimated monthly cost: 3.375 CLP"));
    assert!(text.contains("Peak consumption:       0.50 kWh at 00:00"));
    assert!(text.contains("Fridge"));
    assert!(text.contains("(100.0%)"));
}

#[test]
fn test_render_text_without_devices() {
    let dashboard = Dashboard::new(Vec::new(), Tariff::default());
    let text = report::render_text(&dashboard.snapshot()).unwrap();

    assert!(text.contains("Hourly consumption: no data"));
    assert!(text.contains("No devices on"));
    assert!(text.contains("at N/A"));
}

#[test]
fn test_render_json() {
    let devices = vec![device("Fridge", DeviceStatus::On, 150.0, vec![0.5])];
    let dashboard = Dashboard::new(devices, Tariff::default());
    let json: serde_json::Value =
        serde_json::from_str(&report::render_json(&dashboard.snapshot()).unwrap()).unwrap();

    assert_eq!(json["currency"], "CLP");
    assert_eq!(json["devices"][0]["deviceName"], "Fridge");
    assert_eq!(json["devices"][0]["todayKWh"], 0.5);
    assert_eq!(json["consumption"].as_array().unwrap().len(), 24);
    assert_eq!(json["breakdown"][0]["share"], 1.0);
}

#[test]
fn test_error_type_implements_std_error() {
    let source_err = SourceError::ParseError("bad".to_string());
    let _: &dyn std::error::Error = &source_err;

    let report_err = ReportError::FormatError(std::fmt::Error);
    let _: &dyn std::error::Error = &report_err;

    let config_err = ConfigError::ValidationError("bad".to_string());
    let _: &dyn std::error::Error = &config_err;
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_drives_mock_source() {
    let config = Config::from_toml(
        r#"
        [source]
        seed = 99

        [[source.appliances]]
        name = "Boiler"
        base_wattage = 2000.0
        on_chance = 1.0
        icon = "unknown"
        "#,
    )
    .unwrap();

    let mut source =
        MockDeviceSource::new(config.source.appliances.clone(), config.source.seed).unwrap();
    assert_eq!(source.profiles(), config.source.appliances.as_slice());
    let devices = source.read_devices().unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].device_name, "Boiler");
    assert_eq!(devices[0].status, DeviceStatus::On);
    // peak hours always fire at on_chance 1.0
    assert!(devices[0].hourly_history_kwh[0] > 0.0);
    assert!(devices[0].hourly_history_kwh[23] > 0.0);
}

#[test]
fn test_example_config_matches_default_catalog() {
    let config = Config::from_toml(include_str!("../config.example.toml")).unwrap();

    assert_eq!(config.source.appliances, default_catalog());
    assert_eq!(config.tariff, Tariff::default());
    assert!(config.source.devices_file.is_none());
}

#[test]
fn test_config_devices_file_skips_appliance_validation() {
    let config = Config::from_toml(
        r#"
        [source]
        devices_file = "devices.json"

        [[source.appliances]]
        name = "Ignored"
        base_wattage = -1.0
        on_chance = 0.5
        "#,
    )
    .unwrap();

    assert!(config.source.devices_file.is_some());
}
