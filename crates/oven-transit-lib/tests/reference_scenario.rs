use oven_transit_lib::{
    calculate, fmt_hms, fmt_ms, to_csv_string, AnchorConstants, BeltId, CalibrationConfig,
    SpeedInput, ThicknessTrend,
};

fn within_pct(actual: f64, expected: f64, pct: f64) -> bool {
    ((actual - expected) / expected).abs() * 100.0 <= pct
}

fn reference_input() -> SpeedInput {
    SpeedInput::parse(["4000", "5000", "9000"], Some("2.0")).expect("valid entries")
}

#[test]
fn console_readings_give_reference_times() {
    let result = calculate(&reference_input(), &CalibrationConfig::default()).expect("calculates");

    assert_eq!(result.speeds_hz, [40.0, 50.0, 90.0]);
    assert!((result.target_seconds(BeltId::Belt1) - 3820.44).abs() < 0.01);
    assert!((result.target_seconds(BeltId::Belt2) - 2142.52).abs() < 0.01);
    assert!((result.target_seconds(BeltId::Belt3) - 6561.0).abs() < 0.01);
    assert!((result.total_seconds() - 12_523.96).abs() < 0.02);

    assert_eq!(fmt_hms(result.target_seconds(BeltId::Belt1)), "1:03:40");
    assert_eq!(fmt_ms(result.target_seconds(BeltId::Belt2)), "35:42");
    assert_eq!(fmt_ms(result.target_seconds(BeltId::Belt3)), "109:21");
    assert_eq!(fmt_hms(result.total_seconds()), "3:28:43");
}

#[test]
fn reference_thickness_profile() {
    let result = calculate(&reference_input(), &CalibrationConfig::default()).expect("calculates");
    let thickness = result.thickness;

    assert_eq!(thickness.height(BeltId::Belt1), Some(2.0));
    assert!(within_pct(thickness.height(BeltId::Belt2).unwrap(), 5.47, 0.5));
    assert!(within_pct(thickness.height(BeltId::Belt3).unwrap(), 8.39, 0.5));
    assert!(within_pct(thickness.delta_12_pct.unwrap(), 174.0, 0.5));
    assert!(within_pct(thickness.delta_23_pct.unwrap(), 53.3, 0.5));
    assert_eq!(result.trend_12(), ThicknessTrend::Accumulating);
    assert_eq!(result.trend_23(), ThicknessTrend::Accumulating);
}

#[test]
fn hz_entries_match_console_entries() {
    let config = CalibrationConfig::default();
    let console = calculate(&reference_input(), &config).unwrap();
    let hz = calculate(&SpeedInput::new([40.0, 50.0, 90.0], Some(2.0)), &config).unwrap();
    assert_eq!(console.times, hz.times);
    assert_eq!(console.thickness, hz.thickness);
}

#[test]
fn unusable_anchor_only_degrades_its_outputs() {
    let mut anchors = AnchorConstants::builtin();
    anchors.set(BeltId::Belt2, Some(0.0));
    let result = calculate(&reference_input(), &CalibrationConfig::with_anchor(anchors)).unwrap();

    assert!((result.target_seconds(BeltId::Belt2) - 2142.52).abs() < 0.01);
    assert_eq!(result.thickness.height(BeltId::Belt1), Some(2.0));
    assert!(result.thickness.height(BeltId::Belt2).is_none());
    assert!(result.thickness.height(BeltId::Belt3).is_some());
    assert!(result.thickness.delta_12_pct.is_none());
    assert!(result.thickness.delta_23_pct.is_none());
    assert_eq!(result.trend_12(), ThicknessTrend::Unavailable);
}

#[test]
fn invalid_entries_reject_the_whole_request() {
    let config = CalibrationConfig::default();
    assert!(calculate(&SpeedInput::new([40.0, 0.0, 90.0], None), &config).is_err());
    assert!(calculate(&SpeedInput::new([40.0, 50.0, f64::NAN], None), &config).is_err());
    assert!(calculate(&SpeedInput::new([40.0, 50.0, 90.0], Some(-1.0)), &config).is_err());
    assert!(SpeedInput::parse(["40", "", "90"], None).is_err());
    assert!(SpeedInput::parse(["40", "50", "90"], Some("thick")).is_err());
}

#[test]
fn csv_carries_the_displayed_numbers() {
    let result = calculate(&reference_input(), &CalibrationConfig::default()).unwrap();
    let csv = to_csv_string(&result).unwrap();
    let t2 = csv
        .lines()
        .find_map(|line| line.strip_prefix("t2_s;"))
        .and_then(|value| value.parse::<f64>().ok())
        .expect("t2_s row");
    assert_eq!(t2, result.target_seconds(BeltId::Belt2));
    assert_eq!(fmt_ms(t2), "35:42");
}
