// ==========================================
// SliceBuildConfig 集成测试
// ==========================================
// 测试目标: 默认值、复制独立性、机器同步、XML 持久化
// ==========================================


#[path = "helpers/mock_machine.rs"]
mod mock_machine;

use mock_machine::MockMachine;
use test_helpers::{
    create_test_profile, default_field_values, random_config, with_field, write_profile_xml,
    Entropy,
};
use uvdlp_slice_config::config::slice_build_config::fields;
use uvdlp_slice_config::{logging, BuildDirection, ConfigError, GCodeFragments, SliceBuildConfig};

#[test]
fn test_defaults_are_deterministic() {
    let a = SliceBuildConfig::new();
    let b = SliceBuildConfig::default();
    assert_eq!(a, b, "Two default configs should be identical");
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_copy_is_independent() {
    let source = SliceBuildConfig::new();
    let mut copy = source.clone();

    copy.dpmm_x = 1.0;
    copy.layer_time_ms = 42;
    copy.direction = BuildDirection::TopDown;
    copy.export_images = true;
    copy.gcode.header.push_str("M106\r\n");
    copy.gcode.post_lift = "G4 P500\r\n".to_string();

    assert_eq!(source, SliceBuildConfig::new(), "Source should be unchanged");

    // 反向: 修改源对象不影响副本
    let mut source = source;
    let snapshot = copy.clone();
    source.gcode.footer.clear();
    source.plat_temp = -5;
    assert_eq!(copy, snapshot, "Copy should be unchanged");
}

#[test]
fn test_update_from_changes_only_resolution_fields() {
    let mut rng = Entropy::new();
    let mut config = random_config(&mut rng);
    config.gcode.pre_lift = "M3\r\n".to_string();
    let before = config.clone();

    let machine = MockMachine::hd_projector();
    config.update_from(&machine);

    assert_eq!(config.dpmm_x, 19.2);
    assert_eq!(config.dpmm_y, 19.3);
    assert_eq!(config.x_res, 1920);
    assert_eq!(config.y_res, 1080);

    let mut restored = config.clone();
    restored.dpmm_x = before.dpmm_x;
    restored.dpmm_y = before.dpmm_y;
    restored.x_res = before.x_res;
    restored.y_res = before.y_res;
    assert_eq!(restored, before, "No other field should change");
}

#[test]
fn test_save_load_round_trip_randomized() {
    logging::init_test();
    let (_dir, profile) = create_test_profile("roundtrip");
    let mut rng = Entropy::new();

    for _ in 0..200 {
        let expected = random_config(&mut rng);
        expected
            .save(profile.config_path())
            .expect("Save should succeed");

        let mut loaded = SliceBuildConfig::new();
        loaded
            .load(profile.config_path(), &profile)
            .expect("Load should succeed");

        assert_eq!(loaded.dpmm_x.to_bits(), expected.dpmm_x.to_bits());
        assert_eq!(loaded.dpmm_y.to_bits(), expected.dpmm_y.to_bits());
        assert_eq!(loaded.z_thick.to_bits(), expected.z_thick.to_bits());
        assert_eq!(loaded.lift_distance.to_bits(), expected.lift_distance.to_bits());
        assert_eq!(loaded.x_res, expected.x_res);
        assert_eq!(loaded.y_res, expected.y_res);
        assert_eq!(loaded.x_offset, expected.x_offset);
        assert_eq!(loaded.y_offset, expected.y_offset);
        assert_eq!(loaded.layer_time_ms, expected.layer_time_ms);
        assert_eq!(loaded.first_layer_time_ms, expected.first_layer_time_ms);
        assert_eq!(loaded.blank_time_ms, expected.blank_time_ms);
        assert_eq!(loaded.plat_temp, expected.plat_temp);
        assert_eq!(loaded.export_gcode, expected.export_gcode);
        assert_eq!(loaded.export_svg, expected.export_svg);
        assert_eq!(loaded.export_images, expected.export_images);
        assert_eq!(loaded.direction, expected.direction);
    }
}

#[test]
fn test_both_directions_round_trip() {
    let (_dir, profile) = create_test_profile("direction");

    for direction in [BuildDirection::TopDown, BuildDirection::BottomUp] {
        let mut config = SliceBuildConfig::new();
        config.direction = direction;
        config.save(profile.config_path()).unwrap();

        let xml = std::fs::read_to_string(profile.config_path()).unwrap();
        assert!(xml.contains(&format!("<Direction>{}</Direction>", direction.as_str())));

        let mut loaded = SliceBuildConfig::new();
        loaded.direction = match direction {
            BuildDirection::TopDown => BuildDirection::BottomUp,
            BuildDirection::BottomUp => BuildDirection::TopDown,
        };
        loaded.load(profile.config_path(), &profile).unwrap();
        assert_eq!(loaded.direction, direction);
    }
}

#[test]
fn test_unknown_direction_is_rejected() {
    logging::init_test();
    let (_dir, profile) = create_test_profile("bad_direction");
    write_profile_xml(
        profile.config_path(),
        &with_field(fields::DIRECTION, "Diagonal"),
    );

    let mut config = SliceBuildConfig::new();
    let err = config
        .load(profile.config_path(), &profile)
        .expect_err("Unknown direction should fail");
    assert!(matches!(err, ConfigError::InvalidDirection(ref v) if v == "Diagonal"));
}

#[test]
fn test_unparseable_field_fails_and_keeps_earlier_fields() {
    logging::init_test();
    let (_dir, profile) = create_test_profile("malformed");

    let mut values = with_field(fields::SLICE_HEIGHT, "thin");
    values[0].1 = "20".to_string(); // DotsPermmX
    write_profile_xml(profile.config_path(), &values);

    let mut config = SliceBuildConfig::new();
    config.layer_time_ms = 777;
    let err = config
        .load(profile.config_path(), &profile)
        .expect_err("Malformed float should fail");

    match err {
        ConfigError::ParseField { field, value, .. } => {
            assert_eq!(field, "SliceHeight");
            assert_eq!(value, "thin");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    // 出错前的字段已应用，出错后的字段保持原值
    assert_eq!(config.dpmm_x, 20.0);
    assert_eq!(config.z_thick, 0.025);
    assert_eq!(config.layer_time_ms, 777);
}

#[test]
fn test_bool_fields_accept_any_case() {
    let (_dir, profile) = create_test_profile("bools");
    let mut values = with_field(fields::EXPORT_SVG, "true");
    values[11].1 = " TRUE ".to_string(); // ExportImages
    values[9].1 = "false".to_string(); // ExportGCode
    write_profile_xml(profile.config_path(), &values);

    let mut config = SliceBuildConfig::new();
    config.load(profile.config_path(), &profile).unwrap();
    assert!(!config.export_gcode);
    assert!(config.export_svg);
    assert!(config.export_images);
}

#[test]
fn test_missing_field_fails() {
    let (_dir, profile) = create_test_profile("truncated");
    let values = default_field_values();
    write_profile_xml(profile.config_path(), &values[..10]);

    let mut config = SliceBuildConfig::new();
    let err = config.load(profile.config_path(), &profile).unwrap_err();
    assert!(matches!(err, ConfigError::MissingElement { ref expected } if expected == "ExportSVG"));
}

#[test]
fn test_wrong_root_element_fails() {
    let (_dir, profile) = create_test_profile("wrong_root");
    std::fs::write(profile.config_path(), "<MachineConfig><DotsPermmX>1</DotsPermmX></MachineConfig>")
        .unwrap();

    let mut config = SliceBuildConfig::new();
    assert!(config.load(profile.config_path(), &profile).is_err());
}

#[test]
fn test_missing_file_fails_but_bootstraps_fragments() {
    logging::init_test();
    let (_dir, profile) = create_test_profile("fresh");

    let mut config = SliceBuildConfig::new();
    config.gcode.header = "stale".to_string();
    let err = config.load(profile.config_path(), &profile).unwrap_err();

    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(profile.gcode_dir().is_dir(), "Fragment dir should exist");
    assert_eq!(config.gcode, GCodeFragments::default());
}

#[test]
fn test_save_into_missing_directory_fails() {
    logging::init_test();
    let (dir, _profile) = create_test_profile("unused");
    let path = dir.path().join("no_such_dir").join("p.xml");

    let err = SliceBuildConfig::new().save(&path).unwrap_err();
    match err {
        ConfigError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("Expected Io error with path, got {other:?}"),
    }
}

#[test]
fn test_self_closing_root_reports_empty_element() {
    let (_dir, profile) = create_test_profile("empty_root");
    std::fs::write(profile.config_path(), "<?xml version=\"1.0\"?>\n<SliceBuildConfig/>\n").unwrap();

    let mut config = SliceBuildConfig::new();
    let err = config.load(profile.config_path(), &profile).unwrap_err();
    assert!(
        matches!(err, ConfigError::EmptyElement { ref name } if name == "SliceBuildConfig"),
        "Unexpected error: {err}"
    );
    assert_eq!(config, SliceBuildConfig::new(), "No field should change");
}

#[test]
fn test_load_profile_uses_profile_path() {
    let (_dir, profile) = create_test_profile("resin_a");
    let mut expected = SliceBuildConfig::new();
    expected.plat_temp = 31;
    expected.gcode.footer = "M84\r\n".to_string();
    expected.save_profile(&profile).unwrap();

    let mut loaded = SliceBuildConfig::new();
    loaded.load_profile(&profile).unwrap();
    assert_eq!(loaded, expected);
}
