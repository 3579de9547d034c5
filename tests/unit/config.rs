use super::*;

#[test]
fn scene_defaults_match_native_window_sizes() {
    let c = SketchConfig::for_scene(SceneKind::Circle);
    assert_eq!((c.width, c.height), (500, 500));
    assert_eq!(c.fps, Fps::default());
    assert_eq!(c.clear_rgba, [0, 0, 0, 255]);

    let m = SketchConfig::for_scene(SceneKind::Tinkerbell);
    assert_eq!((m.width, m.height), (1280, 720));
    assert!(m.realtime);
    m.validate().unwrap();
}

#[test]
fn omitted_fields_fall_back_to_scene_defaults() {
    let c = SketchConfig::from_json_str(
        r#"{ "scene": "tinkerbell", "frames": 30, "realtime": false, "fps": { "num": 30, "den": 1 } }"#,
    )
    .unwrap();
    assert_eq!(c.scene, SceneKind::Tinkerbell);
    assert_eq!((c.width, c.height), (1280, 720));
    assert_eq!(c.frames, Some(30));
    assert_eq!(c.pacing(), Pacing::Unthrottled);
    assert_eq!(c.fps, Fps::new(30, 1).unwrap());
}

#[test]
fn canvas_opts_carry_raster_settings() {
    let c = SketchConfig::from_json_str(
        r#"{ "scene": "circle", "clear_rgba": [1, 2, 3, 255], "point_size_px": 2.5 }"#,
    )
    .unwrap();
    let opts = c.canvas_opts();
    assert_eq!(opts.clear_rgba, [1, 2, 3, 255]);
    assert_eq!(opts.point_size_px, 2.5);
    assert_eq!(opts.line_width_px, 1.0);
}

#[test]
fn parse_failures_are_config_errors() {
    let missing_scene = SketchConfig::from_json_str(r#"{ "width": 10 }"#).unwrap_err();
    assert!(matches!(missing_scene, SketchError::Config(_)));

    let unknown = SketchConfig::from_json_str(r#"{ "scene": "circle", "colour": 1 }"#).unwrap_err();
    assert!(matches!(unknown, SketchError::Config(_)));

    let missing_file = SketchConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(missing_file.to_string().starts_with("config error:"));
}

#[test]
fn validate_rejects_bad_values() {
    let mut c = SketchConfig::for_scene(SceneKind::Circle);
    c.width = 0;
    assert!(c.validate().is_err());

    let mut c = SketchConfig::for_scene(SceneKind::Circle);
    c.fps = Fps { num: 60, den: 0 };
    assert!(c.validate().is_err());

    let mut c = SketchConfig::for_scene(SceneKind::Circle);
    c.line_width_px = f64::NAN;
    assert!(c.validate().is_err());

    let mut c = SketchConfig::for_scene(SceneKind::Circle);
    c.width = 70_000;
    assert!(c.validate().is_err());
}
