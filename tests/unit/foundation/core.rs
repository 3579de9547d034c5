use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    assert_eq!(Fps::default(), Fps::per_second(60).unwrap());
}

#[test]
fn fps_period_matches_rate() {
    let fps = Fps::per_second(50).unwrap();
    assert_eq!(fps.frame_period(), Duration::from_millis(20));
    assert!((fps.frames_to_secs(100) - 2.0).abs() < 1e-12);
}

#[test]
fn canvas_size_validates_and_narrows() {
    assert!(CanvasSize::new(0, 10).is_err());
    let s = CanvasSize::new(640, 480).unwrap();
    assert_eq!(s.as_u16().unwrap(), (640, 480));
    let huge = CanvasSize {
        width: 70_000,
        height: 10,
    };
    assert!(huge.as_u16().is_err());
}

#[test]
fn rgb_quantises_with_clamp() {
    assert_eq!(Rgb::YELLOW.to_rgb8(), [255, 255, 0]);
    assert_eq!(Rgb::new(-1.0, 0.5, 2.0).to_rgb8(), [0, 128, 255]);
}

#[test]
fn projection_maps_corners_to_pixels() {
    let size = CanvasSize::new(200, 100).unwrap();
    let p = Projection::ortho(-1.0, 1.0, -1.0, 1.0).unwrap();
    let a = p.to_pixel_affine(size);

    let tl = a * Point::new(-1.0, 1.0);
    let br = a * Point::new(1.0, -1.0);
    let c = a * Point::new(0.0, 0.0);
    assert!((tl.x - 0.0).abs() < 1e-9 && (tl.y - 0.0).abs() < 1e-9);
    assert!((br.x - 200.0).abs() < 1e-9 && (br.y - 100.0).abs() < 1e-9);
    assert!((c.x - 100.0).abs() < 1e-9 && (c.y - 50.0).abs() < 1e-9);
}

#[test]
fn projection_rejects_empty_extent() {
    assert!(Projection::ortho(1.0, 1.0, -1.0, 1.0).is_err());
    assert!(Projection::ortho(-1.0, 1.0, 0.0, f64::NAN).is_err());
}
