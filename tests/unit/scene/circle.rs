use super::*;
use crate::render::canvas::RecordingCanvas;

fn close(a: Point, b: (f64, f64)) -> bool {
    (a.x - b.0).abs() < 1e-12 && (a.y - b.1).abs() < 1e-12
}

#[test]
fn square_vertices_sit_on_the_axes() {
    let v: Vec<Point> = polygon_vertices(4, 1.0).collect();
    assert_eq!(v.len(), 4);
    assert!(close(v[0], (1.0, 0.0)));
    assert!(close(v[1], (0.0, 1.0)));
    assert!(close(v[2], (-1.0, 0.0)));
    assert!(close(v[3], (0.0, -1.0)));
}

#[test]
fn vertices_lie_on_the_circumcircle() {
    for sides in [3, 7, 128] {
        for v in polygon_vertices(sides, 2.5) {
            assert!((v.to_vec2().hypot() - 2.5).abs() < 1e-12);
        }
    }
}

#[test]
fn sides_stay_in_range_for_any_press_sequence() {
    let mut p = CircleParams::default();
    // Deterministic pseudo-random walk over the two side keys.
    let mut state = 0x2545_f491_4f6c_dd1du64;
    for _ in 0..5000 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let action = if state & 1 == 0 {
            CircleAction::DecrementSides
        } else {
            CircleAction::IncrementSides
        };
        action.apply(false, &mut p);
        assert!((MIN_SIDES..=MAX_SIDES).contains(&p.sides));
    }

    for _ in 0..500 {
        CircleAction::IncrementSides.apply(false, &mut p);
    }
    assert_eq!(p.sides, MAX_SIDES);
    for _ in 0..500 {
        CircleAction::DecrementSides.apply(true, &mut p);
    }
    assert_eq!(p.sides, MIN_SIDES);
}

#[test]
fn radius_steps_depend_on_shift() {
    let mut p = CircleParams::default();
    CircleAction::GrowRadius.apply(false, &mut p);
    assert!((p.radius - 1.1).abs() < 1e-12);
    CircleAction::ShrinkRadius.apply(false, &mut p);
    assert!((p.radius - 1.0).abs() < 1e-12);
    CircleAction::GrowRadius.apply(true, &mut p);
    assert_eq!(p.radius, 2.0);
    CircleAction::ShrinkRadius.apply(true, &mut p);
    CircleAction::ShrinkRadius.apply(true, &mut p);
    assert_eq!(p.radius, 0.5);
}

#[test]
fn radius_never_reaches_zero() {
    let mut p = CircleParams::default();
    for _ in 0..5000 {
        CircleAction::ShrinkRadius.apply(true, &mut p);
    }
    assert!(p.radius > 0.0);
    for _ in 0..5000 {
        CircleAction::GrowRadius.apply(true, &mut p);
    }
    assert!(p.radius.is_finite());
}

#[test]
fn toggles_flip_their_flag_only() {
    let mut p = CircleParams::default();
    CircleAction::ToggleFill.apply(false, &mut p);
    CircleAction::ToggleEdge.apply(false, &mut p);
    CircleAction::ToggleBackground.apply(true, &mut p);
    assert_eq!(
        p,
        CircleParams {
            fill: false,
            edge: true,
            background: true,
            ..CircleParams::default()
        }
    );
}

#[test]
fn key_bindings() {
    assert_eq!(
        CircleAction::from_key(KeyCode::Q),
        Some(CircleAction::DecrementSides)
    );
    assert_eq!(
        CircleAction::from_key(KeyCode::B),
        Some(CircleAction::ToggleBackground)
    );
    assert_eq!(CircleAction::from_key(KeyCode::Other('z')), None);
    assert!(CircleScene::key_mutation(KeyEvent::new(KeyCode::Other('z'))).is_none());

    let mut p = CircleParams::default();
    let m = CircleScene::key_mutation(KeyEvent::shifted(KeyCode::S)).unwrap();
    m(&mut p);
    assert_eq!(p.radius, 2.0);
}

#[test]
fn layers_render_back_to_front() {
    let params = CircleParams {
        sides: 5,
        radius: 0.75,
        fill: true,
        edge: true,
        background: true,
    };
    let mut c = RecordingCanvas::new();
    c.clear();
    CircleScene.render(&params, &mut c);

    let prims = c.primitives();
    assert_eq!(prims.len(), 3);
    assert_eq!(prims[0].kind, Primitive::Polygon);
    assert_eq!(prims[0].color, Some(Rgb::WHITE));
    assert_eq!(prims[0].vertices.len(), MAX_SIDES as usize);
    assert_eq!(prims[1].kind, Primitive::Polygon);
    assert_eq!(prims[1].color, Some(Rgb::YELLOW));
    assert_eq!(prims[1].vertices.len(), 5);
    assert_eq!(prims[2].kind, Primitive::LineLoop);
    assert_eq!(prims[2].color, Some(Rgb::RED));
    assert_eq!(prims[2].vertices.len(), 5);
}

#[test]
fn disabled_layers_emit_nothing() {
    let params = CircleParams {
        fill: false,
        ..CircleParams::default()
    };
    let mut c = RecordingCanvas::new();
    c.clear();
    CircleScene.render(&params, &mut c);
    assert!(c.primitives().is_empty());
}

#[test]
fn status_reflects_parameters() {
    let lines = CircleScene.status_lines(&CircleParams::default());
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("3"));
    assert!(lines[1].ends_with("1.000"));
    assert!(lines[2].ends_with("true"));
}
