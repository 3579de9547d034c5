use super::*;

#[test]
fn primitives_only_cover_the_latest_frame() {
    let mut c = RecordingCanvas::new();
    c.clear();
    c.begin_primitive(Primitive::Points);
    c.emit_vertex(Point::new(9.0, 9.0));
    c.end_primitive();
    c.flush().unwrap();

    c.clear();
    c.set_projection(Projection::UNIT);
    c.begin_primitive(Primitive::LineLoop);
    c.set_color(Rgb::RED);
    c.emit_vertex(Point::new(0.0, 0.0));
    c.emit_vertex(Point::new(1.0, 0.0));
    c.end_primitive();
    c.flush().unwrap();

    let prims = c.primitives();
    assert_eq!(prims.len(), 1);
    assert_eq!(prims[0].kind, Primitive::LineLoop);
    assert_eq!(prims[0].color, Some(Rgb::RED));
    assert_eq!(prims[0].vertices.len(), 2);
}

#[test]
fn colour_carries_over_to_following_primitives() {
    let mut c = RecordingCanvas::new();
    c.clear();
    c.set_color(Rgb::WHITE);
    c.begin_primitive(Primitive::Polygon);
    c.end_primitive();
    c.begin_primitive(Primitive::Points);
    c.end_primitive();

    let prims = c.primitives();
    assert!(prims.iter().all(|p| p.color == Some(Rgb::WHITE)));
}

#[test]
fn unterminated_primitive_is_not_reported() {
    let mut c = RecordingCanvas::new();
    c.clear();
    c.begin_primitive(Primitive::Points);
    c.emit_vertex(Point::ORIGIN);
    assert!(c.primitives().is_empty());
    assert_eq!(c.commands().len(), 3);
}
