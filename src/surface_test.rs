use super::*;

#[test]
fn default_surface_is_unmeasured_identity() {
    let s = FixedSurface::default();
    assert_eq!(s.extent(), None);
    assert_eq!(s.to_render_space(Point::new(3.0, 4.0)), Some(Point::new(3.0, 4.0)));
}

#[test]
fn origin_translates_points() {
    let s = FixedSurface::new(Size::new(100.0, 100.0)).with_origin(Point::new(10.0, -5.0));
    assert_eq!(s.extent(), Some(Size::new(100.0, 100.0)));
    assert_eq!(s.to_render_space(Point::new(1.0, 1.0)), Some(Point::new(11.0, -4.0)));
}

#[test]
fn detached_surface_fails_transforms() {
    let s = FixedSurface::new(Size::new(100.0, 100.0)).detached();
    assert_eq!(s.to_render_space(Point::new(1.0, 1.0)), None);
}
