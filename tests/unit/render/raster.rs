use super::*;

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
<rect x="0" y="0" width="2" height="2" fill="#ff0000"/>
</svg>"##;

fn pixel(surface: &Surface, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * surface.width() + x) * 4) as usize;
    surface.data()[i..i + 4].try_into().unwrap()
}

#[test]
fn rasterize_draws_at_unit_scale_from_origin() {
    let r = SvgRasterizer::new(1.0).unwrap();
    let mut s = Surface::new(4, 4).unwrap();
    r.rasterize(RED_SQUARE, &mut s).unwrap();

    assert_eq!(pixel(&s, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&s, 1, 1), [255, 0, 0, 255]);
    // Outside the rect the white background is left alone.
    assert_eq!(pixel(&s, 3, 3), [255, 255, 255, 255]);
}

#[test]
fn rasterize_honors_scale() {
    let r = SvgRasterizer::new(2.0).unwrap();
    let mut s = Surface::new(8, 8).unwrap();
    r.rasterize(RED_SQUARE, &mut s).unwrap();
    assert_eq!(pixel(&s, 3, 3), [255, 0, 0, 255]);
    assert_eq!(pixel(&s, 5, 5), [255, 255, 255, 255]);
}

#[test]
fn larger_drawing_is_clipped_to_surface() {
    let r = SvgRasterizer::new(1.0).unwrap();
    let mut s = Surface::new(1, 1).unwrap();
    r.rasterize(RED_SQUARE, &mut s).unwrap();
    assert_eq!(pixel(&s, 0, 0), [255, 0, 0, 255]);
}

#[test]
fn invalid_svg_is_render_error() {
    let r = SvgRasterizer::new(1.0).unwrap();
    let mut s = Surface::new(2, 2).unwrap();
    let err = r.rasterize("<svg", &mut s).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}

#[test]
fn bad_scale_is_rejected() {
    assert!(SvgRasterizer::new(0.0).is_err());
    assert!(SvgRasterizer::new(-1.0).is_err());
    assert!(SvgRasterizer::new(f32::NAN).is_err());
}

#[test]
fn missing_font_dir_is_tolerated() {
    let r = SvgRasterizer::new(1.0)
        .unwrap()
        .with_fonts(false, &[PathBuf::from("target/no-such-font-dir")]);
    let mut s = Surface::new(4, 4).unwrap();
    r.rasterize(RED_SQUARE, &mut s).unwrap();
}
