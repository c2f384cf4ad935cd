use super::*;

#[test]
fn new_surface_is_opaque_white() {
    let s = Surface::new(3, 2).unwrap();
    assert_eq!(s.width(), 3);
    assert_eq!(s.height(), 2);
    assert_eq!(s.data().len(), 3 * 2 * 4);
    assert!(s.data().iter().all(|&b| b == 255));
}

#[test]
fn zero_and_oversized_dimensions_are_rejected() {
    assert!(Surface::new(0, 10).is_err());
    assert!(Surface::new(10, 0).is_err());
    let err = Surface::new(Surface::MAX_DIM + 1, 1).unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[test]
fn background_is_stored_premultiplied() {
    let s = Surface::with_background(1, 1, [255, 0, 0, 128]).unwrap();
    assert_eq!(s.data(), &[128, 0, 0, 128]);

    let frame = s.snapshot();
    assert!(frame.premultiplied);
    assert_eq!(frame.to_straight_rgba8(), vec![255, 0, 0, 128]);
}

#[test]
fn encode_png_produces_png_signature() {
    let frame = Surface::with_background(4, 4, [10, 20, 30, 255])
        .unwrap()
        .snapshot();
    let png = frame.encode_png().unwrap();
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (4, 4));
    assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30, 255]);
}

#[test]
fn encode_png_rejects_truncated_data() {
    let frame = RasterFrame {
        width: 2,
        height: 2,
        data: vec![0; 4],
        premultiplied: false,
    };
    assert!(frame.encode_png().is_err());
}
