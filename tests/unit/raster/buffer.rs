use super::*;

#[test]
fn new_accepts_exact_length() {
    let r = RasterRgba8::new(2, 3, vec![7u8; 2 * 3 * 4]).unwrap();
    assert_eq!((r.width(), r.height()), (2, 3));
    assert_eq!(r.data().len(), 24);
}

#[test]
fn new_rejects_mismatched_length() {
    let err = RasterRgba8::new(2, 2, vec![0u8; 15]).unwrap_err();
    assert!(matches!(err, OverlayError::Validation(_)));
    assert!(err.to_string().contains("does not match"));

    assert!(RasterRgba8::new(2, 2, vec![0u8; 17]).is_err());
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(RasterRgba8::new(0, 4, vec![]).is_err());
    assert!(RasterRgba8::new(4, 0, vec![]).is_err());
    assert!(RasterRgba8::filled(0, 0, [1, 2, 3, 4]).is_err());
}

#[test]
fn filled_repeats_the_pixel() {
    let r = RasterRgba8::filled(3, 2, [1, 2, 3, 4]).unwrap();
    assert_eq!(r.data().len(), 24);
    for px in r.data().chunks_exact(4) {
        assert_eq!(px, [1, 2, 3, 4]);
    }
}

#[test]
fn pixel_access_is_row_major() {
    let mut r = RasterRgba8::transparent(3, 2).unwrap();
    r.set_pixel(2, 1, [9, 8, 7, 6]).unwrap();
    assert_eq!(r.index_of(2, 1), (3 + 2) * 4);
    assert_eq!(r.pixel(2, 1), Some([9, 8, 7, 6]));
    assert_eq!(r.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(r.pixel(3, 0), None);
    assert!(r.set_pixel(0, 2, [0; 4]).is_err());
}

#[test]
fn into_data_hands_back_the_buffer() {
    let data: Vec<u8> = (0u8..16).collect();
    let r = RasterRgba8::new(2, 2, data.clone()).unwrap();
    assert_eq!(r.into_data(), data);
}
