use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];

#[test]
fn allocate_is_transparent() {
    let buf = CpuBuffer::allocate(3, 2).unwrap();
    assert_eq!(buf.width(), 3);
    assert_eq!(buf.height(), 2);
    assert_eq!(buf.pixels().len(), 3 * 2 * 4);
    assert!(buf.pixels().iter().all(|&b| b == 0));
}

#[test]
fn allocate_rejects_degenerate_and_oversized() {
    assert!(matches!(
        CpuBuffer::allocate(0, 4),
        Err(RasterFxError::Allocation {
            width: 0,
            height: 4
        })
    ));
    assert!(matches!(
        CpuBuffer::allocate(70_000, 1),
        Err(RasterFxError::Allocation { .. })
    ));
}

#[test]
fn filled_and_pixel_lookup() {
    let buf = CpuBuffer::filled(2, 2, [10, 20, 30, 40]).unwrap();
    assert_eq!(buf.pixel(1, 1), Some([10, 20, 30, 40]));
    assert_eq!(buf.pixel(2, 0), None);
    assert_eq!(buf.pixel(0, 2), None);
}

#[test]
fn from_premul_rgba8_checks_length() {
    assert!(CpuBuffer::from_premul_rgba8(2, 1, &[0; 8]).is_ok());
    assert!(matches!(
        CpuBuffer::from_premul_rgba8(2, 1, &[0; 7]),
        Err(RasterFxError::Evaluation(_))
    ));
}

#[test]
fn duplicate_copies_pixels() {
    let src = CpuBuffer::filled(2, 3, RED).unwrap();
    let copy = src.duplicate().unwrap();
    assert_eq!(copy.width(), 2);
    assert_eq!(copy.height(), 3);
    assert_eq!(copy.pixels(), src.pixels());
}

#[test]
fn draw_unscaled_clips_to_destination() {
    let src = CpuBuffer::filled(2, 2, RED).unwrap();

    let mut dst = CpuBuffer::allocate(4, 4).unwrap();
    dst.draw_unscaled(&src, 3, 3).unwrap();
    assert_eq!(dst.pixel(3, 3), Some(RED));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 0]));

    let mut dst = CpuBuffer::allocate(4, 4).unwrap();
    dst.draw_unscaled(&src, -1, -1).unwrap();
    assert_eq!(dst.pixel(0, 0), Some(RED));
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 0]));

    let mut dst = CpuBuffer::allocate(4, 4).unwrap();
    dst.draw_unscaled(&src, 10, 0).unwrap();
    assert!(dst.pixels().iter().all(|&b| b == 0));
}

#[test]
fn draw_transformed_respects_coverage() {
    let src = CpuBuffer::filled(1, 1, RED).unwrap();

    let mut dst = CpuBuffer::allocate(3, 1).unwrap();
    dst.draw_transformed(&src, &Matrix::translation(1.0, 0.0), 1.0, &|_, _| true)
        .unwrap();
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(1, 0), Some(RED));
    assert_eq!(dst.pixel(2, 0), Some([0, 0, 0, 0]));

    let mut dst = CpuBuffer::allocate(3, 1).unwrap();
    dst.draw_transformed(&src, &Matrix::translation(1.0, 0.0), 1.0, &|x, _| x > 2.0)
        .unwrap();
    assert!(dst.pixels().iter().all(|&b| b == 0));
}
