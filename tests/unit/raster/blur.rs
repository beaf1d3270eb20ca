use super::*;

#[test]
fn kernel_weights_sum_to_one_and_are_symmetric() {
    let k = GaussianKernel::for_sigma(1.5, 256).unwrap();
    assert_eq!(k.radius(), 5);
    let sum: u32 = k.weights.iter().sum();
    assert_eq!(sum, 1 << 16);
    let n = k.weights.len();
    for i in 0..n / 2 {
        assert_eq!(k.weights[i], k.weights[n - 1 - i]);
    }
}

#[test]
fn kernel_radius_is_capped() {
    assert_eq!(GaussianKernel::for_sigma(1.0, 256).unwrap().radius(), 3);
    assert_eq!(GaussianKernel::for_sigma(10.0, 4).unwrap().radius(), 4);
}

#[test]
fn zero_radius_cap_disables_blur() {
    let k = GaussianKernel::for_sigma(10.0, 0).unwrap();
    assert_eq!(k.radius(), 0);
    let src: Vec<u8> = (0..16).collect();
    let mut dst = vec![0u8; 16];
    blur_rgba8_premul(&src, &mut dst, 2, 2, &k).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn kernel_rejects_invalid_sigma() {
    assert!(GaussianKernel::for_sigma(-1.0, 8).is_err());
    assert!(GaussianKernel::for_sigma(f32::NAN, 8).is_err());
}

#[test]
fn zero_sigma_copies() {
    let k = GaussianKernel::for_sigma(0.0, 8).unwrap();
    assert_eq!(k.radius(), 0);
    let src: Vec<u8> = (0..16).collect();
    let mut dst = vec![0u8; 16];
    blur_rgba8_premul(&src, &mut dst, 2, 2, &k).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn uniform_image_stays_uniform() {
    let px = [100u8, 50, 25, 200];
    let src = px.repeat(5 * 5);
    let mut dst = vec![0u8; src.len()];
    let k = GaussianKernel::for_sigma(1.5, 256).unwrap();
    blur_rgba8_premul(&src, &mut dst, 5, 5, &k).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn single_pixel_spreads_symmetrically() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let mut dst = vec![0u8; src.len()];
    let k = GaussianKernel::for_sigma(1.0, 256).unwrap();
    blur_rgba8_premul(&src, &mut dst, w, h, &k).unwrap();

    let alpha = |x: u32, y: u32| dst[((y * w + x) * 4 + 3) as usize];
    assert!(alpha(2, 2) < 255);
    assert!(alpha(1, 2) > 0);
    assert_eq!(alpha(1, 2), alpha(3, 2));
    assert_eq!(alpha(2, 1), alpha(2, 3));
}

#[test]
fn mismatched_lengths_are_rejected() {
    let k = GaussianKernel::for_sigma(1.0, 8).unwrap();
    let mut dst = vec![0u8; 16];
    assert!(blur_rgba8_premul(&[0u8; 12], &mut dst, 2, 2, &k).is_err());
}
