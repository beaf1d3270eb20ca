use super::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4
}

fn approx_matrix(a: &Matrix, b: &Matrix) -> bool {
    a.elements()
        .iter()
        .zip(b.elements().iter())
        .all(|(x, y)| approx(*x, *y))
}

#[test]
fn default_is_identity() {
    let m = Matrix::default();
    assert!(m.is_identity());
    assert_eq!(m.elements(), [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    assert!(!Matrix::translation(0.0, 1e-7).is_identity());
}

#[test]
fn prepend_applies_new_transform_first() {
    let mut m = Matrix::translation(10.0, 0.0);
    m.scale(2.0, 2.0, MatrixOrder::Prepend);
    assert_eq!(
        m.transform_point(Point32::new(1.0, 1.0)),
        Point32::new(12.0, 2.0)
    );
}

#[test]
fn append_applies_new_transform_last() {
    let mut m = Matrix::translation(10.0, 0.0);
    m.scale(2.0, 2.0, MatrixOrder::Append);
    assert_eq!(
        m.transform_point(Point32::new(1.0, 1.0)),
        Point32::new(22.0, 2.0)
    );
}

#[test]
fn combine_matches_mul_operator() {
    let base = Matrix::from_row_major(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let other = Matrix::translation(-1.0, 7.0);

    let mut prepended = base;
    prepended.combine(&other, MatrixOrder::Prepend);
    assert_eq!(prepended, base * other);

    let mut appended = base;
    appended.combine(&other, MatrixOrder::Append);
    assert_eq!(appended, other * base);

    let mut multiplied = base;
    multiplied.multiply(&other);
    assert_eq!(multiplied, prepended);
}

#[test]
fn quarter_turn_is_exact() {
    let m = Matrix::rotation_deg(90.0);
    assert_eq!(m.scale_x(), 0.0);
    assert_eq!(m.scale_y(), 0.0);
    assert_eq!(
        m.transform_point(Point32::new(1.0, 0.0)),
        Point32::new(0.0, 1.0)
    );
    assert_eq!(
        m.transform_point(Point32::new(0.0, 1.0)),
        Point32::new(-1.0, 0.0)
    );
}

#[test]
fn rotated_rectangle_bounds() {
    let m = Matrix::rotation_deg(90.0);
    let r = m.transform_rectangle(Rect32::new(0.0, 0.0, 10.0, 20.0));
    assert_eq!(r, Rect32::new(-20.0, 0.0, 20.0, 10.0));
}

#[test]
fn rotate_at_keeps_pivot_fixed() {
    let pivot = Point32::new(5.0, 5.0);
    let m = Matrix::rotation_deg_at(90.0, pivot);
    assert_eq!(m.transform_point(pivot), pivot);
    assert_eq!(
        m.transform_point(Point32::new(6.0, 5.0)),
        Point32::new(5.0, 6.0)
    );

    let mut chained = Matrix::IDENTITY;
    chained.rotate_at(90.0, pivot, MatrixOrder::Append);
    assert_eq!(chained, m);
}

#[test]
fn rotation_readout_recovers_angle() {
    assert!(approx(Matrix::rotation_deg(30.0).rotation_degrees(), 30.0));
    assert!(approx(
        Matrix::rotation_deg(-45.0).rotation(),
        -std::f32::consts::FRAC_PI_4
    ));

    let mut scaled = Matrix::rotation_deg(20.0);
    scaled.scale(3.0, 3.0, MatrixOrder::Append);
    assert!(approx(scaled.rotation_degrees(), 20.0));
}

#[test]
fn determinant_and_invertibility() {
    assert!(approx(Matrix::scaling(2.0, 3.0).determinant(), 6.0));
    assert!(Matrix::scaling(2.0, 3.0).is_invertible());
    assert!(!Matrix::scaling(0.0, 3.0).is_invertible());
    assert!(!Matrix::scaling(1e-6, 1e-6).is_invertible());
}

#[test]
fn inverse_round_trips() {
    let m = Matrix::from_row_major(2.0, 1.0, 3.0, 0.5, 3.0, -4.0);
    let inv = m.inverted().expect("invertible");
    assert!(approx_matrix(&(m * inv), &Matrix::IDENTITY));
    assert!(approx_matrix(&(inv * m), &Matrix::IDENTITY));

    let p = Point32::new(7.0, -2.5);
    let back = inv.transform_point(m.transform_point(p));
    assert!(approx(back.x, p.x) && approx(back.y, p.y));
}

#[test]
fn singular_invert_leaves_matrix_unchanged() {
    let mut m = Matrix::from_row_major(1.0, 2.0, 5.0, 2.0, 4.0, 6.0);
    let before = m;
    assert!(m.inverted().is_none());
    assert!(!m.invert());
    assert_eq!(m, before);
}

#[test]
fn invert_in_place() {
    let mut m = Matrix::translation(3.0, -4.0);
    assert!(m.invert());
    assert_eq!(m, Matrix::translation(-3.0, 4.0));
}

#[test]
fn vectors_ignore_translation() {
    let mut m = Matrix::translation(100.0, 100.0);
    m.scale(2.0, 3.0, MatrixOrder::Prepend);
    let mut v = [Point32::new(1.0, 1.0)];
    m.transform_vectors(&mut v);
    assert_eq!(v[0], Point32::new(2.0, 3.0));

    let mut p = [Point32::new(1.0, 1.0), Point32::ORIGIN];
    m.transform_points(&mut p);
    assert_eq!(p, [Point32::new(102.0, 103.0), Point32::new(100.0, 100.0)]);
}

#[test]
fn shear_prepends_skew() {
    let mut m = Matrix::translation(1.0, 0.0);
    m.shear(1.0, 0.0);
    assert_eq!(
        m.transform_point(Point32::new(0.0, 2.0)),
        Point32::new(3.0, 2.0)
    );
}

#[test]
fn kurbo_coefficients_round_trip() {
    let affine = kurbo::Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let m = Matrix::from(affine);
    assert_eq!(m.scale_x(), 1.0);
    assert_eq!(m.skew_y(), 2.0);
    assert_eq!(m.skew_x(), 3.0);
    assert_eq!(m.scale_y(), 4.0);
    assert_eq!(m.offset_x(), 5.0);
    assert_eq!(m.offset_y(), 6.0);

    let p = kurbo::Point::new(1.0, 1.0);
    let expected = Point32::from(affine * p);
    assert_eq!(m.transform_point(Point32::new(1.0, 1.0)), expected);
    assert_eq!(kurbo::Affine::from(m).as_coeffs(), affine.as_coeffs());
}

#[test]
fn display_lists_rows() {
    assert_eq!(Matrix::IDENTITY.to_string(), "[1;0;0],[0;1;0],[0;0;1]");
    assert_eq!(
        Matrix::translation(2.5, -1.0).to_string(),
        "[1;0;2.5],[0;1;-1],[0;0;1]"
    );
}
