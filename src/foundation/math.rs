pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Converts a unit float to an 8-bit coverage value, clamping out-of-range input.
pub(crate) fn unit_to_u8(v: f32) -> u16 {
    if !v.is_finite() {
        return 0;
    }
    ((v.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16
}

/// Sine and cosine with values below 1/4096 snapped to zero, so quarter turns are exact.
pub(crate) fn sin_cos_snapped(radians: f64) -> (f64, f64) {
    const NEARLY_ZERO: f64 = 1.0 / 4096.0;
    let snap = |v: f64| if v.abs() <= NEARLY_ZERO { 0.0 } else { v };
    (snap(radians.sin()), snap(radians.cos()))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
