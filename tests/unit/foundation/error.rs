use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RasterFxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RasterFxError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        RasterFxError::allocation(3, 4)
            .to_string()
            .contains("cannot allocate 3x4")
    );
}

#[test]
fn missing_buffer_names_primitive_and_buffer() {
    let err = RasterFxError::missing_buffer("feMerge (primitive #2)", BufferName::from("blurred"));
    let msg = err.to_string();
    assert!(msg.contains("feMerge (primitive #2)"));
    assert!(msg.contains("'blurred'"));
}

#[test]
fn missing_buffer_displays_implicit_slots() {
    let err = RasterFxError::missing_buffer("feOffset (primitive #1)", BufferName::Implicit(0));
    assert!(err.to_string().contains("implicit result of primitive #0"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RasterFxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
