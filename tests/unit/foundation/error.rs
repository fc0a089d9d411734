use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TitleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TitleError::font_load("x")
            .to_string()
            .contains("font load error:")
    );
    assert!(
        TitleError::outline("x")
            .to_string()
            .contains("outline error:")
    );
    assert!(TitleError::render("x").to_string().contains("render error:"));
    assert!(TitleError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TitleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
