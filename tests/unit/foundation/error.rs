use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OverlayError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        OverlayError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_into_other() {
    fn fails() -> OverlayResult<()> {
        Err::<(), _>(anyhow::anyhow!("pool exploded"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, OverlayError::Other(_)));
    assert_eq!(err.to_string(), "pool exploded");
}
