use entitle_derive::entitle_error;

#[entitle_error]
pub enum GateError {
    #[error("Gate is not configured")]
    NotConfigured,
}

fn check(ready: bool) -> Result<u8> {
    if ready { Ok(1) } else { Err(GateError::NotConfigured) }
}

fn main() {
    let err = check(false).context("ignored for unit variants").unwrap_err();
    assert!(matches!(err, GateError::NotConfigured));
    assert_eq!(err.to_string(), "Gate is not configured");
    assert_eq!(check(true).ok(), Some(1));
}
