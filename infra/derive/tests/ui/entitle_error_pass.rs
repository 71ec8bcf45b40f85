use entitle_derive::entitle_error;
use std::borrow::Cow;

#[entitle_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String> {
    std::fs::read_to_string("/definitely/missing").context("Reading demo file")
}

fn fail() -> Result<()> {
    Err("boom".into())
}

fn main() {
    let err = read().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: Some(_), .. }));
    assert!(err.to_string().starts_with("IO error (Reading demo file): "));

    let err = fail().context("Running demo").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (Running demo): boom");
}
