use std::borrow::Cow;

#[entitle_derive::entitle_error(result = ParseResult)]
pub enum ParseError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Int { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
}

type Result<T> = std::result::Result<T, String>;

fn parse(raw: &str) -> ParseResult<i64> {
    Ok(raw.parse::<i64>()?)
}

fn unrelated() -> Result<()> {
    Ok(())
}

fn main() {
    assert_eq!(parse("42").ok(), Some(42));
    assert!(matches!(parse("x"), Err(ParseError::Int { context: None, .. })));
    assert!(unrelated().is_ok());
}
