use anyhow::Result;
use entitle_licensing::registry::boolean_feature;
use entitle_licensing::{BooleanFeature, LicenseState};
use std::io::Write;

pub(crate) fn report(state: &LicenseState, json: bool, out: &mut impl Write) -> Result<()> {
    let report = state.report();
    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{report}")?;
    }
    Ok(())
}

pub(crate) fn check(state: &LicenseState, names: &[String], out: &mut impl Write) -> Result<()> {
    let features = names
        .iter()
        .map(|name| boolean_feature(name))
        .collect::<Result<Vec<BooleanFeature>, _>>()?;

    let licensed = state.is_licensed(features)?;
    writeln!(out, "{licensed}")?;
    Ok(())
}

pub(crate) fn value(state: &LicenseState, key: &str, out: &mut impl Write) -> Result<()> {
    match state.get_raw_value(key)? {
        Some(value) => writeln!(out, "{value}")?,
        None => writeln!(out, "absent")?,
    }
    Ok(())
}
