use crate::model::{ApiEndpoint, ScanReport};
use anyhow::Result;

pub fn print_report_json(report: &ScanReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

pub fn print_endpoints_json(endpoints: &[ApiEndpoint]) -> Result<()> {
    let json = serde_json::to_string_pretty(endpoints)?;
    println!("{}", json);
    Ok(())
}
