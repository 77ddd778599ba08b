mod cli;
mod json;

pub use cli::{print_endpoint_table, print_report_table};
pub use json::{print_endpoints_json, print_report_json};

use crate::model::{ApiEndpoint, ScanReport};
use anyhow::Result;

/// Output format for scan and search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format for editors and scripts
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'table' or 'json'", s)),
        }
    }
}

pub fn print_report(report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_report_table(report),
        OutputFormat::Json => print_report_json(report),
    }
}

pub fn print_endpoints(endpoints: &[ApiEndpoint], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_endpoint_table(endpoints),
        OutputFormat::Json => print_endpoints_json(endpoints),
    }
}

/// Format a report for file output. Tables are written as JSON.
pub fn format_report_to_string(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_report_file_output_is_json() {
        let text = format_report_to_string(&ScanReport::empty()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["endpoints"].as_array().unwrap().is_empty());
        assert!(value.get("scanTime").is_some());
    }
}
