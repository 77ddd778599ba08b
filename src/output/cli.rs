use crate::model::{ApiEndpoint, ProjectType, ScanReport};
use anyhow::Result;
use std::collections::BTreeMap;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Handler")]
    handler: String,
    #[tabled(rename = "Location")]
    location: String,
}

#[derive(Tabled)]
struct RootRow {
    #[tabled(rename = "Root")]
    root: String,
    #[tabled(rename = "Ecosystem")]
    ecosystem: String,
    #[tabled(rename = "Endpoints")]
    endpoints: String,
}

pub fn print_report_table(report: &ScanReport) -> Result<()> {
    println!();
    println!(
        "Scan completed at: {}",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if !report.roots.is_empty() {
        let rows: Vec<RootRow> = report
            .roots
            .iter()
            .map(|r| RootRow {
                root: truncate(&r.path.display().to_string(), 60),
                ecosystem: r.project_type.display_name().to_string(),
                endpoints: match &r.error {
                    Some(error) => format!("error: {}", truncate(error, 40)),
                    None => r.endpoint_count.to_string(),
                },
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
        println!();
    }

    print_endpoint_table(&report.endpoints)?;
    print_summary(report);
    Ok(())
}

pub fn print_endpoint_table(endpoints: &[ApiEndpoint]) -> Result<()> {
    if endpoints.is_empty() {
        println!("No endpoints found.");
        return Ok(());
    }

    println!("Found {} endpoints:", endpoints.len());
    println!();

    let rows: Vec<EndpointRow> = endpoints.iter().map(endpoint_row).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    Ok(())
}

fn endpoint_row(endpoint: &ApiEndpoint) -> EndpointRow {
    EndpointRow {
        method: format_method(endpoint),
        path: truncate(&endpoint.api_path, 60),
        handler: truncate(&endpoint.handler(), 50),
        location: truncate(&endpoint.location(), 70),
    }
}

fn format_method(endpoint: &ApiEndpoint) -> String {
    endpoint
        .http_method
        .map(|m| m.to_string())
        .unwrap_or_else(|| "ANY".to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn print_summary(report: &ScanReport) {
    let mut by_type: BTreeMap<ProjectType, usize> = BTreeMap::new();
    for root in &report.roots {
        *by_type.entry(root.project_type).or_default() += root.endpoint_count;
    }
    let failed = report.roots.iter().filter(|r| r.error.is_some()).count();

    println!();
    println!("Summary:");
    println!("  Roots scanned: {}", report.roots.len());
    println!("  Total endpoints: {}", report.endpoints.len());

    if by_type.len() > 1 {
        let breakdown: Vec<String> = by_type
            .iter()
            .map(|(t, c)| format!("{} {}", c, t.display_name()))
            .collect();
        println!("  By ecosystem: {}", breakdown.join(", "));
    }

    if failed > 0 {
        println!("  Failed roots: {}", failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HttpMethod, Language};

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("/api/ünïcödé/path", 8), "/api/...");
    }

    #[test]
    fn test_catch_all_routes_show_any() {
        let endpoint = ApiEndpoint::new("/legacy", "app.js", 3, Language::Javascript)
            .with_handler("default", "legacy");
        let row = endpoint_row(&endpoint);
        assert_eq!(row.method, "ANY");
        assert_eq!(row.handler, "default.legacy");
        assert_eq!(row.location, "app.js:3");

        let get = endpoint.with_method(Some(HttpMethod::Get));
        assert_eq!(endpoint_row(&get).method, "GET");
    }
}
