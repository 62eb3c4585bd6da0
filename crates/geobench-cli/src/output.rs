use console::style;
use geobench_core::runner::BenchmarkReport;
use geobench_core::suite::CaseReport;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Human-readable console output
#[derive(Debug, Default)]
pub struct OutputWriter;

impl OutputWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn info(&self, message: impl Display) {
        println!("{} {}", style("ℹ").blue().bold(), message);
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        println!("{}: {}", style(key).bold(), value);
    }

    pub fn section(&self, title: impl Display) {
        println!("\n{}", style(title).bold().underlined());
    }

    /// Print one benchmark result line
    pub fn report(&self, report: &BenchmarkReport) {
        println!("{}", format_report_line(report));
    }

    pub fn summary(&self, reports: &[CaseReport]) {
        if reports.is_empty() {
            println!("{}", style("(no data)").dim());
        } else {
            println!("\n{}", summary_table(reports));
        }
    }

    pub fn done(&self) {
        println!("\nDone. Screenshot these results.");
    }
}

/// `<label>: avg=<mean> ms, stdev=<stdev> ms, runs=<n>`
pub fn format_report_line(report: &BenchmarkReport) -> String {
    format!(
        "{}: avg={:.2} ms, stdev={:.2} ms, runs={}",
        report.label, report.stats.mean_ms, report.stats.stdev_ms, report.stats.runs
    )
}

/// Row of the closing summary table
#[derive(Debug, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Benchmark")]
    pub label: String,
    #[tabled(rename = "Backend")]
    pub backend: String,
    #[tabled(rename = "Avg (ms)")]
    pub mean_ms: String,
    #[tabled(rename = "Stdev (ms)")]
    pub stdev_ms: String,
    #[tabled(rename = "Runs")]
    pub runs: usize,
    #[tabled(rename = "Matched")]
    pub matched: u64,
}

impl From<&CaseReport> for SummaryRow {
    fn from(case: &CaseReport) -> Self {
        Self {
            label: case.report.label.clone(),
            backend: case.backend.clone(),
            mean_ms: format!("{:.2}", case.report.stats.mean_ms),
            stdev_ms: format!("{:.2}", case.report.stats.stdev_ms),
            runs: case.report.stats.runs,
            matched: case.report.matched,
        }
    }
}

pub fn summary_table(reports: &[CaseReport]) -> String {
    let mut table = Table::new(reports.iter().map(SummaryRow::from));
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geobench_core::models::QueryShape;
    use geobench_core::stats::BenchmarkStats;

    fn report(label: &str, mean_ms: f64, stdev_ms: f64) -> BenchmarkReport {
        BenchmarkReport {
            label: label.to_string(),
            stats: BenchmarkStats {
                mean_ms,
                stdev_ms,
                runs: 10,
            },
            matched: 42,
        }
    }

    #[test]
    fn test_report_line_format() {
        let line = format_report_line(&report("PostGIS radius (ST_DWithin)", 3.14159, 0.5));
        assert_eq!(line, "PostGIS radius (ST_DWithin): avg=3.14 ms, stdev=0.50 ms, runs=10");
    }

    #[test]
    fn test_report_line_with_zero_stdev() {
        let line = format_report_line(&report("MongoDB polygon ($geoWithin)", 12.0, 0.0));
        assert_eq!(line, "MongoDB polygon ($geoWithin): avg=12.00 ms, stdev=0.00 ms, runs=10");
    }

    #[test]
    fn test_summary_table_lists_every_case() {
        let reports = vec![
            CaseReport {
                backend: "PostGIS".to_string(),
                shape: QueryShape::Radius,
                report: report("PostGIS radius (ST_DWithin)", 1.25, 0.1),
            },
            CaseReport {
                backend: "MongoDB".to_string(),
                shape: QueryShape::Polygon,
                report: report("MongoDB polygon ($geoWithin)", 2.5, 0.2),
            },
        ];

        let table = summary_table(&reports);
        assert!(table.contains("Benchmark"));
        assert!(table.contains("Avg (ms)"));
        assert!(table.contains("PostGIS radius (ST_DWithin)"));
        assert!(table.contains("MongoDB polygon ($geoWithin)"));
        assert!(table.contains("1.25"));
        assert!(table.contains("42"));

        let postgis = table.find("PostGIS radius").unwrap();
        let mongo = table.find("MongoDB polygon").unwrap();
        assert!(postgis < mongo);
    }
}
