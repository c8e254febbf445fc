//! End-of-run statistics.

use crate::ResolveReport;

/// Formats the run totals followed by one line per failure kind.
pub fn lookup_statistics_lines(report: &ResolveReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Resolved {} of {} domain{} ({} without CNAME or failed) using {} workers over {} resolvers in {:.1}s",
        report.resolved,
        report.dispatched,
        if report.dispatched == 1 { "" } else { "s" },
        report.failed,
        report.workers,
        report.resolvers,
        report.elapsed_seconds
    )];
    lines.extend(
        report
            .failure_counts
            .iter()
            .map(|(kind, count)| format!("   {}: {}", kind.as_str(), count)),
    );
    lines
}

/// Prints the statistics to stderr; stdout carries results only.
pub fn print_lookup_statistics(report: &ResolveReport) {
    for line in lookup_statistics_lines(report) {
        eprintln!("{line}");
    }
}
