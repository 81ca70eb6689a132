// mediascan-cli/src/output.rs
//
// Terminal presentation of command results.

use std::fmt::Display;

use mediascan_core::{ReconcileSummary, ScanReport, SearchSummary};
use owo_colors::OwoColorize;

/// Print a heading with colored styling and clear separation
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("\n{}", line.bright_blue());
    println!("{}", format!(" {} ", text).bold());
    println!("{}\n", line.bright_blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", label.bright_cyan(), value);
}

pub fn print_success(message: &str) {
    println!("{}", message.green().bold());
}

pub fn print_warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.bright_red().bold());
}

fn or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

pub fn print_scan_report(report: &ScanReport) {
    print_heading("Media Check");
    print_info("File", &report.path);
    print_info("Container", report.container);
    if report.fast_exit {
        print_success("Already complete, nothing to inspect");
        return;
    }
    print_info("Audio", or_none(&report.audio));
    print_info("Subtitles", or_none(&report.subtitles));
    let sidecars: Vec<String> = report.sidecars.iter().map(|s| s.descriptor.clone()).collect();
    print_info("Sidecars", or_none(&sidecars));
    if report.duplicates.is_empty() {
        print_info("Duplicates", "none");
    } else {
        print_warning(&format!("Possible duplicates: {}", report.duplicates.join(", ")));
    }
    print_info("State", report.state);
}

pub fn print_search_summary(summary: &SearchSummary, deep: bool) {
    print_heading("Search Summary");
    print_info("Videos found", summary.videos);
    print_info("Newly catalogued", summary.catalogued);
    print_info("Sidecars linked", summary.sidecars_linked);
    if deep {
        print_info("Checked", summary.checked);
    }
    if summary.failed > 0 {
        print_warning(&format!("{} file(s) failed, see the log", summary.failed));
    }
}

pub fn print_reconcile_summary(summary: &ReconcileSummary) {
    print_heading("Reconcile Summary");
    print_info("Examined", summary.examined);
    print_info("Completed", summary.completed);
    if summary.failed > 0 {
        print_warning(&format!("{} record(s) failed, see the log", summary.failed));
    }
}
