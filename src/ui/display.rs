//! Styled summaries of sync and verify runs

use console::Style;

use crate::operations::fetch::FetchOutcome;
use crate::operations::pipeline::short_oid;
use crate::operations::publish::PublishOutcome;
use crate::operations::vendor::{ConsumerStatus, VendorReport};
use crate::operations::verify::{ConsumerState, VerifyReport};
use crate::operations::SyncReport;

const DRY_RUN_PREFIX: &str = "[DRY RUN]";

/// Lines describing a sync run, without styling
pub fn sync_summary_lines(report: &SyncReport) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(fetch) = &report.fetch {
        lines.push(fetch_line(fetch));
    }

    for consumer in &report.vendor.consumers {
        let verb = match (consumer.status, report.dry_run) {
            (ConsumerStatus::Replaced, false) => "Replaced",
            (ConsumerStatus::Created, false) => "Created",
            (ConsumerStatus::Replaced, true) => "Would replace",
            (ConsumerStatus::Created, true) => "Would create",
            (ConsumerStatus::UpToDate, _) => "Up to date:",
        };
        lines.push(format!("{verb} {}", consumer.consumer));
    }

    if let Some(publish) = &report.publish {
        lines.extend(publish_lines(publish));
    }

    if report.dry_run {
        lines = lines
            .into_iter()
            .map(|line| format!("{DRY_RUN_PREFIX} {line}"))
            .collect();
    }
    lines
}

fn fetch_line(fetch: &FetchOutcome) -> String {
    let path = crate::domain::display_path(&fetch.path);
    let line = match fetch.previous {
        Some(previous) if !fetch.changed => {
            format!("Fetched {path}: already at {}", short_oid(previous))
        }
        Some(previous) => format!(
            "Fetched {path}: {} -> {}",
            short_oid(previous),
            short_oid(fetch.current)
        ),
        None => format!("Fetched {path}: cloned at {}", short_oid(fetch.current)),
    };
    match fetch.nested {
        0 => line,
        n => format!("{line} (+{n} nested)"),
    }
}

fn publish_lines(publish: &PublishOutcome) -> Vec<String> {
    let Some(commit) = publish.commit else {
        return vec!["Nothing to commit".to_string()];
    };

    let mut lines = vec![format!("Committed {}", short_oid(commit))];
    if let Some(branch) = &publish.branch {
        lines.extend(
            publish
                .pushed
                .iter()
                .map(|remote| format!("Pushed {branch} to {remote}")),
        );
    }
    lines
}

/// Print a sync run summary
pub fn print_sync_report(report: &SyncReport) {
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    let green = Style::new().green();

    for line in sync_summary_lines(report) {
        if line.contains("Up to date") || line.contains("Nothing to commit") {
            println!("  {}", dim.apply_to(line));
        } else {
            println!("  {}", line);
        }
    }

    if !report.dry_run {
        print_vendor_totals(&report.vendor, &bold, &green);
    }
}

fn print_vendor_totals(vendor: &VendorReport, bold: &Style, green: &Style) {
    println!(
        "{} {} of {} consumer(s) updated ({})",
        green.apply_to("✓"),
        bold.apply_to(vendor.changed()),
        vendor.consumers.len(),
        vendor.source_hash
    );
}

/// Print a verify report as a table
pub fn print_verify_report(report: &VerifyReport) {
    println!(
        "{} {} ({})",
        Style::new().bold().apply_to("Source:"),
        report.source,
        report.source_hash
    );

    for check in &report.consumers {
        let style = match check.state {
            ConsumerState::InSync => Style::new().green(),
            ConsumerState::OutOfSync => Style::new().yellow(),
            ConsumerState::Missing => Style::new().red(),
        };
        println!("  {:<40} {}", check.consumer, style.apply_to(check.state));
    }
}
