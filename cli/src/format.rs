//! Text rendering of search hits and update reports.

use nodemorph_mutation::{ActionStatus, UpdateReport};
use nodemorph_query::{row_cells, Projection, SearchResult};

/// Render hits as a table of path plus projected columns. With `full`,
/// every property of each hit follows its row.
pub fn format_hits(result: &SearchResult, projection: &Projection, full: bool) -> String {
    if result.is_empty() {
        return "(no results)".to_string();
    }

    let mut header = vec!["Path"];
    header.extend(projection.headers());
    let rows: Vec<Vec<&str>> = result
        .hits
        .iter()
        .map(|hit| row_cells(hit, projection))
        .collect();

    let mut output = table(&header, &rows);
    if full {
        output.push('\n');
        for hit in &result.hits {
            output.push_str(hit.path().unwrap_or("-"));
            output.push('\n');
            for (name, value) in hit.iter() {
                output.push_str(&format!("  {} = {}\n", name, value));
            }
        }
    }
    output.push_str(&format!("\n({} hits)", result.count));
    output
}

/// Render a report: the affected count, then one row per action.
pub fn format_report(report: &UpdateReport) -> String {
    let mut output = format!("Affected {} node(s)\n", report.total);
    if report.actions.is_empty() {
        return output;
    }

    let rows: Vec<Vec<&str>> = report
        .actions
        .iter()
        .map(|a| {
            vec![
                a.path.as_str(),
                a.action.as_str(),
                status_label(a.status),
                a.message.as_deref().unwrap_or(""),
            ]
        })
        .collect();
    output.push('\n');
    output.push_str(&table(&["Path", "Action", "Status", "Message"], &rows));
    output
}

/// The line shown when a report carries a failure.
pub fn failure_line(report: &UpdateReport) -> Option<String> {
    report
        .first_failure_message()
        .map(|message| format!("Update failed: {}", message))
}

fn status_label(status: ActionStatus) -> &'static str {
    match status {
        ActionStatus::Success => "Success",
        ActionStatus::Skipped => "Skipped",
        ActionStatus::Failed => "Failed",
    }
}

fn table(header: &[&str], rows: &[Vec<&str>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut output = line(header);
    output.push('\n');
    output.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    output.push('\n');
    for row in rows {
        output.push_str(&line(row.as_slice()));
        output.push('\n');
    }
    output
}
