//! CSV export of search hits.

use nodemorph_core::names::{PN_PRIMARY_TYPE, PN_TITLE};

use crate::filter::Projection;
use crate::result::Hit;

/// File name used when the export is written to disk.
pub const CSV_FILE_NAME: &str = "nodemorph-search-results.csv";

/// Placeholder for a projected property the hit does not carry.
const MISSING: &str = "-";

/// Render hits as CSV: a `Path` column followed by one column per projected
/// property. Every field is quoted; rows are joined by `\n`.
///
/// Returns `None` for an empty hit list, so callers produce no file.
pub fn to_csv(hits: &[Hit], projection: &Projection) -> Option<String> {
    if hits.is_empty() {
        return None;
    }

    let mut header = vec!["Path"];
    header.extend(projection.headers());

    let mut rows = Vec::with_capacity(hits.len() + 1);
    rows.push(csv_row(header));
    for hit in hits {
        rows.push(csv_row(row_cells(hit, projection)));
    }
    Some(rows.join("\n"))
}

/// Display cells of one hit: its path, then one cell per projected property.
pub fn row_cells<'h>(hit: &'h Hit, projection: &Projection) -> Vec<&'h str> {
    let mut row = vec![hit.path().unwrap_or(MISSING)];
    match projection {
        Projection::Default => {
            row.push(non_empty(hit.get(PN_TITLE)));
            row.push(hit.get(PN_PRIMARY_TYPE).unwrap_or(""));
        }
        Projection::Custom(names) => {
            row.extend(names.iter().map(|name| non_empty(hit.get(name))));
        }
    }
    row
}

fn non_empty(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => MISSING,
    }
}

fn csv_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
