// econdata/src/commands/summary.rs
//
// End-of-run tables printed to the terminal.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use econdata_core::application::{IngestReport, RunResult};

pub fn ingest_table(report: &IngestReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Source", "Bytes"]);
    for source in &report.sources {
        table.add_row(vec![Cell::new(&source.name), Cell::new(source.bytes)]);
    }
    table
}

pub fn publish_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Dataset", "Rows", "Dropped", "Status"]);
    for dataset in &result.published {
        table.add_row(vec![
            Cell::new(&dataset.dataset_id),
            Cell::new(dataset.rows),
            Cell::new(dataset.rows_dropped),
            Cell::new("published"),
        ]);
    }
    // Errors are recorded as "<dataset>: <message>"
    for err in &result.errors {
        let dataset = err.split_once(": ").map_or(err.as_str(), |(id, _)| id);
        table.add_row(vec![
            Cell::new(dataset),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new("failed"),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use econdata_core::application::PublishedDataset;

    #[test]
    fn test_publish_table_lists_successes_then_failures() {
        let result = RunResult {
            success: false,
            datasets_published: 1,
            errors: vec!["freddie_mac_mortgage_rates: Validation failed".into()],
            published: vec![PublishedDataset {
                dataset_id: "big_mac_index".into(),
                rows: 1_946,
                rows_dropped: 3,
            }],
            ingest: None,
        };

        let rendered = publish_table(&result).to_string();
        let big_mac = rendered.find("big_mac_index").unwrap_or(usize::MAX);
        let pmms = rendered.find("freddie_mac_mortgage_rates").unwrap_or(0);
        assert!(big_mac < pmms, "{rendered}");
        assert!(rendered.contains("1946"));
        assert!(rendered.contains("failed"));
        assert!(!rendered.contains("Validation failed"));
    }
}
