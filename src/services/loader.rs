//! Dataset loading
//!
//! Rows come from a JSON array or a CSV file with a header row. Without a
//! path, the sample dataset compiled into the binary is used. Records that
//! cannot be read as a row are skipped with a warning.

use crate::model::{DataSource, Row};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Sample dataset shipped with the binary
pub const SAMPLE_DATA: &str = include_str!("../../data/data.json");

/// Load rows from `path`, or the sample dataset when no path is given
pub fn load_rows(path: Option<&Path>) -> Result<(Vec<Row>, DataSource)> {
    let Some(path) = path else {
        let rows = parse_json(SAMPLE_DATA).context("Failed to parse embedded sample data")?;
        info!(rows = rows.len(), "loaded embedded sample data");
        return Ok((rows, DataSource::Embedded));
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "json" => parse_json(&contents),
        "csv" => parse_csv(&contents),
        other => bail!(
            "Unsupported data file type '{}' for {} (expected .json or .csv)",
            other,
            path.display()
        ),
    }
    .with_context(|| format!("Failed to parse data file {}", path.display()))?;

    info!(rows = rows.len(), path = %path.display(), "loaded data file");
    Ok((rows, DataSource::File(path.to_path_buf())))
}

/// Parse a JSON array of row objects
pub fn parse_json(contents: &str) -> Result<Vec<Row>> {
    let values: Vec<Value> =
        serde_json::from_str(contents).context("Expected a JSON array of rows")?;

    let rows = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Row>(value) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed row");
                None
            }
        })
        .collect();

    Ok(rows)
}

/// Parse CSV with a header row naming the columns
pub fn parse_csv(contents: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader.headers().context("Missing CSV header row")?.clone();
    if !headers.iter().any(|h| h == "name") {
        warn!(?headers, "CSV header has no 'name' column, search will match nothing");
    }

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<Row>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => warn!(index, error = %e, "skipping malformed CSV record"),
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{row::Amount, Status};

    #[test]
    fn test_parse_json_rows() {
        let rows = parse_json(
            r#"[
                {"id": 1, "name": "Bob", "date": "2024-01-01", "status": "Active", "amount": 50},
                {"id": 2, "name": "Amy", "date": "2024-01-02", "status": "Closed", "amount": "20"}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Bob");
        assert_eq!(rows[1].status, Status::Other("Closed".to_string()));
        assert_eq!(rows[1].amount, Amount::Number(20.0));
    }

    #[test]
    fn test_parse_json_skips_malformed_rows() {
        let rows = parse_json(r#"[{"id": 1, "name": "Bob"}, 42, {"id": "x"}, {"name": "Amy"}]"#)
            .unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Amy"]);
    }

    #[test]
    fn test_parse_json_keeps_rows_with_non_string_fields() {
        let rows = parse_json(
            r#"[
                {"id": 1, "name": "Amy", "date": "2024-01-01", "status": null, "amount": 10},
                {"id": 2, "name": "Bob", "date": "2024-01-02", "status": 3, "amount": 20},
                {"id": 3, "name": "Cal", "date": 20240103, "status": "Inactive", "amount": 30},
                {"id": 4, "name": "Dee", "date": "2024-01-04", "status": "Active", "amount": 40}
            ]"#,
        )
        .unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Bob", "Cal", "Dee"]);
        assert_eq!(rows[0].status, Status::Other(String::new()));
        assert_eq!(rows[1].status, Status::Other("3".to_string()));
        assert_eq!(rows[2].date, "20240103");
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(parse_json(r#"{"id": 1}"#).is_err());
        assert!(parse_json("not json").is_err());
    }

    #[test]
    fn test_parse_csv_rows() {
        let csv = "id,name,date,status,amount\n\
                   1, Bob ,2024-01-01,Active,50\n\
                   2,Amy,2024-01-02,Inactive,12.5\n\
                   3,Cal,2024-01-03,Pending,n/a\n";

        let rows = parse_csv(csv).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].name, "Bob");
        assert_eq!(rows[1].status, Status::Inactive);
        assert_eq!(rows[1].amount, Amount::Number(12.5));
        assert_eq!(rows[2].amount, Amount::Text("n/a".to_string()));
    }

    #[test]
    fn test_parse_csv_non_finite_amounts_are_text() {
        let rows = parse_csv("id,name,amount\n1,Amy,NaN\n2,Bob,inf\n3,Cal,7\n").unwrap();

        let amounts: Vec<_> = rows.iter().map(|r| r.amount.clone()).collect();
        assert_eq!(
            amounts,
            vec![
                Amount::Text("NaN".to_string()),
                Amount::Text("inf".to_string()),
                Amount::Number(7.0),
            ]
        );
    }

    #[test]
    fn test_parse_csv_skips_bad_records() {
        let csv = "id,name,amount\nabc,Bob,1\n2,Amy,3\n";

        let rows = parse_csv(csv).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Amy");
    }

    #[test]
    fn test_sample_data_loads() {
        let (rows, source) = load_rows(None).unwrap();

        assert_eq!(source, DataSource::Embedded);
        assert!(rows.len() > 10);
        assert!(rows.iter().all(|r| !r.name.is_empty()));
    }

    #[test]
    fn test_load_rows_from_files() {
        let dir = std::env::temp_dir().join(format!("data-table-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("rows.json");
        fs::write(&json_path, r#"[{"id": 1, "name": "Bob", "amount": 5}]"#).unwrap();
        let (rows, source) = load_rows(Some(json_path.as_path())).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(source, DataSource::File(json_path.clone()));

        let csv_path = dir.join("rows.CSV");
        fs::write(&csv_path, "id,name\n1,Bob\n2,Amy\n").unwrap();
        let (rows, _) = load_rows(Some(csv_path.as_path())).unwrap();
        assert_eq!(rows.len(), 2);

        let txt_path = dir.join("rows.txt");
        fs::write(&txt_path, "id,name\n").unwrap();
        assert!(load_rows(Some(txt_path.as_path())).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_rows_missing_file() {
        let err = load_rows(Some(Path::new("/nonexistent/rows.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read data file"));
    }
}
