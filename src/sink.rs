use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DatasetError;
use crate::record::{ReviewRecord, CORE_FIELDS};

/// A CSV file held in memory: header row plus equally sized data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Core fields, then every attribute label in order of first appearance.
pub fn column_superset(records: &[ReviewRecord]) -> Vec<String> {
    let mut columns: Vec<String> = CORE_FIELDS.iter().map(|c| c.to_string()).collect();
    let mut seen: HashSet<&str> = CORE_FIELDS.into_iter().collect();
    for (label, _) in records.iter().flat_map(|r| &r.attributes) {
        if seen.insert(label.as_str()) {
            columns.push(label.clone());
        }
    }
    columns
}

/// Flatten records onto their column superset; absent attributes are empty cells.
pub fn records_to_table(records: &[ReviewRecord]) -> Table {
    let headers = column_superset(records);
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            headers
                .iter()
                .map(|h| r.get(h).unwrap_or_default().to_string())
                .collect()
        })
        .collect();
    Table { headers, rows }
}

pub fn write_records(path: &Path, records: &[ReviewRecord]) -> Result<(), DatasetError> {
    write_table(path, &records_to_table(records))
}

pub fn read_table(path: &Path) -> Result<Table, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|row| row.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
    Ok(Table { headers, rows })
}

/// Write through a sibling temp file so a failed write never truncates `path`.
pub fn write_table(path: &Path, table: &Table) -> Result<(), DatasetError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = write_csv(&tmp, table).and_then(|()| fs::rename(&tmp, path).map_err(DatasetError::from));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_csv(path: &Path, table: &Table) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(author: &str, attrs: &[(&str, &str)]) -> ReviewRecord {
        let mut r = ReviewRecord {
            author: author.to_string(),
            ..Default::default()
        };
        for (k, v) in attrs {
            r.set_attribute(k.to_string(), v.to_string());
        }
        r
    }

    #[test]
    fn superset_in_first_seen_order() {
        let records = vec![
            record("a", &[("Seat Type", "Economy"), ("Seat Comfort", "3")]),
            record("b", &[("Route", "LHR to JFK"), ("Seat Type", "Business")]),
        ];
        let cols = column_superset(&records);
        assert_eq!(
            &cols[CORE_FIELDS.len()..],
            ["Seat Type", "Seat Comfort", "Route"]
        );
    }

    #[test]
    fn missing_attributes_are_empty_cells() {
        let records = vec![
            record("a", &[("Seat Comfort", "3")]),
            record("b", &[("Route", "LHR to JFK")]),
        ];
        let table = records_to_table(&records);
        let comfort = table.column("Seat Comfort").unwrap();
        let route = table.column("Route").unwrap();
        assert_eq!(table.rows[0][route], "");
        assert_eq!(table.rows[1][comfort], "");
        assert_eq!(table.rows[1][route], "LHR to JFK");
    }

    #[test]
    fn empty_record_set_writes_core_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seat_reviews.csv");
        write_records(&path, &[]).unwrap();
        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, CORE_FIELDS);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn write_then_read_preserves_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("airline_reviews.csv");
        let mut r = record("Jo, \"JJ\" Smith", &[("Recommended", "no")]);
        r.review = "Line one\nline two".to_string();
        write_records(&path, &[r]).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][table.column("Author").unwrap()], "Jo, \"JJ\" Smith");
        assert_eq!(table.rows[0][table.column("Review").unwrap()], "Line one\nline two");
        assert_eq!(table.rows[0][table.column("Date").unwrap()], "N/A");
        assert!(!dir.path().join("nested").join("airline_reviews.csv.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airline_reviews.csv");
        // A non-empty directory in the way makes the final rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "").unwrap();

        let err = write_records(&path, &[record("a", &[])]).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
        assert!(!dir.path().join("airline_reviews.csv.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn ragged_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_reviews.csv");
        fs::write(&path, "Author,Country\nA,UK\nB\n").unwrap();
        assert!(matches!(read_table(&path), Err(DatasetError::Csv(_))));
    }
}
