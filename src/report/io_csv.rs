// Primitives for reading CSV files.

use std::fs::File;

use crate::report::{io_common::assemble_roster, *};

pub fn read_csv_roster(path: &str, source: &RosterSource) -> BReportResult<Vec<RosterRecord>> {
    let columns = source.columns()?;
    let (records, row_offset) = get_records(path, source)?;

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_roster: lineno: {:?} row: {:?}", lineno, line);
        rows.push((lineno, line.iter().map(|s| s.to_string()).collect()));
    }
    assemble_roster(path, rows, &columns)
}

fn get_records(
    path: &str,
    source: &RosterSource,
) -> ReportResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let first_row = source.first_row_index()?;
    // Spreadsheet exports drop the trailing empty cells: rows may have any length.
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    for _ in 0..first_row {
        _ = records.next();
    }
    Ok((records, first_row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_path(test_name: &str, file: &str) -> String {
        format!("{}/testdata/{}/{}", env!("CARGO_MANIFEST_DIR"), test_name, file)
    }

    #[test]
    fn reads_default_layout() {
        let path = roster_path("ties_and_unmatched", "roster.csv");
        let source = RosterSource::from_path(&path, None);
        let roster = read_csv_roster(&path, &source).unwrap();
        assert_eq!(
            roster,
            vec![
                RosterRecord {
                    login: "Ann ".to_string(),
                    name: "Ann Smith".to_string(),
                    school: "School 1".to_string(),
                },
                RosterRecord {
                    login: "bob".to_string(),
                    name: "Bob Jones".to_string(),
                    school: "School 2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn missing_file() {
        let source = RosterSource::from_path("does-not-exist.csv", None);
        let res = read_csv_roster("does-not-exist.csv", &source);
        assert!(matches!(res.map_err(|e| *e), Err(ReportError::CsvOpen { .. })));
    }
}
