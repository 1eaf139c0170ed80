use crate::report::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Builds a roster record out of the cells of a row.
///
/// Trailing empty cells do not count: a row that is too short to contain
/// all the fields is skipped.
pub fn roster_record(cells: &[String], columns: &RosterColumns) -> Option<RosterRecord> {
    let filled_len = cells
        .iter()
        .rposition(|c| !c.trim().is_empty())
        .map(|idx| idx + 1)
        .unwrap_or(0);
    if filled_len < columns.min_row_len() {
        return None;
    }
    Some(RosterRecord {
        login: cells[columns.login].clone(),
        name: cells[columns.name].clone(),
        school: cells[columns.school].clone(),
    })
}

/// Collects the records of the rows, skipping the incomplete ones.
pub fn assemble_roster(
    path: &str,
    rows: Vec<(usize, Vec<String>)>,
    columns: &RosterColumns,
) -> BReportResult<Vec<RosterRecord>> {
    if rows.is_empty() {
        return Err(Box::new(ReportError::EmptyRoster {
            path: path.to_string(),
        }));
    }
    let file_name = simplify_file_name(path);
    let mut res: Vec<RosterRecord> = Vec::new();
    for (lineno, cells) in rows.iter() {
        match roster_record(cells, columns) {
            Some(record) => res.push(record),
            None => debug!(
                "assemble_roster: {}:{}: skipping incomplete row {:?}",
                file_name, lineno, cells
            ),
        }
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: RosterColumns = RosterColumns {
        name: 0,
        school: 1,
        login: 3,
    };

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn complete_row() {
        let record = roster_record(&cells(&["Ann", "School 1", "10", " ann "]), &COLUMNS);
        assert_eq!(
            record,
            Some(RosterRecord {
                login: " ann ".to_string(),
                name: "Ann".to_string(),
                school: "School 1".to_string(),
            })
        );
    }

    #[test]
    fn short_rows_are_skipped() {
        assert_eq!(roster_record(&cells(&["Ann", "School 1", "10"]), &COLUMNS), None);
        assert_eq!(
            roster_record(&cells(&["Ann", "School 1", "10", "", ""]), &COLUMNS),
            None
        );
        assert_eq!(roster_record(&cells(&[]), &COLUMNS), None);
    }

    #[test]
    fn empty_roster_is_an_error() {
        let res = assemble_roster("roster.csv", vec![], &COLUMNS);
        assert!(matches!(
            res.map_err(|e| *e),
            Err(ReportError::EmptyRoster { .. })
        ));
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/a/b/roster.xlsx"), "roster.xlsx");
        assert_eq!(simplify_file_name("roster.csv"), "roster.csv");
    }
}
