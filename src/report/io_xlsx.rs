use crate::report::{io_common::assemble_roster, *};

pub fn read_xlsx_roster(path: &str, source: &RosterSource) -> BReportResult<Vec<RosterRecord>> {
    let columns = source.columns()?;
    let first_row = source.first_row_index()?;
    let wrange = get_range(path, source)?;

    // The range starts at the first used cell, not at A1.
    let (start_row, start_col) = match wrange.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => (0, 0),
    };
    debug!(
        "read_xlsx_roster: path: {:?} start: {:?} first_row: {:?}",
        path,
        (start_row, start_col),
        first_row
    );

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let row_index = start_row + idx;
        if row_index < first_row {
            continue;
        }
        let mut cells: Vec<String> = vec![String::new(); start_col];
        cells.extend(row.iter().map(read_cell));
        debug!("read_xlsx_roster: row {:?}: {:?}", row_index + 1, cells);
        rows.push((row_index + 1, cells));
    }
    assemble_roster(path, rows, &columns)
}

fn get_range(path: &str, source: &RosterSource) -> BReportResult<calamine::Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = source.worksheet_name.as_ref() {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyRosterSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}

/// The text of a cell, as shown by the spreadsheet.
fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        // Numbers typed in a cell (a school number, a numeric login) are stored as floats.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => "".to_string(),
        _ => {
            warn!("read_cell: could not understand cell {:?}", cell);
            "".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(read_cell(&DataType::String(" ann ".to_string())), " ann ");
        assert_eq!(read_cell(&DataType::Float(57.0)), "57");
        assert_eq!(read_cell(&DataType::Float(2.5)), "2.5");
        assert_eq!(read_cell(&DataType::Int(1543)), "1543");
        assert_eq!(read_cell(&DataType::Bool(true)), "true");
        assert_eq!(read_cell(&DataType::Empty), "");
    }

    #[test]
    fn missing_workbook() {
        let source = RosterSource::from_path("does-not-exist.xlsx", None);
        let res = read_xlsx_roster("does-not-exist.xlsx", &source);
        assert!(matches!(
            res.map_err(|e| *e),
            Err(ReportError::OpeningExcel { .. })
        ));
    }
}
