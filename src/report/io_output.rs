use crate::report::*;

/// The report as CSV text, header first.
pub fn report_to_csv(report: &Report) -> BReportResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    wtr.write_record(&report.header)
        .context(CsvWriteSnafu {})?;
    for line in report.body.iter() {
        wtr.write_record(line).context(CsvWriteSnafu {})?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context(WritingOutputSnafu { path: "<report>" })?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Writes the report to the given file, or to the standard output for `stdout`.
pub fn write_output(report_csv: &str, out_path: &str) -> BReportResult<()> {
    if out_path == "stdout" {
        print!("{}", report_csv);
        return Ok(());
    }
    if let Some(parent) = Path::new(out_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingOutputSnafu {
                path: parent.display().to_string(),
            })?;
        }
    }
    fs::write(out_path, report_csv).context(WritingOutputSnafu { path: out_path })?;
    info!("Report written to {:?}", out_path);
    Ok(())
}
