// Primitives for reading CSV exports of the voting sheet.

use std::io::Read;

use crate::bot::*;

pub fn read_csv_grid(path: &str) -> BotResult<Vec<Vec<String>>> {
    let rdr = reader_builder()
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_records(rdr, path)
}

// No header line, and rows may have any length.
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}

fn read_records<R: Read>(rdr: csv::Reader<R>, path: &str) -> BotResult<Vec<Vec<String>>> {
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // Lines are numbered from 1 like in a spreadsheet.
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_csv_grid: lineno: {:?} row: {:?}", lineno, line);
        res.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(res)
}
