use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::bot::{io_common::anchor_grid, *};

/// Reads one worksheet of an Excel workbook as text cells.
///
/// Numbers are written back with the decimal separator of `format`, so that
/// they are read the same way as the cells of a CSV export.
pub fn read_excel_grid(
    path: &str,
    worksheet_name: &str,
    format: &NumberFormat,
) -> BotResult<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range(worksheet_name)
        .context(MissingWorksheetSnafu {
            name: worksheet_name,
            path,
        })?
        .context(OpeningExcelSnafu { path })?;
    debug!(
        "read_excel_grid: worksheet {:?} start {:?} size {:?}",
        worksheet_name,
        wrange.start(),
        wrange.get_size()
    );

    let grid: Vec<Vec<String>> = wrange
        .rows()
        .map(|row| row.iter().map(|cell| cell_text(cell, format)).collect())
        .collect();
    // The range starts at the first used cell, not necessarily A1.
    let (first_row, first_column) = wrange.start().unwrap_or((0, 0));
    Ok(anchor_grid(grid, first_row as usize, first_column as usize))
}

fn cell_text(cell: &DataType, format: &NumberFormat) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) | DataType::DateTime(f) => number_text(*f, format),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => "".to_string(),
        _ => {
            debug!("cell_text: unreadable cell {:?}", cell);
            "".to_string()
        }
    }
}

fn number_text(x: f64, format: &NumberFormat) -> String {
    let s = x.to_string();
    if format.decimal_separator == '.' {
        s
    } else {
        s.replace('.', &format.decimal_separator.to_string())
    }
}
