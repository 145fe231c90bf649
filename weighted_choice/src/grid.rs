// Primitives for reading the voting grid.

use log::{debug, info};

use crate::config::*;
use crate::number::{parse_cell_or_default, NumberFormat};

/// Reads the participants and places out of a grid of cells.
///
/// The header row gives one participant per non-empty cell starting at
/// `layout.first_participant_column`. The rows from `layout.first_place_row`
/// to the end of the grid are the places; each participant's votes are read
/// in the column of their name.
pub fn parse_grid(
    grid: &[Vec<String>],
    layout: &LayoutConfig,
    format: &NumberFormat,
) -> Result<SheetData, ChoiceError> {
    if grid.is_empty() {
        return Err(ParseError::EmptyGrid.into());
    }
    let header = grid.get(layout.header_row).ok_or(ParseError::MissingHeaderRow {
        header_row: layout.header_row,
        num_rows: grid.len(),
    })?;
    debug!("parse_grid: header: {:?}", header);

    // (column, name)
    let columns: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .skip(layout.first_participant_column)
        .filter(|(_, cell)| !cell.trim().is_empty())
        .map(|(col, cell)| (col, cell.trim().to_string()))
        .collect();
    if columns.is_empty() {
        return Err(ParseError::NoParticipantColumns {
            header_row: layout.header_row,
            first_column: layout.first_participant_column,
        }
        .into());
    }

    let rows: &[Vec<String>] = grid.get(layout.first_place_row..).unwrap_or(&[]);

    let participants: Vec<Participant> = columns
        .iter()
        .map(|(col, name)| {
            let raw: Vec<f64> = rows
                .iter()
                .map(|row| parse_cell_or_default(row, *col, format))
                .collect();
            debug!("parse_grid: {} (column {}): raw votes {:?}", name, col, raw);
            Participant {
                name: name.clone(),
                votes: normalize_votes(&raw),
            }
        })
        .collect();

    let places: Vec<Place> = rows
        .iter()
        .map(|row| Place {
            name: row
                .get(layout.place_name_column)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            time: parse_cell_or_default(row, layout.place_time_column, format),
        })
        .collect();

    info!(
        "parse_grid: {} participants, {} places",
        participants.len(),
        places.len()
    );
    Ok(SheetData {
        participants,
        places,
    })
}

/// Same as [parse_grid], with the number format taken from a locale tag.
pub fn parse_sheet(
    grid: &[Vec<String>],
    layout: &LayoutConfig,
    locale: &str,
) -> Result<SheetData, ChoiceError> {
    parse_grid(grid, layout, &NumberFormat::from_locale(locale))
}

/// Scales the votes so that their absolute values sum to 1.
///
/// A person who left every cell empty (or at zero) gets zeros everywhere.
pub fn normalize_votes(raw: &[f64]) -> Vec<f64> {
    let sum_of_abs: f64 = raw.iter().map(|v| v.abs()).sum();
    if sum_of_abs == 0.0 {
        debug!("normalize_votes: no vote recorded");
        return vec![0.0; raw.len()];
    }
    raw.iter().map(|v| v / sum_of_abs).collect()
}
