/// Keeps the top-left `max_rows` x `max_columns` corner of a grid.
///
/// Rows shorter than the limit are left as they are.
pub fn clip_grid(grid: Vec<Vec<String>>, max_rows: usize, max_columns: usize) -> Vec<Vec<String>> {
    grid.into_iter()
        .take(max_rows)
        .map(|mut row| {
            row.truncate(max_columns);
            row
        })
        .collect()
}

/// Pads a grid that does not start at the first cell of the sheet.
pub fn anchor_grid(grid: Vec<Vec<String>>, first_row: usize, first_column: usize) -> Vec<Vec<String>> {
    let mut res: Vec<Vec<String>> = vec![vec![]; first_row];
    for row in grid {
        let mut padded: Vec<String> = vec!["".to_string(); first_column];
        padded.extend(row);
        res.push(padded);
    }
    res
}
