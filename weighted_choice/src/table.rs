// Plain text rendering of a choice set.

use crate::config::{ChoiceSet, WeightPolicy};

/// Options for [render_table].
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct TableOptions {
    /// Names with this many characters or more are shortened.
    pub max_name_length: usize,
    /// Stop at the first place that cannot be drawn. The rows are sorted,
    /// so nothing below it can be drawn either.
    pub hide_zeroes: bool,
    /// Bucketed weights are shown in their own column.
    pub policy: WeightPolicy,
}

impl TableOptions {
    pub const DEFAULT_MAX_NAME_LENGTH: usize = 16;
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            max_name_length: TableOptions::DEFAULT_MAX_NAME_LENGTH,
            hide_zeroes: false,
            policy: WeightPolicy::Continuous,
        }
    }
}

const PLACE_HEADER: &str = "Sitio";
const WEIGHT_HEADER: &str = "Peso";
const PERCENTAGE_HEADER: &str = "%";

enum Align {
    Left,
    Right,
}

/// Renders the chances as a table of place, (weight,) and percentage.
///
/// ```text
/// Sitio          %
/// --------  ------
/// Beach     100.00
/// Mountain    0.00
/// ```
pub fn render_table(choices: &ChoiceSet, options: &TableOptions) -> String {
    let bucketed = matches!(options.policy, WeightPolicy::Bucketed { .. });

    let mut rows: Vec<Vec<String>> = Vec::new();
    for chance in choices.chances.iter() {
        if options.hide_zeroes {
            let cannot_win = if bucketed {
                chance.weight == 0.0
            } else {
                chance.percentage < 0.01
            };
            if cannot_win {
                break;
            }
        }
        let mut row = vec![shorten(&chance.place, options.max_name_length)];
        if bucketed {
            row.push(format!("{:.2}", chance.weight));
        }
        row.push(format!("{:.2}", chance.percentage));
        rows.push(row);
    }

    let (headers, aligns): (Vec<&str>, Vec<Align>) = if bucketed {
        (
            vec![PLACE_HEADER, WEIGHT_HEADER, PERCENTAGE_HEADER],
            vec![Align::Left, Align::Right, Align::Right],
        )
    } else {
        (
            vec![PLACE_HEADER, PERCENTAGE_HEADER],
            vec![Align::Left, Align::Right],
        )
    };
    format_columns(&headers, &aligns, &rows)
}

/// Keeps the beginning of a long name and marks the cut with `...`.
pub fn shorten(name: &str, max_len: usize) -> String {
    if name.chars().count() < max_len {
        name.to_string()
    } else {
        let kept: String = name.chars().take(max_len.saturating_sub(4)).collect();
        format!("{}...", kept)
    }
}

fn format_columns(headers: &[&str], aligns: &[Align], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            rows.iter()
                .filter_map(|r| r.get(idx))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| -> String { cells.join("  ").trim_end().to_string() };
    let pad = |text: &str, width: usize, align: &Align| -> String {
        match align {
            Align::Left => format!("{:<width$}", text, width = width),
            Align::Right => format!("{:>width$}", text, width = width),
        }
    };

    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 2);
    lines.push(line(
        headers
            .iter()
            .zip(widths.iter().zip(aligns.iter()))
            .map(|(h, (w, a))| pad(*h, *w, a))
            .collect(),
    ));
    lines.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows.iter() {
        lines.push(line(
            row.iter()
                .zip(widths.iter().zip(aligns.iter()))
                .map(|(c, (w, a))| pad(c.as_str(), *w, a))
                .collect(),
        ));
    }
    lines.join("\n")
}
