// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A person whose preferences are recorded in the spreadsheet.
///
/// `votes` holds one entry per place, in place order. The entries are
/// normalized so that their absolute values sum to 1 (or are all zero when
/// the person did not vote at all).
#[derive(PartialEq, Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub votes: Vec<f64>,
}

/// A candidate outcome that can be drawn.
#[derive(PartialEq, Debug, Clone)]
pub struct Place {
    pub name: String,
    /// Informational only, it does not take part in the weighting.
    pub time: f64,
}

/// The parsed content of a voting spreadsheet.
///
/// It is built once per query and never modified afterwards. The index of
/// each place matches the index in every participant's `votes`.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct SheetData {
    pub participants: Vec<Participant>,
    pub places: Vec<Place>,
}

impl SheetData {
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    pub fn place_names(&self) -> Vec<String> {
        self.places.iter().map(|p| p.name.clone()).collect()
    }
}

// ******** Output data structures *********

#[derive(PartialEq, Debug, Clone)]
pub struct Chance {
    pub place: String,
    pub weight: f64,
    pub percentage: f64,
}

/// The outcome of one computation.
///
/// `participants` lists the included people in spreadsheet order and
/// `chances` is sorted by decreasing weight.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ChoiceSet {
    pub participants: Vec<String>,
    pub chances: Vec<Chance>,
}

impl ChoiceSet {
    pub fn places(&self) -> Vec<String> {
        self.chances.iter().map(|c| c.place.clone()).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.chances.iter().map(|c| c.weight).collect()
    }

    pub fn percentages(&self) -> Vec<f64> {
        self.chances.iter().map(|c| c.percentage).collect()
    }

    /// A one-line description of the places that have a chance to be drawn.
    pub fn summary(&self) -> String {
        self.chances
            .iter()
            .filter(|c| c.weight > 0.0)
            .map(|c| format!("{} {:.2}%", c.place, c.percentage))
            .collect::<Vec<String>>()
            .join(", ")
    }
}

/// Problems with the layout of the input grid.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ParseError {
    EmptyGrid,
    MissingHeaderRow { header_row: usize, num_rows: usize },
    NoParticipantColumns { header_row: usize, first_column: usize },
}

/// Errors that prevent a computation from completing.
///
/// `NoParticipants` and `NoValidChoices` are expected outcomes of a query
/// and should be reported to the user. `Parse` means that the spreadsheet
/// does not match the configured layout.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ChoiceError {
    Parse(ParseError),
    NoParticipants,
    NoValidChoices,
}

impl Error for ChoiceError {}

impl Display for ChoiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChoiceError::Parse(ParseError::EmptyGrid) => write!(f, "the grid is empty"),
            ChoiceError::Parse(ParseError::MissingHeaderRow {
                header_row,
                num_rows,
            }) => write!(
                f,
                "header row {} is missing (the grid has {} rows)",
                header_row, num_rows
            ),
            ChoiceError::Parse(ParseError::NoParticipantColumns {
                header_row,
                first_column,
            }) => write!(
                f,
                "no participant name in row {} from column {}",
                header_row, first_column
            ),
            ChoiceError::NoParticipants => write!(f, "no participant matched the query"),
            ChoiceError::NoValidChoices => write!(f, "no place received a positive vote"),
        }
    }
}

impl From<ParseError> for ChoiceError {
    fn from(e: ParseError) -> Self {
        ChoiceError::Parse(e)
    }
}

// ********* Configuration **********

/// How the mean vote of a place is turned into a weight.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub enum WeightPolicy {
    /// The mean itself, floored at zero.
    #[default]
    Continuous,
    /// Whole multiples of `threshold`, floored at zero. Small differences
    /// between places end up in the same tier.
    Bucketed { threshold: f64 },
}

impl WeightPolicy {
    pub const DEFAULT_THRESHOLD: f64 = 0.05;
}

/// Where the participants, votes and places live in the grid.
///
/// All indexes start at 0.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct LayoutConfig {
    pub header_row: usize,
    pub first_participant_column: usize,
    pub first_place_row: usize,
    pub place_name_column: usize,
    pub place_time_column: usize,
}

impl LayoutConfig {
    /// Names in D1 onwards, places in A3:A, times in B3:B.
    pub const LAYOUT_A: LayoutConfig = LayoutConfig {
        header_row: 0,
        first_participant_column: 3,
        first_place_row: 2,
        place_name_column: 0,
        place_time_column: 1,
    };

    /// Names in E1 onwards, places in C3:C, times in D3:D.
    pub const LAYOUT_B: LayoutConfig = LayoutConfig {
        header_row: 0,
        first_participant_column: 4,
        first_place_row: 2,
        place_name_column: 2,
        place_time_column: 3,
    };
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig::LAYOUT_A
    }
}
