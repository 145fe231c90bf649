/*!
Weighted random choices out of a shared voting spreadsheet.

Every participant spreads a signed preference over a list of places in one
column of the spreadsheet. This crate reads that grid, aggregates the
preferences of the people who are present, and draws a place at random
with a probability proportional to the combined preference.

```
use weighted_choice::*;

let grid: Vec<Vec<String>> = vec![
    vec!["Sitio", "Tiempo", "", "Ana", "Bea"],
    vec![],
    vec!["Beach", "30", "", "2", "1"],
    vec!["Mountain", "60", "", "-2", "1"],
]
.into_iter()
.map(|r| r.into_iter().map(String::from).collect())
.collect();

let sheet = parse_sheet(&grid, &LayoutConfig::LAYOUT_A, "es_ES")?;
let choices = compute_choices(&sheet, &[], &WeightPolicy::Continuous)?;
assert_eq!(choices.places(), vec!["Beach", "Mountain"]);
assert_eq!(choices.percentages(), vec![100.0, 0.0]);

// Only one place has a positive weight.
assert_eq!(draw_name(&choices)?, "Beach");
# Ok::<(), ChoiceError>(())
```
*/

mod config;
pub mod grid;
pub mod number;
pub mod table;

use deunicode::deunicode;
use log::{debug, info};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::HashSet;

pub use crate::config::*;
pub use crate::grid::{parse_grid, parse_sheet};
pub use crate::number::NumberFormat;
pub use crate::table::{render_table, TableOptions};

/// Folds a name for comparison: transliterated to ASCII, lower case, no
/// surrounding whitespace. "José " and "jose" fold to the same string, and
/// so do "Łukasz" and "lukasz".
pub fn normalize_name(name: &str) -> String {
    deunicode(name.trim()).to_lowercase()
}

/// Computes the chance of every place for the selected participants.
///
/// Arguments:
/// * `sheet` the parsed spreadsheet
/// * `filter` the names of the people to include. When empty, everybody is
/// included. Names are compared without case or accents, and names that
/// match nobody are ignored.
/// * `policy` how the mean vote of a place becomes a weight
///
/// Fails with [ChoiceError::NoParticipants] when nobody is selected, and
/// with [ChoiceError::NoValidChoices] when no place ends up with a positive
/// weight.
pub fn compute_choices(
    sheet: &SheetData,
    filter: &[String],
    policy: &WeightPolicy,
) -> Result<ChoiceSet, ChoiceError> {
    let included: Vec<&Participant> = select_participants(&sheet.participants, filter);
    if included.is_empty() {
        info!("compute_choices: no participant matched {:?}", filter);
        return Err(ChoiceError::NoParticipants);
    }
    debug!(
        "compute_choices: {} participants, {} places, policy {:?}",
        included.len(),
        sheet.places.len(),
        policy
    );

    let mut chances: Vec<Chance> = Vec::with_capacity(sheet.places.len());
    for (idx, place) in sheet.places.iter().enumerate() {
        let votes: Vec<f64> = included
            .iter()
            .map(|p| p.votes.get(idx).cloned().unwrap_or(0.0))
            .collect();
        let mean = votes.iter().sum::<f64>() / (votes.len() as f64);
        let weight = place_weight(mean, policy);
        debug!(
            "compute_choices: {}: votes {:?} mean {} weight {}",
            place.name, votes, mean, weight
        );
        chances.push(Chance {
            place: place.name.clone(),
            weight,
            percentage: 0.0,
        });
    }

    let total_weight: f64 = chances.iter().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        info!("compute_choices: all the weights are zero");
        return Err(ChoiceError::NoValidChoices);
    }
    for chance in chances.iter_mut() {
        chance.percentage = chance.weight / total_weight * 100.0;
    }

    // Stable: ties keep the order of the spreadsheet.
    chances.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    Ok(ChoiceSet {
        participants: included.iter().map(|p| p.name.clone()).collect(),
        chances,
    })
}

fn select_participants<'a>(
    participants: &'a [Participant],
    filter: &[String],
) -> Vec<&'a Participant> {
    if filter.is_empty() {
        return participants.iter().collect();
    }
    let wanted: HashSet<String> = filter.iter().map(|n| normalize_name(n)).collect();
    let selected: Vec<&Participant> = participants
        .iter()
        .filter(|p| wanted.contains(&normalize_name(&p.name)))
        .collect();
    if selected.len() < wanted.len() {
        let known: HashSet<String> = selected.iter().map(|p| normalize_name(&p.name)).collect();
        let unknown: Vec<&String> = wanted.iter().filter(|n| !known.contains(*n)).collect();
        debug!("select_participants: ignoring unknown names {:?}", unknown);
    }
    selected
}

// Written as a comparison so that -0.0 becomes 0.0 as well.
fn place_weight(mean: f64, policy: &WeightPolicy) -> f64 {
    let positive = if mean > 0.0 { mean } else { 0.0 };
    match policy {
        WeightPolicy::Continuous => positive,
        WeightPolicy::Bucketed { threshold } => (positive / threshold).floor(),
    }
}

/// Draws one place, using the weights as (unnormalized) probabilities.
///
/// Places with a zero weight are listed but never drawn.
pub fn draw<'a, R: Rng + ?Sized>(
    choices: &'a ChoiceSet,
    rng: &mut R,
) -> Result<&'a str, ChoiceError> {
    let dist = WeightedIndex::new(choices.chances.iter().map(|c| c.weight))
        .map_err(|_| ChoiceError::NoValidChoices)?;
    let chance = &choices.chances[dist.sample(rng)];
    debug!("draw: {} ({:.2}%)", chance.place, chance.percentage);
    Ok(chance.place.as_str())
}

/// Draws one place with the thread-local generator.
pub fn draw_name(choices: &ChoiceSet) -> Result<&str, ChoiceError> {
    draw(choices, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn person(name: &str, raw: &[f64]) -> Participant {
        Participant {
            name: name.to_string(),
            votes: grid::normalize_votes(raw),
        }
    }

    fn place(name: &str) -> Place {
        Place {
            name: name.to_string(),
            time: 0.0,
        }
    }

    fn ana_bea() -> SheetData {
        SheetData {
            participants: vec![person("Ana", &[2.0, -2.0]), person("Bea", &[1.0, 1.0])],
            places: vec![place("Beach"), place("Mountain")],
        }
    }

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn assert_close(x: f64, y: f64) {
        assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn everybody() {
        init();
        let c = compute_choices(&ana_bea(), &[], &WeightPolicy::Continuous).unwrap();
        assert_eq!(c.participants, names(&["Ana", "Bea"]));
        assert_eq!(c.places(), names(&["Beach", "Mountain"]));
        assert_eq!(c.weights(), vec![0.5, 0.0]);
        assert_eq!(c.percentages(), vec![100.0, 0.0]);
        assert_eq!(c.summary(), "Beach 100.00%");
    }

    #[test]
    fn only_ana() {
        let c = compute_choices(&ana_bea(), &names(&["Ana"]), &WeightPolicy::Continuous).unwrap();
        assert_eq!(c.participants, names(&["Ana"]));
        assert_eq!(c.weights(), vec![0.5, 0.0]);
        assert_eq!(c.percentages(), vec![100.0, 0.0]);
    }

    #[test]
    fn bucketed_weights() {
        let policy = WeightPolicy::Bucketed { threshold: 0.05 };
        let c = compute_choices(&ana_bea(), &[], &policy).unwrap();
        assert_eq!(c.weights(), vec![10.0, 0.0]);
        assert_eq!(c.percentages(), vec![100.0, 0.0]);
    }

    #[test]
    fn names_ignore_case_and_accents() {
        let sheet = SheetData {
            participants: vec![
                person("José", &[1.0, 3.0]),
                person("Íñigo", &[1.0, 0.0]),
                person("Bea", &[3.0, 1.0]),
            ],
            places: vec![place("Beach"), place("Mountain")],
        };
        let policy = WeightPolicy::Continuous;
        let accented = compute_choices(&sheet, &names(&["José"]), &policy).unwrap();
        let plain = compute_choices(&sheet, &names(&["jose"]), &policy).unwrap();
        assert_eq!(accented, plain);
        assert_eq!(plain.participants, names(&["José"]));

        // Output follows the spreadsheet, not the query.
        let two = compute_choices(&sheet, &names(&["BEA", " inigo"]), &policy).unwrap();
        assert_eq!(two.participants, names(&["Íñigo", "Bea"]));
    }

    #[test]
    fn letters_without_decomposition() {
        assert_eq!(normalize_name("Łukasz"), "lukasz");
        assert_eq!(normalize_name("Søren"), normalize_name("soren"));
        assert_eq!(normalize_name("Đorđe"), "dorde");

        let sheet = SheetData {
            participants: vec![person("Łukasz", &[1.0, 0.0]), person("Søren", &[0.0, 1.0])],
            places: vec![place("Beach"), place("Mountain")],
        };
        let c = compute_choices(&sheet, &names(&["lukasz"]), &WeightPolicy::Continuous).unwrap();
        assert_eq!(c.participants, names(&["Łukasz"]));
        assert_eq!(c.places(), names(&["Beach", "Mountain"]));
    }

    #[test]
    fn negative_zero_is_zero() {
        let sheet = SheetData {
            participants: vec![person("Ana", &[1.0, -0.0])],
            places: vec![place("Beach"), place("Mountain")],
        };
        for policy in [
            WeightPolicy::Continuous,
            WeightPolicy::Bucketed { threshold: 0.05 },
        ] {
            let c = compute_choices(&sheet, &[], &policy).unwrap();
            let mountain = &c.chances[1];
            assert_eq!(mountain.place, "Mountain");
            assert!(mountain.weight.is_sign_positive(), "{:?}", policy);
            assert!(mountain.percentage.is_sign_positive(), "{:?}", policy);
        }
    }

    #[test]
    fn unknown_names() {
        let policy = WeightPolicy::Continuous;
        let partial = compute_choices(&ana_bea(), &names(&["Zoe", "bea"]), &policy).unwrap();
        assert_eq!(partial.participants, names(&["Bea"]));
        assert_eq!(partial.weights(), vec![0.5, 0.5]);
        assert_eq!(
            compute_choices(&ana_bea(), &names(&["Zoe"]), &policy),
            Err(ChoiceError::NoParticipants)
        );
        let empty = SheetData::default();
        assert_eq!(
            compute_choices(&empty, &[], &policy),
            Err(ChoiceError::NoParticipants)
        );
    }

    #[test]
    fn nobody_likes_anything() {
        let sheet = SheetData {
            participants: vec![person("Ana", &[-1.0, -1.0]), person("Bea", &[0.0, 0.0])],
            places: vec![place("Beach"), place("Mountain")],
        };
        assert_eq!(
            compute_choices(&sheet, &[], &WeightPolicy::Continuous),
            Err(ChoiceError::NoValidChoices)
        );
        // Too thin to reach the first tier.
        let thin = SheetData {
            participants: vec![person("Ana", &[1.0; 25])],
            places: (0..25).map(|i| place(&format!("p{}", i))).collect(),
        };
        assert_eq!(
            compute_choices(&thin, &[], &WeightPolicy::Bucketed { threshold: 0.05 }),
            Err(ChoiceError::NoValidChoices)
        );
    }

    #[test]
    fn sorted_and_complete() {
        let sheet = SheetData {
            participants: vec![
                person("Ana", &[1.0, 5.0, 2.0, 0.0, 3.0]),
                person("Bea", &[4.0, -1.0, 2.0, 1.0, 0.0]),
                person("Carla", &[0.0, 0.0, 0.0, 0.0, 0.0]),
            ],
            places: vec![place("a"), place("b"), place("c"), place("d"), place("e")],
        };
        let c = compute_choices(&sheet, &[], &WeightPolicy::Continuous).unwrap();
        let w = c.weights();
        assert!(w.windows(2).all(|p| p[0] >= p[1]), "{:?}", w);
        assert_close(c.percentages().iter().sum(), 100.0);
        assert_eq!(c.chances.len(), 5);
    }

    #[test]
    fn ties_keep_sheet_order() {
        let sheet = SheetData {
            participants: vec![person("Ana", &[1.0, 2.0, 1.0, 2.0])],
            places: vec![place("a"), place("b"), place("c"), place("d")],
        };
        let c = compute_choices(&sheet, &[], &WeightPolicy::Continuous).unwrap();
        assert_eq!(c.places(), names(&["b", "d", "a", "c"]));
    }

    #[test]
    fn draw_single_nonzero() {
        let choices = ChoiceSet {
            participants: vec![],
            chances: vec![
                Chance {
                    place: "a".to_string(),
                    weight: 0.0,
                    percentage: 0.0,
                },
                Chance {
                    place: "b".to_string(),
                    weight: 0.0,
                    percentage: 0.0,
                },
                Chance {
                    place: "c".to_string(),
                    weight: 5.0,
                    percentage: 100.0,
                },
            ],
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(draw(&choices, &mut rng), Ok("c"));
        }
        assert_eq!(draw_name(&choices), Ok("c"));
    }

    #[test]
    fn draw_follows_weights() {
        init();
        let sheet = SheetData {
            participants: vec![person("Ana", &[3.0, 1.0, -1.0])],
            places: vec![place("a"), place("b"), place("c")],
        };
        let choices = compute_choices(&sheet, &[], &WeightPolicy::Continuous).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut count_a = 0;
        for _ in 0..4000 {
            match draw(&choices, &mut rng).unwrap() {
                "a" => count_a += 1,
                "b" => {}
                x => panic!("drew {}", x),
            }
        }
        // Expected 3000.
        assert!((2800..3200).contains(&count_a), "{}", count_a);
    }

    #[test]
    fn draw_without_weights() {
        let choices = ChoiceSet::default();
        assert_eq!(
            draw(&choices, &mut StdRng::seed_from_u64(1)),
            Err(ChoiceError::NoValidChoices)
        );
    }
}
