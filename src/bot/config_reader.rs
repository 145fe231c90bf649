use crate::bot::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CustomLayout {
    #[serde(rename = "headerRow")]
    pub header_row: usize,
    #[serde(rename = "firstParticipantColumn")]
    pub first_participant_column: usize,
    #[serde(rename = "firstPlaceRow")]
    pub first_place_row: usize,
    #[serde(rename = "placeNameColumn")]
    pub place_name_column: usize,
    #[serde(rename = "placeTimeColumn")]
    pub place_time_column: usize,
}

/// Either the name of a known layout ("A" or "B") or explicit offsets.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutSetting {
    Named(String),
    Custom(CustomLayout),
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    _worksheet_name: Option<String>,
    #[serde(rename = "locale")]
    _locale: Option<String>,
    pub layout: Option<LayoutSetting>,
    #[serde(rename = "maxRows")]
    _max_rows: Option<usize>,
    #[serde(rename = "maxColumns")]
    _max_columns: Option<usize>,
}

impl SheetSource {
    // The range A1:Z30 of the "Votaciones" sheet, unless told otherwise.
    const DEFAULT_WORKSHEET: &'static str = "Votaciones";
    const DEFAULT_LOCALE: &'static str = "en_US";
    const DEFAULT_MAX_ROWS: usize = 30;
    const DEFAULT_MAX_COLUMNS: usize = 26;

    pub fn worksheet_name(&self) -> String {
        self._worksheet_name
            .clone()
            .unwrap_or_else(|| SheetSource::DEFAULT_WORKSHEET.to_string())
    }

    pub fn locale(&self) -> &str {
        self._locale
            .as_deref()
            .unwrap_or(SheetSource::DEFAULT_LOCALE)
    }

    pub fn max_rows(&self) -> usize {
        self._max_rows.unwrap_or(SheetSource::DEFAULT_MAX_ROWS)
    }

    pub fn max_columns(&self) -> usize {
        self._max_columns.unwrap_or(SheetSource::DEFAULT_MAX_COLUMNS)
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct WeightingSettings {
    pub mode: String,
    pub threshold: Option<f64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TableSettings {
    #[serde(rename = "maxNameLength")]
    pub max_name_length: Option<usize>,
    #[serde(rename = "hideZeroes")]
    pub hide_zeroes: Option<bool>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub spreadsheet: SheetSource,
    pub weighting: Option<WeightingSettings>,
    pub table: Option<TableSettings>,
    #[serde(rename = "botAdmins", default)]
    pub bot_admins: Vec<i64>,
    #[serde(rename = "chatWhitelist", default)]
    pub chat_whitelist: Vec<i64>,
}

impl BotConfig {
    pub fn layout(&self) -> BotResult<LayoutConfig> {
        match &self.spreadsheet.layout {
            None => Ok(LayoutConfig::LAYOUT_A),
            Some(LayoutSetting::Named(name)) => match name.to_uppercase().as_str() {
                "A" => Ok(LayoutConfig::LAYOUT_A),
                "B" => Ok(LayoutConfig::LAYOUT_B),
                _ => UnknownLayoutSnafu { name: name.clone() }.fail(),
            },
            Some(LayoutSetting::Custom(c)) => Ok(LayoutConfig {
                header_row: c.header_row,
                first_participant_column: c.first_participant_column,
                first_place_row: c.first_place_row,
                place_name_column: c.place_name_column,
                place_time_column: c.place_time_column,
            }),
        }
    }

    pub fn weight_policy(&self) -> BotResult<WeightPolicy> {
        let settings = match &self.weighting {
            None => return Ok(WeightPolicy::Continuous),
            Some(s) => s,
        };
        match settings.mode.as_str() {
            "continuous" => Ok(WeightPolicy::Continuous),
            "bucketed" => {
                let threshold = settings
                    .threshold
                    .unwrap_or(WeightPolicy::DEFAULT_THRESHOLD);
                ensure!(threshold > 0.0, InvalidThresholdSnafu { threshold });
                Ok(WeightPolicy::Bucketed { threshold })
            }
            x => UnknownWeightingSnafu {
                mode: x.to_string(),
            }
            .fail(),
        }
    }

    pub fn table_options(&self) -> BotResult<TableOptions> {
        let settings = self.table.clone().unwrap_or(TableSettings {
            max_name_length: None,
            hide_zeroes: None,
        });
        Ok(TableOptions {
            max_name_length: settings
                .max_name_length
                .unwrap_or(TableOptions::DEFAULT_MAX_NAME_LENGTH),
            hide_zeroes: settings.hide_zeroes.unwrap_or(true),
            policy: self.weight_policy()?,
        })
    }
}

pub fn read_config(path: &str) -> BotResult<BotConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    parse_config(contents.as_str(), path)
}

/// Parses the content of a configuration file. `path` is only used in
/// error messages.
pub fn parse_config(contents: &str, path: &str) -> BotResult<BotConfig> {
    serde_json::from_str(contents).context(ParsingConfigSnafu { path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let config = parse_config(
            r#"{ "spreadsheet": { "provider": "xlsx", "filePath": "votes.xlsx" } }"#,
            "test.json",
        )
        .unwrap();
        assert_eq!(config.spreadsheet.worksheet_name(), "Votaciones");
        assert_eq!(config.spreadsheet.locale(), "en_US");
        assert_eq!(config.spreadsheet.max_rows(), 30);
        assert_eq!(config.spreadsheet.max_columns(), 26);
        assert_eq!(config.layout().unwrap(), LayoutConfig::LAYOUT_A);
        assert_eq!(config.weight_policy().unwrap(), WeightPolicy::Continuous);
        assert_eq!(
            config.table_options().unwrap(),
            TableOptions {
                max_name_length: 16,
                hide_zeroes: true,
                policy: WeightPolicy::Continuous
            }
        );
        assert!(config.bot_admins.is_empty());
        assert!(config.chat_whitelist.is_empty());
    }

    #[test]
    fn full_config() {
        let config = parse_config(
            r#"{
                "spreadsheet": {
                    "provider": "csv",
                    "filePath": "votes.csv",
                    "worksheetName": "Votos",
                    "locale": "es_ES",
                    "layout": "b",
                    "maxRows": 50,
                    "maxColumns": 40
                },
                "weighting": { "mode": "bucketed" },
                "table": { "maxNameLength": 20, "hideZeroes": false },
                "botAdmins": [12],
                "chatWhitelist": [-1001, 7]
            }"#,
            "test.json",
        )
        .unwrap();
        assert_eq!(config.spreadsheet.worksheet_name(), "Votos");
        assert_eq!(config.spreadsheet.locale(), "es_ES");
        assert_eq!(config.layout().unwrap(), LayoutConfig::LAYOUT_B);
        assert_eq!(
            config.weight_policy().unwrap(),
            WeightPolicy::Bucketed { threshold: 0.05 }
        );
        let table = config.table_options().unwrap();
        assert_eq!(table.max_name_length, 20);
        assert!(!table.hide_zeroes);
        assert_eq!(config.bot_admins, vec![12]);
        assert_eq!(config.chat_whitelist, vec![-1001, 7]);
    }

    #[test]
    fn custom_layout() {
        let config = parse_config(
            r#"{ "spreadsheet": { "provider": "csv", "filePath": "v.csv", "layout": {
                "headerRow": 1, "firstParticipantColumn": 5, "firstPlaceRow": 3,
                "placeNameColumn": 0, "placeTimeColumn": 2 } } }"#,
            "test.json",
        )
        .unwrap();
        assert_eq!(
            config.layout().unwrap(),
            LayoutConfig {
                header_row: 1,
                first_participant_column: 5,
                first_place_row: 3,
                place_name_column: 0,
                place_time_column: 2,
            }
        );
    }

    #[test]
    fn invalid_settings() {
        let config = parse_config(
            r#"{ "spreadsheet": { "provider": "csv", "filePath": "v.csv", "layout": "C" },
                 "weighting": { "mode": "bucketed", "threshold": 0 } }"#,
            "test.json",
        )
        .unwrap();
        assert!(matches!(config.layout(), Err(BotError::UnknownLayout { .. })));
        assert!(matches!(
            config.weight_policy(),
            Err(BotError::InvalidThreshold { .. })
        ));
        assert!(matches!(
            parse_config("{", "test.json"),
            Err(BotError::ParsingConfig { .. })
        ));
    }
}
