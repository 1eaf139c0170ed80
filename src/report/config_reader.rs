use crate::report::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::borrow::Cow;

// Default layout of the registration spreadsheet: name, school, ..., login,
// with a header in the first row.
const DEFAULT_FIRST_ROW: usize = 2;
const DEFAULT_NAME_COLUMN: usize = 1;
const DEFAULT_SCHOOL_COLUMN: usize = 2;
const DEFAULT_LOGIN_COLUMN: usize = 4;

const DEFAULT_OUTPUT_DIRECTORY: &str = "results";
const DEFAULT_TABLE_NAME: &str = "results";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ContestSettings {
    #[serde(rename = "contestId")]
    pub contest_id: Option<String>,
    #[serde(rename = "standingsFile")]
    pub standings_file: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RosterSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "firstRowIndex")]
    _first_row_index: Option<JSValue>,
    #[serde(rename = "nameColumnIndex")]
    _name_column_index: Option<JSValue>,
    #[serde(rename = "schoolColumnIndex")]
    _school_column_index: Option<JSValue>,
    #[serde(rename = "loginColumnIndex")]
    _login_column_index: Option<JSValue>,
}

/// The supported formats for the roster.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RosterProvider {
    Xlsx,
    Csv,
}

/// Zero-based positions of the roster fields in a row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RosterColumns {
    pub name: usize,
    pub school: usize,
    pub login: usize,
}

impl RosterColumns {
    /// The number of cells a row needs to hold all the fields.
    pub fn min_row_len(&self) -> usize {
        self.name.max(self.school).max(self.login) + 1
    }
}

impl RosterSource {
    /// A source with the default layout. The provider is guessed from the extension.
    pub fn from_path(file_path: &str, worksheet_name: Option<String>) -> RosterSource {
        let provider = if file_path.to_lowercase().ends_with(".csv") {
            "csv"
        } else {
            "xlsx"
        };
        RosterSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            worksheet_name,
            _first_row_index: None,
            _name_column_index: None,
            _school_column_index: None,
            _login_column_index: None,
        }
    }

    pub fn provider(&self) -> ReportResult<RosterProvider> {
        match self.provider.as_str() {
            "xlsx" | "excel" => Ok(RosterProvider::Xlsx),
            "csv" => Ok(RosterProvider::Csv),
            _ => whatever!("unknown roster provider: {}", self.provider),
        }
    }

    /// The first row holding a roster record, zero-based.
    pub fn first_row_index(&self) -> ReportResult<usize> {
        read_js_index(&self._first_row_index, DEFAULT_FIRST_ROW)
    }

    pub fn columns(&self) -> ReportResult<RosterColumns> {
        Ok(RosterColumns {
            name: read_js_index(&self._name_column_index, DEFAULT_NAME_COLUMN)?,
            school: read_js_index(&self._school_column_index, DEFAULT_SCHOOL_COLUMN)?,
            login: read_js_index(&self._login_column_index, DEFAULT_LOGIN_COLUMN)?,
        })
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankingSettings {
    #[serde(rename = "excludedLogins")]
    pub excluded_logins: Option<Vec<String>>,
    #[serde(rename = "minimumPoints")]
    pub minimum_points: Option<f64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LabelSettings {
    pub rank: Option<String>,
    pub name: Option<String>,
    pub points: Option<String>,
    pub login: Option<String>,
    pub school: Option<String>,
    #[serde(rename = "noProfile")]
    pub no_profile: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "tableName")]
    pub table_name: Option<String>,
    pub labels: Option<LabelSettings>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub contest: ContestSettings,
    #[serde(rename = "rosterSources")]
    pub roster_sources: Vec<RosterSource>,
    pub rules: Option<RankingSettings>,
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
}

impl ReportConfig {
    /// A configuration with a single roster source and all the defaults.
    pub fn simple(standings_file: &str, roster: RosterSource) -> ReportConfig {
        ReportConfig {
            contest: ContestSettings {
                contest_id: None,
                standings_file: standings_file.to_string(),
            },
            roster_sources: vec![roster],
            rules: None,
            output_settings: None,
        }
    }

    /// Makes all the file paths relative to the given directory.
    pub fn resolve_paths(&mut self, root: &Path) {
        self.contest.standings_file = join_path(root, &self.contest.standings_file);
        for source in self.roster_sources.iter_mut() {
            source.file_path = join_path(root, &source.file_path);
        }
        if let Some(output) = self.output_settings.as_mut() {
            if let Some(dir) = output.output_directory.as_mut() {
                *dir = join_path(root, dir);
            }
        }
    }

    pub fn ranking_rules(&self) -> RankingRules {
        let mut rules = RankingRules::DEFAULT_RULES;
        if let Some(settings) = self.rules.as_ref() {
            if let Some(excluded) = settings.excluded_logins.as_ref() {
                rules.excluded_logins = excluded.clone();
            }
            if let Some(min_points) = settings.minimum_points {
                rules.min_points_exclusive = min_points;
            }
        }
        if let Some(labels) = self
            .output_settings
            .as_ref()
            .and_then(|o| o.labels.as_ref())
        {
            override_label(&mut rules.labels.rank, &labels.rank);
            override_label(&mut rules.labels.name, &labels.name);
            override_label(&mut rules.labels.points, &labels.points);
            override_label(&mut rules.labels.login, &labels.login);
            override_label(&mut rules.labels.school, &labels.school);
            override_label(&mut rules.labels.no_profile, &labels.no_profile);
        }
        rules
    }

    /// The path of the CSV report, unless overridden on the command line.
    pub fn output_path(&self, root: &Path) -> String {
        let output = self.output_settings.as_ref();
        let dir = output
            .and_then(|o| o.output_directory.clone())
            .unwrap_or_else(|| join_path(root, DEFAULT_OUTPUT_DIRECTORY));
        let table_name = output
            .and_then(|o| o.table_name.clone())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        join_path(Path::new(&dir), &format!("{}.csv", table_name))
    }
}

fn override_label(label: &mut Cow<'static, str>, value: &Option<String>) {
    if let Some(v) = value {
        *label = Cow::Owned(v.clone());
    }
}

fn join_path(root: &Path, file: &str) -> String {
    let p: PathBuf = root.join(file);
    p.as_path().display().to_string()
}

pub fn read_config(path: &str) -> BReportResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

// Indexes follow the spreadsheet conventions: they start at 1, and columns
// may also be given by their letters.
fn read_js_index(x: &Option<JSValue>, default: usize) -> ReportResult<usize> {
    let one_based: usize = match x {
        None => default,
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize).context(
            ParsingJsonNumberSnafu {
                value: n.to_string(),
            },
        )?,
        Some(JSValue::String(s)) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            column_letters_index(s)?
        }
        Some(JSValue::String(s)) => s
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu { value: s.clone() })?,
        Some(v) => {
            return ParsingJsonNumberSnafu {
                value: v.to_string(),
            }
            .fail();
        }
    };
    if one_based == 0 {
        return ParsingJsonNumberSnafu { value: "0" }.fail();
    }
    Ok(one_based - 1)
}

// "A" -> 1, "Z" -> 26, "AA" -> 27
fn column_letters_index(s: &str) -> ReportResult<usize> {
    let mut acc: usize = 0;
    for c in s.to_ascii_lowercase().chars() {
        let digit = c as usize - 'a' as usize + 1;
        acc = acc
            .checked_mul(26)
            .and_then(|x| x.checked_add(digit))
            .context(ParsingJsonNumberSnafu { value: s })?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(js: JSValue) -> RosterSource {
        serde_json::from_value(js).unwrap()
    }

    #[test]
    fn column_letters() {
        assert_eq!(column_letters_index("A").unwrap(), 1);
        assert_eq!(column_letters_index("d").unwrap(), 4);
        assert_eq!(column_letters_index("Z").unwrap(), 26);
        assert_eq!(column_letters_index("AA").unwrap(), 27);
        assert_eq!(column_letters_index("AB").unwrap(), 28);
    }

    #[test]
    fn column_letters_too_long() {
        assert!(matches!(
            column_letters_index("ZZZZZZZZZZZZZZZ"),
            Err(ReportError::ParsingJsonNumber { .. })
        ));
        let s = source(json!({
            "provider": "csv",
            "filePath": "r.csv",
            "loginColumnIndex": "ZZZZZZZZZZZZZZZ"
        }));
        assert!(s.columns().is_err());
    }

    #[test]
    fn default_layout() {
        let s = source(json!({"provider": "xlsx", "filePath": "roster.xlsx"}));
        assert_eq!(s.first_row_index().unwrap(), 1);
        assert_eq!(
            s.columns().unwrap(),
            RosterColumns {
                name: 0,
                school: 1,
                login: 3
            }
        );
        assert_eq!(s.columns().unwrap().min_row_len(), 4);
        assert_eq!(s.provider().unwrap(), RosterProvider::Xlsx);
    }

    #[test]
    fn explicit_layout() {
        let s = source(json!({
            "provider": "csv",
            "filePath": "roster.csv",
            "firstRowIndex": "1",
            "nameColumnIndex": 3,
            "schoolColumnIndex": "E",
            "loginColumnIndex": "b"
        }));
        assert_eq!(s.first_row_index().unwrap(), 0);
        assert_eq!(
            s.columns().unwrap(),
            RosterColumns {
                name: 2,
                school: 4,
                login: 1
            }
        );
        assert_eq!(s.provider().unwrap(), RosterProvider::Csv);
    }

    #[test]
    fn invalid_indexes() {
        let s = source(json!({"provider": "csv", "filePath": "r.csv", "firstRowIndex": 0}));
        assert!(s.first_row_index().is_err());
        let s = source(json!({"provider": "csv", "filePath": "r.csv", "loginColumnIndex": "4x"}));
        assert!(s.columns().is_err());
        let s = source(json!({"provider": "csv", "filePath": "r.csv", "loginColumnIndex": true}));
        assert!(s.columns().is_err());
    }

    #[test]
    fn unknown_provider() {
        let s = source(json!({"provider": "sheets", "filePath": "r"}));
        assert!(s.provider().is_err());
    }

    #[test]
    fn provider_from_extension() {
        assert_eq!(
            RosterSource::from_path("a/Roster.CSV", None).provider().unwrap(),
            RosterProvider::Csv
        );
        assert_eq!(
            RosterSource::from_path("a/roster.xlsx", None).provider().unwrap(),
            RosterProvider::Xlsx
        );
    }

    #[test]
    fn rules_and_labels() {
        let config: ReportConfig = serde_json::from_value(json!({
            "contest": {"standingsFile": "s.json"},
            "rosterSources": [],
            "rules": {"excludedLogins": ["Bykov_David"]},
            "outputSettings": {"labels": {"noProfile": "-", "school": "School"}}
        }))
        .unwrap();
        let rules = config.ranking_rules();
        assert_eq!(rules.excluded_logins, vec!["Bykov_David".to_string()]);
        assert_eq!(rules.min_points_exclusive, 0.5);
        assert_eq!(rules.labels.no_profile, "-");
        assert_eq!(rules.labels.school, "School");
        assert_eq!(rules.labels.rank, ReportLabels::DEFAULT_LABELS.rank);
    }

    #[test]
    fn paths_are_resolved() {
        let mut config: ReportConfig = serde_json::from_value(json!({
            "contest": {"standingsFile": "s.json"},
            "rosterSources": [{"provider": "csv", "filePath": "r.csv"}],
            "outputSettings": {"outputDirectory": "out", "tableName": "final"}
        }))
        .unwrap();
        let root = Path::new("/data/contest");
        config.resolve_paths(root);
        assert_eq!(config.contest.standings_file, "/data/contest/s.json");
        assert_eq!(config.roster_sources[0].file_path, "/data/contest/r.csv");
        assert_eq!(config.output_path(root), "/data/contest/out/final.csv");

        let simple = ReportConfig::simple("s.json", RosterSource::from_path("r.csv", None));
        assert_eq!(simple.output_path(root), "/data/contest/results/results.csv");
    }
}
