// ********* Input data structures ***********

use std::borrow::Cow;
use std::error::Error;
use std::fmt::Display;

/// One entry of the contestant roster, as read from the spreadsheet.
///
/// Logins are not guaranteed to be unique across the roster, nor to be
/// normalized: they are trimmed and compared case-insensitively at match time.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct RosterRecord {
    pub login: String,
    pub name: String,
    pub school: String,
}

/// A raw row of the contest standings, before validation.
#[derive(PartialEq, Debug, Clone)]
pub struct StandingRow {
    /// The rank reported by the contest. Ties share the same value.
    pub rank: u32,
    pub login: String,
    pub points: f64,
    /// One entry per problem of the contest, in the order of the problem list.
    pub problem_points: Vec<f64>,
}

// ******** Output data structures *********

/// A contestant that passed validation and filtering.
///
/// The rank is the raw contest rank until the contestant goes through
/// the normalization. It then holds the exported rank.
#[derive(PartialEq, Debug, Clone)]
pub struct Contestant {
    pub login: String,
    pub rank: u32,
    pub points: f64,
    pub problem_points: Vec<f64>,
}

impl Contestant {
    /// A copy of this contestant with a new rank.
    pub fn with_rank(&self, rank: u32) -> Contestant {
        Contestant {
            rank,
            ..self.clone()
        }
    }
}

impl From<StandingRow> for Contestant {
    fn from(row: StandingRow) -> Contestant {
        Contestant {
            login: row.login,
            rank: row.rank,
            points: row.points,
            problem_points: row.problem_points,
        }
    }
}

/// The outcome of looking up a contestant in the roster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterMatch {
    /// Exactly one roster record has this login.
    Matched(RosterRecord),
    /// No record, or more than one record, has this login.
    Unmatched,
}

impl RosterMatch {
    pub fn name<'a>(&'a self, labels: &'a ReportLabels) -> &'a str {
        match self {
            RosterMatch::Matched(r) => r.name.as_str(),
            RosterMatch::Unmatched => labels.no_profile.as_ref(),
        }
    }

    pub fn school<'a>(&'a self, labels: &'a ReportLabels) -> &'a str {
        match self {
            RosterMatch::Matched(r) => r.school.as_str(),
            RosterMatch::Unmatched => labels.no_profile.as_ref(),
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct MatchedRow {
    pub contestant: Contestant,
    pub roster: RosterMatch,
}

/// The final table: a header and the rows, all rendered as text.
///
/// Every row of the body has the same number of cells as the header.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Report {
    pub header: Vec<String>,
    pub body: Vec<Vec<String>>,
}

/// Errors that prevent a report from being produced.
#[derive(PartialEq, Debug, Clone)]
pub enum StandingsErrors {
    /// The contest did not report a single row.
    EmptyStandings,
    /// The per-problem points of a row do not line up with the problem list.
    MalformedUpstreamData {
        login: String,
        expected: usize,
        found: usize,
    },
}

impl Error for StandingsErrors {}

impl Display for StandingsErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandingsErrors::EmptyStandings => write!(f, "the contest standings are empty"),
            StandingsErrors::MalformedUpstreamData {
                login,
                expected,
                found,
            } => write!(
                f,
                "malformed standings row for {}: {} problem results, expected {}",
                login, found, expected
            ),
        }
    }
}

// ********* Configuration **********

/// The labels written in the report.
///
/// The defaults produce a report with Russian column names.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportLabels {
    pub rank: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub points: Cow<'static, str>,
    pub login: Cow<'static, str>,
    pub school: Cow<'static, str>,
    /// Written in place of the name and the school of unmatched contestants.
    pub no_profile: Cow<'static, str>,
}

impl ReportLabels {
    pub const DEFAULT_LABELS: ReportLabels = ReportLabels {
        rank: Cow::Borrowed("Место"),
        name: Cow::Borrowed("ФИО"),
        points: Cow::Borrowed("Баллы"),
        login: Cow::Borrowed("Логин на codeforces"),
        school: Cow::Borrowed("Школа"),
        no_profile: Cow::Borrowed("Нет анкеты"),
    };
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankingRules {
    /// Logins that are never part of the report (organizers, testers).
    pub excluded_logins: Vec<String>,
    /// Rows with at most this many points are dropped.
    pub min_points_exclusive: f64,
    pub labels: ReportLabels,
}

impl RankingRules {
    pub const DEFAULT_RULES: RankingRules = RankingRules {
        excluded_logins: Vec::new(),
        min_points_exclusive: 0.5,
        labels: ReportLabels::DEFAULT_LABELS,
    };
}
