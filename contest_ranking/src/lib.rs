pub mod builder;
mod config;
pub mod manual;
use log::{debug, info, warn};

use std::collections::HashSet;

pub use crate::config::*;

// **** Private structures ****

// The state carried from one contestant to the next while rewriting the ranks.
// Contestants must be visited in increasing raw rank.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct RankAccumulator {
    // Number of contestants strictly better than the current tie group.
    higher_count: u32,
    // Raw rank of the current tie group. Raw ranks start at 1, so 0 never matches.
    previous_raw_rank: u32,
    current_group_size: u32,
}

impl RankAccumulator {
    const START: RankAccumulator = RankAccumulator {
        higher_count: 0,
        previous_raw_rank: 0,
        current_group_size: 0,
    };

    fn step(self, raw_rank: u32) -> RankAccumulator {
        if raw_rank != self.previous_raw_rank {
            // A new tie group starts: everyone in the previous group is better.
            RankAccumulator {
                higher_count: self.higher_count + self.current_group_size,
                previous_raw_rank: raw_rank,
                current_group_size: 1,
            }
        } else {
            RankAccumulator {
                current_group_size: self.current_group_size + 1,
                ..self
            }
        }
    }

    fn export_rank(&self) -> u32 {
        self.higher_count + 1
    }
}

/// Builds the ranked report out of the contest standings and the roster.
///
/// Arguments:
/// * `standings` the rows of the contest, in any order
/// * `roster` the known contestants. Logins may be duplicated or missing.
/// * `problems` the problem identifiers of the contest, in display order
/// * `rules` the filters and the labels of the report
///
/// All the rows are checked before anything is assembled: a single malformed
/// row fails the whole report.
pub fn run_standings(
    standings: &[StandingRow],
    roster: &[RosterRecord],
    problems: &[String],
    rules: &RankingRules,
) -> Result<Report, StandingsErrors> {
    info!(
        "Processing {:?} standing rows, {:?} roster records, {:?} problems",
        standings.len(),
        roster.len(),
        problems.len()
    );

    let checked = checks(standings, problems)?;
    let mut contestants = filter_standings(checked, rules);
    info!(
        "Keeping {:?} contestants out of {:?} standing rows",
        contestants.len(),
        standings.len()
    );

    // Stable: contestants that share a raw rank keep the contest order.
    contestants.sort_by_key(|c| c.rank);
    let normalized = normalize_ranks(&contestants);

    let mut unmatched: usize = 0;
    let rows: Vec<MatchedRow> = normalized
        .into_iter()
        .map(|contestant| {
            let roster_match = match_roster(&contestant, roster);
            if roster_match == RosterMatch::Unmatched {
                unmatched += 1;
            }
            MatchedRow {
                contestant,
                roster: roster_match,
            }
        })
        .collect();
    if unmatched > 0 {
        warn!(
            "{:?} contestants out of {:?} could not be matched to the roster",
            unmatched,
            rows.len()
        );
    }

    assemble_report(&rows, problems, &rules.labels)
}

// Every row must have one result per problem.
fn checks(standings: &[StandingRow], problems: &[String]) -> Result<Vec<Contestant>, StandingsErrors> {
    if standings.is_empty() {
        return Err(StandingsErrors::EmptyStandings);
    }
    let mut res: Vec<Contestant> = Vec::with_capacity(standings.len());
    for row in standings.iter() {
        check_problem_count(&row.login, row.problem_points.len(), problems.len())?;
        res.push(Contestant::from(row.clone()));
    }
    debug!("checks: {:?} rows validated", res.len());
    Ok(res)
}

fn check_problem_count(login: &str, found: usize, expected: usize) -> Result<(), StandingsErrors> {
    if found != expected {
        return Err(StandingsErrors::MalformedUpstreamData {
            login: login.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

/// Drops the unranked rows, the excluded logins and the contestants that did
/// not score.
///
/// A raw rank of 0 marks a contestant outside the official ranking (practice
/// or virtual participants). The exclusion list is compared exactly. A
/// contestant is kept only with strictly more points than
/// `rules.min_points_exclusive`.
pub fn filter_standings(contestants: Vec<Contestant>, rules: &RankingRules) -> Vec<Contestant> {
    let excluded: HashSet<&str> = rules.excluded_logins.iter().map(|s| s.as_str()).collect();
    contestants
        .into_iter()
        .filter(|c| {
            if c.rank == 0 {
                debug!("filter_standings: dropping unranked {:?}", c.login);
                false
            } else if excluded.contains(c.login.as_str()) {
                debug!("filter_standings: excluding {:?}", c.login);
                false
            } else {
                true
            }
        })
        .filter(|c| c.points > rules.min_points_exclusive)
        .collect()
}

/// Finds the roster record of a contestant.
///
/// The roster logins are trimmed and compared without case. If no record or
/// more than one record matches, the contestant is reported in the logs and
/// left unmatched.
pub fn match_roster(contestant: &Contestant, roster: &[RosterRecord]) -> RosterMatch {
    let candidates: Vec<&RosterRecord> = roster
        .iter()
        .filter(|r| same_login(&r.login, &contestant.login))
        .collect();
    match candidates.as_slice() {
        [record] => RosterMatch::Matched((*record).clone()),
        _ => {
            warn!(
                "Cannot match {:?}. Possibilities: {:?}",
                contestant, candidates
            );
            RosterMatch::Unmatched
        }
    }
}

fn same_login(roster_login: &str, login: &str) -> bool {
    roster_login.trim().to_lowercase() == login.to_lowercase()
}

/// Rewrites the raw ranks into competition ranks.
///
/// The input must be sorted by raw rank. Contestants that share a raw rank
/// share the exported rank, and the next group is pushed down by the size of
/// the tie: raw ranks `1, 3, 3, 7` become `1, 2, 2, 4`.
pub fn normalize_ranks(contestants: &[Contestant]) -> Vec<Contestant> {
    let mut acc = RankAccumulator::START;
    let mut res: Vec<Contestant> = Vec::with_capacity(contestants.len());
    for c in contestants.iter() {
        acc = acc.step(c.rank);
        res.push(c.with_rank(acc.export_rank()));
    }
    res
}

/// Lays out the report. The rows are written in the order given.
pub fn assemble_report(
    rows: &[MatchedRow],
    problems: &[String],
    labels: &ReportLabels,
) -> Result<Report, StandingsErrors> {
    let mut header: Vec<String> = vec![
        labels.rank.to_string(),
        labels.name.to_string(),
        labels.points.to_string(),
        labels.login.to_string(),
    ];
    header.extend(problems.iter().cloned());
    header.push(labels.school.to_string());

    let mut body: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows.iter() {
        let c = &row.contestant;
        check_problem_count(&c.login, c.problem_points.len(), problems.len())?;
        let mut line: Vec<String> = vec![
            c.rank.to_string(),
            row.roster.name(labels).to_string(),
            format_points(c.points),
            c.login.clone(),
        ];
        line.extend(c.problem_points.iter().map(|p| format_points(*p)));
        line.push(row.roster.school(labels).to_string());
        body.push(line);
    }
    Ok(Report { header, body })
}

/// Points always show their fractional part: `10.0`, `5.5`.
pub fn format_points(points: f64) -> String {
    format!("{:?}", points)
}
