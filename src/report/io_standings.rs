// Reader for the answers of the `contest.standings` API method.

use serde::Deserialize;

use crate::report::*;

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    status: String,
    comment: Option<String>,
    result: Option<StandingsResult>,
}

#[derive(Debug, Deserialize)]
struct StandingsResult {
    problems: Vec<Problem>,
    rows: Vec<RanklistRow>,
}

#[derive(Debug, Deserialize)]
struct Problem {
    index: String,
}

#[derive(Debug, Deserialize)]
struct RanklistRow {
    party: Party,
    rank: u32,
    points: f64,
    #[serde(rename = "problemResults")]
    problem_results: Vec<ProblemResult>,
}

#[derive(Debug, Deserialize)]
struct Party {
    members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
struct Member {
    handle: String,
}

#[derive(Debug, Deserialize)]
struct ProblemResult {
    points: f64,
}

/// The problems and the rows of a contest.
#[derive(PartialEq, Debug, Clone)]
pub struct ContestData {
    pub problems: Vec<String>,
    pub standings: Vec<StandingRow>,
}

pub fn read_standings(path: &str) -> BReportResult<ContestData> {
    info!("Attempting to read standings file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_standings(contents.as_str())
}

pub fn parse_standings(contents: &str) -> BReportResult<ContestData> {
    let response: StandingsResponse =
        serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    let result = match (response.status.as_str(), response.result) {
        ("OK", Some(result)) => result,
        (status, _) => {
            return Err(Box::new(ReportError::ContestApi {
                status: status.to_string(),
                comment: response
                    .comment
                    .unwrap_or_else(|| "no result in the answer".to_string()),
            }));
        }
    };

    let problems: Vec<String> = result.problems.into_iter().map(|p| p.index).collect();
    debug!("parse_standings: problems: {:?}", problems);

    let mut standings: Vec<StandingRow> = Vec::with_capacity(result.rows.len());
    for row in result.rows.into_iter() {
        // Teams are ranked under their first member.
        let login = row
            .party
            .members
            .first()
            .map(|m| m.handle.clone())
            .context(MissingHandleSnafu { rank: row.rank })?;
        standings.push(StandingRow {
            rank: row.rank,
            login,
            points: row.points,
            problem_points: row.problem_results.iter().map(|r| r.points).collect(),
        });
    }
    Ok(ContestData {
        problems,
        standings,
    })
}
