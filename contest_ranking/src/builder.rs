pub use crate::config::*;

/// A builder for assembling a report row by row.
///
/// ```
/// pub use contest_ranking::builder::Builder;
/// pub use contest_ranking::RankingRules;
/// # use contest_ranking::StandingsErrors;
///
/// let mut builder = Builder::new(&RankingRules::DEFAULT_RULES)?
///     .problems(&["A".to_string(), "B".to_string()])?;
///
/// builder.add_roster_record("anna", "Anna Ivanova", "School 57")?;
/// builder.add_standing(1, "Anna", 7.0, &[5.0, 2.0])?;
///
/// let report = builder.build()?;
/// assert_eq!(report.body[0][1], "Anna Ivanova");
///
/// # Ok::<(), StandingsErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: RankingRules,
    pub(crate) _problems: Vec<String>,
    pub(crate) _standings: Vec<StandingRow>,
    pub(crate) _roster: Vec<RosterRecord>,
}

impl Builder {
    pub fn new(rules: &RankingRules) -> Result<Builder, StandingsErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _problems: Vec::new(),
            _standings: Vec::new(),
            _roster: Vec::new(),
        })
    }

    /// Sets the problems of the contest. Standings added before are dropped.
    pub fn problems(self, problems: &[String]) -> Result<Builder, StandingsErrors> {
        Ok(Builder {
            _rules: self._rules,
            _problems: problems.to_vec(),
            _standings: Vec::new(),
            _roster: self._roster,
        })
    }

    /// Adds a row of the standings.
    ///
    /// The number of problem results must match the problems of the contest.
    pub fn add_standing(
        &mut self,
        rank: u32,
        login: &str,
        points: f64,
        problem_points: &[f64],
    ) -> Result<(), StandingsErrors> {
        if problem_points.len() != self._problems.len() {
            return Err(StandingsErrors::MalformedUpstreamData {
                login: login.to_string(),
                expected: self._problems.len(),
                found: problem_points.len(),
            });
        }
        self.add_standing_2(&StandingRow {
            rank,
            login: login.to_string(),
            points,
            problem_points: problem_points.to_vec(),
        })
    }

    pub fn add_standing_2(&mut self, row: &StandingRow) -> Result<(), StandingsErrors> {
        self._standings.push(row.clone());
        Ok(())
    }

    pub fn add_roster_record(
        &mut self,
        login: &str,
        name: &str,
        school: &str,
    ) -> Result<(), StandingsErrors> {
        self._roster.push(RosterRecord {
            login: login.to_string(),
            name: name.to_string(),
            school: school.to_string(),
        });
        Ok(())
    }

    pub fn build(&self) -> Result<Report, StandingsErrors> {
        crate::run_standings(
            &self._standings,
            &self._roster,
            &self._problems,
            &self._rules,
        )
    }
}
