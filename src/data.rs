//! Loading of team statistics from a JSON record store.
//!
//! The store has the shape `{"teams": [...]}`, each record carrying a team's name, season, league
//! and a `stats` block with per-match expected-goals figures. Records are keyed by name and season;
//! names match case-insensitively.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::SimulationError;
use crate::profile::TeamProfile;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed team data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub avg_xg_for: f64,
    pub avg_xg_against: f64,
    #[serde(default)]
    pub xg_efficiency: Option<f64>,
    #[serde(default)]
    pub defensive_efficiency: Option<f64>,
    #[serde(default)]
    pub possession: Option<f64>,
}
impl TeamStats {
    pub fn avg_goals_for(&self) -> f64 {
        self.goals_for as f64 / self.matches_played as f64
    }

    pub fn record(&self) -> String {
        format!("{}W-{}D-{}L", self.wins, self.draws, self.losses)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub season: String,
    pub league: String,
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub notable_players: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub stats: TeamStats,
}
impl TeamRecord {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.season)
    }

    /// The scoring-strength summary used by the simulator.
    pub fn profile(&self) -> Result<TeamProfile, SimulationError> {
        let profile = TeamProfile::new(
            self.name.clone(),
            self.season.clone(),
            self.stats.avg_xg_for,
            self.stats.avg_xg_against,
        );
        profile.validate()?;
        Ok(profile)
    }

    /// Labelled descriptive fields for a detailed listing. Optional fields that are absent from
    /// the record are left out.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let stats = &self.stats;
        let mut details = vec![("League", self.league.clone())];
        if let Some(coach) = &self.coach {
            details.push(("Coach", coach.clone()));
        }
        if !self.notable_players.is_empty() {
            details.push(("Notable players", self.notable_players.join(", ")));
        }
        if let Some(notes) = &self.notes {
            details.push(("Notes", notes.clone()));
        }
        details.push((
            "xG for / against",
            format!("{:.2} / {:.2}", stats.avg_xg_for, stats.avg_xg_against),
        ));
        if let Some(xg_efficiency) = stats.xg_efficiency {
            details.push(("xG efficiency", format!("{xg_efficiency:.2}")));
        }
        if let Some(defensive_efficiency) = stats.defensive_efficiency {
            details.push(("Defensive efficiency", format!("{defensive_efficiency:.2}")));
        }
        details.push((
            "Record",
            format!("{} ({} matches)", stats.record(), stats.matches_played),
        ));
        details.push((
            "Goals",
            format!("{} scored, {} conceded", stats.goals_for, stats.goals_against),
        ));
        if let Some(possession) = stats.possession {
            details.push(("Possession", format!("{possession:.1}%")));
        }
        details
    }
}

/// League-wide averages across a roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSummary {
    pub teams: usize,
    pub avg_xg_for: f64,
    pub avg_xg_against: f64,
    /// Pearson correlation between per-match xG and actual goals scored; `None` if undefined.
    pub xg_goals_correlation: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub teams: Vec<TeamRecord>,
}
impl TeamRoster {
    pub fn read_json_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let file = File::open(path.as_ref())?;
        let roster: Self = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            "loaded {} teams from {}",
            roster.teams.len(),
            path.as_ref().display()
        );
        Ok(roster)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RosterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn find(&self, name: &str, season: &str) -> Option<&TeamRecord> {
        self.teams
            .iter()
            .find(|team| team.name.eq_ignore_ascii_case(name) && team.season == season)
    }

    pub fn by_league<'a>(&'a self, league: &'a str) -> impl Iterator<Item = &'a TeamRecord> + 'a {
        self.teams
            .iter()
            .filter(move |team| team.league.eq_ignore_ascii_case(league))
    }

    pub fn by_season<'a>(&'a self, season: &'a str) -> impl Iterator<Item = &'a TeamRecord> + 'a {
        self.teams.iter().filter(move |team| team.season == season)
    }

    /// Distinct team names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.teams.iter().map(|team| team.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Records of the named team, newest season first.
    pub fn seasons_of(&self, name: &str) -> Vec<&TeamRecord> {
        let mut seasons: Vec<_> = self
            .teams
            .iter()
            .filter(|team| team.name.eq_ignore_ascii_case(name))
            .collect();
        seasons.sort_by(|a, b| b.season.cmp(&a.season));
        seasons
    }

    pub fn summary(&self) -> Option<RosterSummary> {
        if self.teams.is_empty() {
            return None;
        }
        let teams = self.teams.len();
        let xg: Vec<_> = self.teams.iter().map(|team| team.stats.avg_xg_for).collect();
        let goals: Vec<_> = self
            .teams
            .iter()
            .map(|team| team.stats.avg_goals_for())
            .collect();
        Some(RosterSummary {
            teams,
            avg_xg_for: mean(&xg),
            avg_xg_against: self
                .teams
                .iter()
                .map(|team| team.stats.avg_xg_against)
                .sum::<f64>()
                / teams as f64,
            xg_goals_correlation: correlation(&xg, &goals),
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    debug_assert_eq!(x.len(), y.len());
    let (mean_x, mean_y) = (mean(x), mean(y));
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&x, &y) in x.iter().zip(y) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    let denominator = (var_x * var_y).sqrt();
    if denominator > 0.0 && denominator.is_finite() {
        Some(cov / denominator)
    } else {
        None
    }
}
