//! Scorelines, the outcomes defined over them, and the analytic correct-score grid implied by a
//! pair of independent Poisson rates.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::poisson;
use crate::rate::MatchRates;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u64,
    pub away: u64,
}
impl Score {
    pub fn new(home: u64, away: u64) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self::new(0, 0)
    }

    /// Total goals, widened to hold the sum of any two counts.
    pub fn total(&self) -> u128 {
        self.home as u128 + self.away as u128
    }

    pub fn winner(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
    GoalsUnder(u64),
    GoalsOver(u64),
    CorrectScore(Score),
}
impl Outcome {
    /// Whether a final `score` settles this outcome.
    pub fn includes(&self, score: &Score) -> bool {
        match self {
            Outcome::Win(side) => score.winner() == Some(*side),
            Outcome::Draw => score.home == score.away,
            Outcome::GoalsUnder(goals) => score.total() < *goals as u128,
            Outcome::GoalsOver(goals) => score.total() > *goals as u128,
            Outcome::CorrectScore(correct) => score == correct,
        }
    }

    pub fn gather(&self, scoregrid: &Scoregrid) -> f64 {
        scoregrid
            .iter()
            .filter(|(score, _)| self.includes(score))
            .map(|(_, prob)| prob)
            .sum()
    }
}

/// Joint probabilities of all scorelines up to `max_goals` per side. Mass beyond the bound is
/// omitted, so the grid sums to slightly less than 1; see [`Scoregrid::coverage`].
#[derive(Debug, Clone, PartialEq)]
pub struct Scoregrid {
    probs: Vec<f64>,
    max_goals: u64,
}
impl Scoregrid {
    pub fn from_rates(rates: &MatchRates, max_goals: u64) -> Self {
        let dim = max_goals as usize + 1;
        let home_probs: Vec<_> = (0..=max_goals)
            .map(|goals| poisson::univariate(goals, rates.home))
            .collect();
        let away_probs: Vec<_> = (0..=max_goals)
            .map(|goals| poisson::univariate(goals, rates.away))
            .collect();
        let mut probs = Vec::with_capacity(dim * dim);
        for home_prob in &home_probs {
            for away_prob in &away_probs {
                probs.push(home_prob * away_prob);
            }
        }
        Self { probs, max_goals }
    }

    /// Wraps row-major probabilities, rows being home goals and columns away goals.
    ///
    /// # Panics
    /// If `probs` does not form a square grid of side `max_goals + 1`.
    pub fn from_probs(probs: Vec<f64>, max_goals: u64) -> Self {
        let dim = max_goals as usize + 1;
        assert_eq!(dim * dim, probs.len(), "expected a {dim}x{dim} grid");
        Self { probs, max_goals }
    }

    pub fn max_goals(&self) -> u64 {
        self.max_goals
    }

    /// Probability of `score`, or 0 if it lies outside the grid.
    pub fn probability(&self, score: &Score) -> f64 {
        if score.home > self.max_goals || score.away > self.max_goals {
            0.0
        } else {
            self.probs[self.index(score)]
        }
    }

    /// Total probability mass captured by the grid.
    pub fn coverage(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Most probable scoreline, ties going to the lower total and then to the lower home score.
    pub fn most_likely(&self) -> Score {
        let mut best = (Score::nil_all(), f64::MIN);
        for (score, prob) in self.iter() {
            if prob > best.1 {
                best = (score, prob);
            }
        }
        best.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Score, f64)> + '_ {
        let dim = self.max_goals + 1;
        let mut scores: Vec<_> = self
            .probs
            .iter()
            .enumerate()
            .map(move |(index, &prob)| {
                let index = index as u64;
                (Score::new(index / dim, index % dim), prob)
            })
            .collect();
        scores.sort_by_key(|(score, _)| (score.total(), score.home));
        scores.into_iter()
    }

    fn index(&self, score: &Score) -> usize {
        (score.home * (self.max_goals + 1) + score.away) as usize
    }
}

#[cfg(test)]
mod tests;
