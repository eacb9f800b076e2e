//! Monte Carlo simulation of final scorelines.
//!
//! Each trial draws the home side's goals and then the away side's goals from independent Poisson
//! variables, always in that order, from a single generator. Trials can be split across workers,
//! each owning a generator seeded from the base seed and a private [`Tally`]; tallies are merged by
//! addition once all workers complete.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tinyrand::{Rand, Seeded, StdRand};
use tinyrand_std::ClockSeed;
use tracing::debug;

use crate::config::{validate_workers, Config, DEFAULT_ITERATIONS};
use crate::error::{InvalidIterationCount, SimulationError};
use crate::poisson::Sampler;
use crate::profile::TeamProfile;
use crate::rate::{MatchRates, RateEstimator};
use crate::scoregrid::{Outcome, Score, Side};

/// Counts accumulated over a batch of trials.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tally {
    pub trials: u64,
    pub home_wins: u64,
    pub away_wins: u64,
    pub draws: u64,
    pub scores: FxHashMap<Score, u64>,
    pub home_goals: RunningSum,
    pub away_goals: RunningSum,
}
impl Tally {
    #[inline]
    pub fn record(&mut self, score: Score) {
        self.trials += 1;
        match score.winner() {
            Some(Side::Home) => self.home_wins += 1,
            Some(Side::Away) => self.away_wins += 1,
            None => self.draws += 1,
        }
        *self.scores.entry(score).or_insert(0) += 1;
        self.home_goals.add(score.home);
        self.away_goals.add(score.away);
    }

    pub fn merge(&mut self, other: Tally) {
        self.trials += other.trials;
        self.home_wins += other.home_wins;
        self.away_wins += other.away_wins;
        self.draws += other.draws;
        for (score, count) in other.scores {
            *self.scores.entry(score).or_insert(0) += count;
        }
        self.home_goals.merge(&other.home_goals);
        self.away_goals.merge(&other.away_goals);
    }
}

/// Running totals of a goal sequence, sufficient for its mean and variance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunningSum {
    pub sum: f64,
    pub sum_sq: f64,
}
impl RunningSum {
    #[inline]
    pub fn add(&mut self, goals: u64) {
        let goals = goals as f64;
        self.sum += goals;
        self.sum_sq += goals * goals;
    }

    pub fn merge(&mut self, other: &RunningSum) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
    }

    pub fn mean(&self, trials: u64) -> f64 {
        self.sum / trials as f64
    }

    /// Population standard deviation.
    pub fn stddev(&self, trials: u64) -> f64 {
        let mean = self.mean(trials);
        f64::max(0.0, self.sum_sq / trials as f64 - mean * mean).sqrt()
    }
}

/// Number of trials in which a side scored each goal total. Only totals that occurred are kept.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GoalDistribution {
    pub counts: BTreeMap<u64, u64>,
}
impl GoalDistribution {
    fn add(&mut self, goals: u64, count: u64) {
        *self.counts.entry(goals).or_insert(0) += count;
    }

    pub fn trials(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn count(&self, goals: u64) -> u64 {
        self.counts.get(&goals).copied().unwrap_or_default()
    }

    pub fn probability(&self, goals: u64) -> f64 {
        self.count(goals) as f64 / self.trials() as f64
    }

    pub fn mean(&self) -> f64 {
        let weighted = self
            .counts
            .iter()
            .map(|(&goals, &count)| goals as f64 * count as f64)
            .sum::<f64>();
        weighted / self.trials() as f64
    }

    /// Population standard deviation.
    pub fn stddev(&self) -> f64 {
        let mean = self.mean();
        let sum_sq_dev = self
            .counts
            .iter()
            .map(|(&goals, &count)| count as f64 * (goals as f64 - mean).powi(2))
            .sum::<f64>();
        (sum_sq_dev / self.trials() as f64).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFrequency {
    pub score: Score,
    pub count: u64,
    pub probability: f64,
}

/// Aggregate of a completed simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub iterations: u64,
    pub win_prob_home: f64,
    pub win_prob_away: f64,
    pub draw_prob: f64,
    pub score_frequency: BTreeMap<Score, u64>,
    pub home_goals: GoalDistribution,
    pub away_goals: GoalDistribution,
    pub mean_home_goals: f64,
    pub mean_away_goals: f64,
    pub stddev_home_goals: f64,
    pub stddev_away_goals: f64,
    pub most_likely_score: Score,
}
impl SimulationResult {
    /// The `k` most frequent scorelines, ranked by count and then by the same tie-break as
    /// [`SimulationResult::most_likely_score`].
    pub fn top_scores(&self, k: usize) -> Vec<ScoreFrequency> {
        let mut ranked: Vec<_> = self
            .score_frequency
            .iter()
            .map(|(&score, &count)| ScoreFrequency {
                score,
                count,
                probability: count as f64 / self.iterations as f64,
            })
            .collect();
        ranked.sort_by_key(|frequency| {
            (
                Reverse(frequency.count),
                frequency.score.total(),
                frequency.score.home,
            )
        });
        ranked.truncate(k);
        ranked
    }

    pub fn frequency(&self, score: &Score) -> u64 {
        self.score_frequency.get(score).copied().unwrap_or_default()
    }

    /// Empirical probability of `outcome` across all trials.
    pub fn probability(&self, outcome: &Outcome) -> f64 {
        let count = self
            .score_frequency
            .iter()
            .filter(|(score, _)| outcome.includes(score))
            .map(|(_, &count)| count)
            .sum::<u64>();
        count as f64 / self.iterations as f64
    }
}

impl From<Tally> for SimulationResult {
    fn from(tally: Tally) -> Self {
        let iterations = tally.trials;
        debug_assert!(iterations > 0);
        let score_frequency: BTreeMap<_, _> = tally.scores.into_iter().collect();

        let (mut home_goals, mut away_goals) =
            (GoalDistribution::default(), GoalDistribution::default());
        for (score, &count) in &score_frequency {
            home_goals.add(score.home, count);
            away_goals.add(score.away, count);
        }

        let most_likely_score = score_frequency
            .iter()
            .min_by_key(|(score, &count)| (Reverse(count), score.total(), score.home))
            .map(|(&score, _)| score)
            .unwrap_or_else(Score::nil_all);

        let (mean_home_goals, mean_away_goals) = (home_goals.mean(), away_goals.mean());
        let (stddev_home_goals, stddev_away_goals) = (home_goals.stddev(), away_goals.stddev());
        debug_assert!(agrees(tally.home_goals.mean(iterations), mean_home_goals));
        debug_assert!(agrees(tally.away_goals.mean(iterations), mean_away_goals));

        let iterations_f64 = iterations as f64;
        Self {
            iterations,
            win_prob_home: tally.home_wins as f64 / iterations_f64,
            win_prob_away: tally.away_wins as f64 / iterations_f64,
            draw_prob: tally.draws as f64 / iterations_f64,
            score_frequency,
            home_goals,
            away_goals,
            mean_home_goals,
            mean_away_goals,
            stddev_home_goals,
            stddev_away_goals,
            most_likely_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloEngine {
    iterations: u64,
    seed: Option<u64>,
    workers: usize,
}
impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            workers: 1,
        }
    }
}
impl MonteCarloEngine {
    #[must_use]
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn simulate(&self, rates: &MatchRates) -> Result<SimulationResult, SimulationError> {
        if self.iterations == 0 {
            return Err(InvalidIterationCount(self.iterations).into());
        }
        rates.validate()?;
        validate_workers(self.workers)?;

        // workers beyond the trial count would receive no trials
        let workers = usize::try_from(self.iterations).map_or(self.workers, |iterations| {
            usize::min(self.workers, iterations)
        });
        let seed = self
            .seed
            .unwrap_or_else(|| ClockSeed::default().next_u64());
        debug!(
            "simulating {} trials across {workers} worker(s) with seed {seed}, rates {rates:?}",
            self.iterations
        );
        let home = Sampler::new(rates.home);
        let away = Sampler::new(rates.away);
        let seeds = worker_seeds(seed, workers);

        let tally = if workers == 1 {
            run_trials(&home, &away, self.iterations, seeds[0])
        } else {
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(worker, seed)| {
                    let trials = worker_share(self.iterations, workers, worker);
                    run_trials(&home, &away, trials, seed)
                })
                .reduce(Tally::default, |mut merged, tally| {
                    merged.merge(tally);
                    merged
                })
        };
        Ok(tally.into())
    }
}

impl From<&Config> for MonteCarloEngine {
    fn from(config: &Config) -> Self {
        MonteCarloEngine::default()
            .with_iterations(config.iterations)
            .with_seed_option(config.seed)
            .with_workers(config.workers)
    }
}

/// Runs `iterations` trials for the given rates on a single worker. Supplying a `seed` makes the
/// result reproducible.
pub fn simulate(
    rates: &MatchRates,
    iterations: u64,
    seed: Option<u64>,
) -> Result<SimulationResult, SimulationError> {
    MonteCarloEngine::default()
        .with_iterations(iterations)
        .with_seed_option(seed)
        .simulate(rates)
}

/// Estimates the fixture's scoring rates with the arithmetic-mean blend and simulates it.
pub fn simulate_match(
    home: &TeamProfile,
    away: &TeamProfile,
    config: &Config,
) -> Result<SimulationResult, SimulationError> {
    config.validate()?;
    let rates = RateEstimator::from(config).estimate(home, away)?;
    MonteCarloEngine::from(config).simulate(&rates)
}

fn agrees(running: f64, exact: f64) -> bool {
    (running - exact).abs() <= 1e-9 * f64::max(1.0, exact.abs())
}

fn run_trials(home: &Sampler, away: &Sampler, trials: u64, seed: u64) -> Tally {
    let mut rand = StdRand::seed(seed);
    let mut tally = Tally::default();
    for _ in 0..trials {
        let home_goals = home.sample(&mut rand);
        let away_goals = away.sample(&mut rand);
        tally.record(Score::new(home_goals, away_goals));
    }
    tally
}

fn worker_seeds(seed: u64, workers: usize) -> Vec<u64> {
    let mut seeder = StdRand::seed(seed);
    (0..workers).map(|_| seeder.next_u64()).collect()
}

/// Trials assigned to `worker`; the remainder goes to the lowest-numbered workers.
fn worker_share(iterations: u64, workers: usize, worker: usize) -> u64 {
    let workers = workers as u64;
    let worker = worker as u64;
    iterations / workers + u64::from(worker < iterations % workers)
}
