//! Caller-supplied simulation options.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidConfiguration;

pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Upper bound on the number of parallel workers.
pub const MAX_WORKERS: usize = 1_024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of Monte Carlo trials. Probability estimates carry an error of roughly `1/√N`.
    pub iterations: u64,

    /// Makes a run reproducible when set.
    pub seed: Option<u64>,

    /// Multiplier applied to the home scoring rate; 1.0 disables home advantage.
    pub home_advantage: f64,

    /// Number of parallel workers the trials are split across.
    pub workers: usize,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            home_advantage: 1.0,
            workers: 1,
        }
    }
}
impl Config {
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
    pub fn with_home_advantage(mut self, home_advantage: f64) -> Self {
        self.home_advantage = home_advantage;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Overrides a single option by name. `home_advantage_multiplier` is accepted as an alias of
    /// `home_advantage`, and a seed of `none` clears the seed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), InvalidConfiguration> {
        match key {
            "iterations" => self.iterations = parse(key, value)?,
            "seed" => {
                self.seed = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(parse(key, value)?)
                }
            }
            "home_advantage" | "home_advantage_multiplier" => {
                self.home_advantage = parse(key, value)?
            }
            "workers" => self.workers = parse(key, value)?,
            _ => return Err(InvalidConfiguration::Unrecognised(key.into())),
        }
        Ok(())
    }

    /// Applies a `key=value` override.
    pub fn apply(&mut self, assignment: &str) -> Result<(), InvalidConfiguration> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| InvalidConfiguration::Malformed {
                key: assignment.into(),
                value: String::new(),
            })?;
        self.set(key.trim(), value.trim())
    }

    /// Checks the options that are not validated elsewhere; the iteration count is checked by the
    /// engine itself.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        validate_home_advantage(self.home_advantage)?;
        validate_workers(self.workers)
    }
}

pub fn validate_home_advantage(home_advantage: f64) -> Result<(), InvalidConfiguration> {
    if home_advantage > 0.0 && home_advantage.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfiguration::OutOfRange {
            key: "home_advantage",
            reason: format!("must be positive and finite, got {home_advantage}"),
        })
    }
}

pub fn validate_workers(workers: usize) -> Result<(), InvalidConfiguration> {
    if (1..=MAX_WORKERS).contains(&workers) {
        Ok(())
    } else {
        Err(InvalidConfiguration::OutOfRange {
            key: "workers",
            reason: format!("must be between 1 and {MAX_WORKERS}, got {workers}"),
        })
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, InvalidConfiguration> {
    value.parse().map_err(|_| InvalidConfiguration::Malformed {
        key: key.into(),
        value: value.into(),
    })
}
