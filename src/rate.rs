//! Conversion of team profiles into per-match scoring rates.
//!
//! Each side's rate blends its own attacking strength with the opponent's defensive weakness:
//! `λ_home = f(home.xg, away.xga)` and `λ_away = f(away.xg, home.xga)`. The blend `f` is a
//! [`Blend`] policy, defaulting to the [`ArithmeticMean`]. An optional home-advantage multiplier
//! scales `λ_home` only.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{validate_home_advantage, Config};
use crate::error::{InvalidRate, SimulationError};
use crate::profile::TeamProfile;

/// Expected goals (Poisson means) of the home and away sides for one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRates {
    pub home: f64,
    pub away: f64,
}
impl MatchRates {
    pub fn new(home: f64, away: f64) -> Result<Self, InvalidRate> {
        let rates = Self { home, away };
        rates.validate()?;
        Ok(rates)
    }

    pub fn validate(&self) -> Result<(), InvalidRate> {
        for (side, value) in [("home", self.home), ("away", self.away)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(InvalidRate { side, value });
            }
        }
        Ok(())
    }
}

/// Combines an attacking rate with the opposing defence's conceded rate.
///
/// Implementations must be non-decreasing in both arguments and strictly positive whenever both
/// arguments are.
pub trait Blend {
    fn blend(&self, attack: f64, opponent_defence: f64) -> f64;
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ArithmeticMean;

impl Blend for ArithmeticMean {
    #[inline]
    fn blend(&self, attack: f64, opponent_defence: f64) -> f64 {
        (attack + opponent_defence) / 2.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GeometricMean;

impl Blend for GeometricMean {
    #[inline]
    fn blend(&self, attack: f64, opponent_defence: f64) -> f64 {
        (attack * opponent_defence).sqrt()
    }
}

impl<F: Fn(f64, f64) -> f64> Blend for F {
    #[inline]
    fn blend(&self, attack: f64, opponent_defence: f64) -> f64 {
        self(attack, opponent_defence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateEstimator<B: Blend = ArithmeticMean> {
    blend: B,
    home_advantage: f64,
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self {
            blend: ArithmeticMean,
            home_advantage: 1.0,
        }
    }
}

impl From<&Config> for RateEstimator {
    fn from(config: &Config) -> Self {
        RateEstimator::default().with_home_advantage(config.home_advantage)
    }
}

impl<B: Blend> RateEstimator<B> {
    pub fn new(blend: B) -> Self {
        Self {
            blend,
            home_advantage: 1.0,
        }
    }

    #[must_use]
    pub fn with_blend<C: Blend>(self, blend: C) -> RateEstimator<C> {
        RateEstimator {
            blend,
            home_advantage: self.home_advantage,
        }
    }

    /// Multiplier applied to the home rate; 1.0 disables it. It must be positive and finite, which
    /// is checked when the rates are derived.
    #[must_use]
    pub fn with_home_advantage(mut self, home_advantage: f64) -> Self {
        self.home_advantage = home_advantage;
        self
    }

    pub fn home_advantage(&self) -> f64 {
        self.home_advantage
    }

    pub fn estimate(
        &self,
        home: &TeamProfile,
        away: &TeamProfile,
    ) -> Result<MatchRates, SimulationError> {
        validate_home_advantage(self.home_advantage)?;
        home.validate()?;
        away.validate()?;
        let rates = MatchRates::new(
            self.blend.blend(home.xg, away.xga) * self.home_advantage,
            self.blend.blend(away.xg, home.xga),
        )?;
        debug!("{home} v {away}: {rates:?}");
        Ok(rates)
    }
}
