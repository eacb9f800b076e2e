//! Errors raised by the rate estimator and the simulation engine. All are argument-validation
//! failures, reported before any trial is run.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("{0}")]
    InvalidProfile(#[from] InvalidProfile),

    #[error("{0}")]
    InvalidRate(#[from] InvalidRate),

    #[error("{0}")]
    InvalidIterationCount(#[from] InvalidIterationCount),

    #[error("{0}")]
    InvalidConfiguration(#[from] InvalidConfiguration),
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid profile for {team}: {stat} must be positive and finite, got {value}")]
pub struct InvalidProfile {
    pub team: String,
    pub stat: &'static str,
    pub value: f64,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid {side} scoring rate: must be positive and finite, got {value}")]
pub struct InvalidRate {
    pub side: &'static str,
    pub value: f64,
}

#[derive(Debug, Error, PartialEq)]
#[error("iteration count must be at least 1, got {0}")]
pub struct InvalidIterationCount(pub u64);

#[derive(Debug, Error, PartialEq)]
pub enum InvalidConfiguration {
    #[error("unrecognised configuration option '{0}'")]
    Unrecognised(String),

    #[error("malformed value '{value}' for configuration option '{key}'")]
    Malformed { key: String, value: String },

    #[error("configuration option '{key}' is out of range: {reason}")]
    OutOfRange { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_profile() {
        let err = SimulationError::from(InvalidProfile {
            team: "Arsenal (2023-2024)".into(),
            stat: "xG",
            value: 0.0,
        });
        assert_eq!(
            "invalid profile for Arsenal (2023-2024): xG must be positive and finite, got 0",
            err.to_string()
        );
    }

    #[test]
    fn display_invalid_rate() {
        let err = SimulationError::from(InvalidRate {
            side: "away",
            value: f64::NAN,
        });
        assert_eq!(
            "invalid away scoring rate: must be positive and finite, got NaN",
            err.to_string()
        );
    }

    #[test]
    fn display_invalid_iteration_count() {
        assert_eq!(
            "iteration count must be at least 1, got 0",
            SimulationError::from(InvalidIterationCount(0)).to_string()
        );
    }

    #[test]
    fn display_invalid_configuration() {
        assert_eq!(
            "unrecognised configuration option 'trials'",
            InvalidConfiguration::Unrecognised("trials".into()).to_string()
        );
        assert_eq!(
            "malformed value 'many' for configuration option 'iterations'",
            InvalidConfiguration::Malformed {
                key: "iterations".into(),
                value: "many".into()
            }
            .to_string()
        );
    }
}
