//! Team scoring-strength summaries.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::InvalidProfile;

/// A team's per-match expected goals for (`xg`) and against (`xga`) in a given season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub name: String,
    pub season: String,
    pub xg: f64,
    pub xga: f64,
}
impl TeamProfile {
    pub fn new(name: impl Into<String>, season: impl Into<String>, xg: f64, xga: f64) -> Self {
        Self {
            name: name.into(),
            season: season.into(),
            xg,
            xga,
        }
    }

    pub fn display_name(&self) -> String {
        self.to_string()
    }

    pub fn validate(&self) -> Result<(), InvalidProfile> {
        for (stat, value) in [("xG", self.xg), ("xGA", self.xga)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(InvalidProfile {
                    team: self.display_name(),
                    stat,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Display for TeamProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.season)
    }
}
