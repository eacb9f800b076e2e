//! Monte Carlo simulation of soccer scorelines from expected-goals statistics.
//! Each side's goals are modelled as an independent Poisson variable whose rate blends the side's
//! attacking xG with the opponent's defensive xGA; repeated trials yield outcome probabilities,
//! scoreline frequencies and goal moments.

pub mod config;
pub mod data;
pub mod error;
pub mod factorial;
pub mod mc;
pub mod poisson;
pub mod print;
pub mod profile;
pub mod rate;
pub mod scoregrid;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
