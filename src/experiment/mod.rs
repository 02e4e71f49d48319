//! Seeded experiments comparing election processes.
//!
//! A [`Scenario`] turns a partisan lean into a population and a candidate
//! slate; [`ExperimentRunner`] sweeps leans, derives one ballot set per
//! trial, and runs every configured [`Election`](crate::process::Election)
//! over it. [`ExperimentResult`] keeps one [`TrialRecord`] per trial and
//! election and summarizes mean satisfaction per process.
//!
//! With the `parallel` feature, trials can run on the rayon pool.

mod config;
mod runner;
mod scenario;
mod types;

pub use config::ExperimentConfig;
pub use runner::ExperimentRunner;
pub use scenario::NormalPartisanScenario;
pub use types::{ExperimentResult, Scenario, TrialRecord};
