// Domain model exports
pub mod domain;

pub use domain::{Cluster, Exposure, ExposureType, RiskProfile, ScreenStatus, ScreeningOutcome};
