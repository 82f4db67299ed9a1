// Core engine exports
pub mod flatten;
pub mod rate_limit;
pub mod scheduler;
pub mod screener;

pub use flatten::{flatten, header};
pub use rate_limit::SlidingWindowLimiter;
pub use scheduler::{partition, BatchScheduler, RunSummary};
pub use screener::AddressScreener;
