pub mod cursor;
pub mod driver;
pub mod metrics;
pub mod working_set;

#[cfg(test)]
mod unit_tests;

pub use cursor::RefillCursor;
pub use driver::{SimStatus, SimulationDriver};
pub use metrics::{ceil_div, RoundMetrics, RunMetrics, RunReport};
pub use working_set::{ProcessOutcome, WorkingSet};
