pub mod aggregate;
pub mod exec;

pub use aggregate::{aggregate, day_rows};
pub use exec::{exec, get_commit_status, ScoreMode, Scorecard};
