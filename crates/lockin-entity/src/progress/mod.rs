//! Progress value objects.

pub mod interval;
pub mod row;

pub use interval::LoggedInterval;
pub use row::ProgressRow;
