pub mod attendance;
pub mod calendar;
pub mod report;
pub mod sweeper;
pub mod workflow;
