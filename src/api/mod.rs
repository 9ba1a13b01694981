pub mod attendance;
pub mod employee;
pub mod holiday;
pub mod report;
pub mod request;
