pub mod attendance;
pub mod attendance_request;
pub mod employee;
pub mod holiday;
pub mod role;
