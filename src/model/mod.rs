pub mod attendance;
pub mod geo;
pub mod report;
pub mod staff;
