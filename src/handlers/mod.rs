pub mod dashboard;
pub mod season;
pub mod session;
