pub mod classification;
pub mod display;
pub mod error;
pub mod race;
pub mod session;
