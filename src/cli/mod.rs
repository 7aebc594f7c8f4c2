pub mod dashboard;
pub mod exchange;
pub mod gap;
pub mod inflation;
pub mod ratio;
pub mod setup;
pub mod ui;
