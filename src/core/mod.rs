pub mod catalog;
pub mod logging;
pub mod persistence;
