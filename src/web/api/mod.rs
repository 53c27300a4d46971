pub mod catalog;
pub mod error;
pub mod sky;
pub mod tracking;
