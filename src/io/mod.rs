pub mod menu;
pub mod reporting;
