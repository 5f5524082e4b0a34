pub mod app;
pub mod factories;
