pub mod cli;
pub mod config;
pub mod line;
pub mod poem;
pub mod quiz;
