pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod github;
pub mod model;
pub mod render;
pub mod score;
pub mod tui;
pub mod util;
