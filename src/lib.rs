pub mod args;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod record;
pub mod terminal;
pub mod tree;
pub mod tui;
