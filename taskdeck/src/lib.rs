//! `TaskDeck` — terminal-native task list manager library.

pub mod app;
pub mod config;
pub mod ui;
