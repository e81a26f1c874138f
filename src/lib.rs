//! artpager - page through a public artwork catalog and select rows across
//! pages from the terminal.

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod tasks;
pub mod ui;
