pub mod api;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod matcher;
pub mod monitor;
pub mod rewriter;
pub mod utils;
pub mod whitelist;
