pub mod analytics;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod pdf;
pub mod render;
pub mod state;
pub mod storage;
pub mod workflow;
