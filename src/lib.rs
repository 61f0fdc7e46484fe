// This file exposes the modules as public modules in the crate

pub mod assistant_handlers;
pub mod billing_handlers;
pub mod config;
pub mod errors;
pub mod llm_handler;
pub mod models;
pub mod project_handlers;
pub mod project_store;
pub mod prompts;
pub mod server;
