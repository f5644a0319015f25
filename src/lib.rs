pub mod backend;
pub mod cli;
pub mod config;
pub mod context;
pub mod models;
pub mod server;
pub mod service;
pub mod storage;
