pub mod chatbot;
pub mod config;
pub mod infer;
pub mod service;
