// ABOUTME: Library crate for Artemis exposing public API for testing and external use

pub mod app;
pub mod chat;
pub mod client;
pub mod components;
pub mod config;
pub mod documents;
pub mod error;
pub mod models;
pub mod session;
