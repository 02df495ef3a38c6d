// Library exports for the SportCenter client
// This allows testing of internal modules

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod routes;
pub mod session;
pub mod ui;
pub mod views;
