//! Core library exports for the smart inventory service.
//!
//! The `data` feature carries the store (domain, models, repository), the
//! gateway services and the console state container. `server` adds the
//! Actix-web application; `client` adds an HTTP gateway for the console.

#[cfg(feature = "data")]
pub mod console;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "server")]
pub mod app;
#[cfg(feature = "server")]
pub mod routes;
