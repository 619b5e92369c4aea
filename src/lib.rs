//! PetHaven - pet-adoption marketplace library.
//!
//! A REST API backing the mobile client (pet browsing, owner directory,
//! cruelty reporting, showcase feed) and its admin console, plus the
//! UI-agnostic client state layer.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod models;
pub mod server;
pub mod store;
pub mod validation;
