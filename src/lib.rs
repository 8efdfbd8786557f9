pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod router;
pub mod service;
pub mod views;

pub use error::RosterError;
pub use pagination::{AdjacentPages, Page, compute_adjacent};
