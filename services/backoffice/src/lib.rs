//! Back-office service for the coatings business
//!
//! Stores products, price calculations, generated documents and commercial
//! proposals behind an email-whitelist gate fed by an external OAuth
//! exchange. The session authenticator and the proposal lifecycle tracker
//! reach the document store through trait contracts; everything else is
//! plain collection CRUD.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod proposals;
pub mod repositories;
pub mod routes;
pub mod state;

pub use state::AppState;
