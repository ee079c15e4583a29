//! Common library for the coatings back-office service
//!
//! This crate provides shared functionality used by the back-office
//! application: database connectivity and the document-store error taxonomy.

pub mod database;
pub mod error;
