//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod activity;
pub mod articles;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod members;
pub mod publications;
pub mod search;
pub mod sponsor;
pub mod users;
