//! Entity to model mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.
//! Enum columns are stored as text and parsed back here.

mod activity_log;
mod article;
mod member;
mod user;
