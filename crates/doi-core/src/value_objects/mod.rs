//! Value objects - immutable types that represent domain concepts

mod action;
pub mod identifiers;

pub use action::{action_prefix, AuthAction, EntityAction, EntityType, SYSTEM_CLEANUP};
