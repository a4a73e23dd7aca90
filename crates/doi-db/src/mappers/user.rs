//! User entity <-> model mapper

use doi_core::entities::{Sponsor, User};

use crate::models::{SponsorModel, UserModel};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            // The column is CHECK-constrained; an unknown value can only come
            // from manual edits and degrades to the least privileged role
            role: model.role.parse().unwrap_or_default(),
            is_active: model.is_active,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert SponsorModel to Sponsor entity
impl From<SponsorModel> for Sponsor {
    fn from(model: SponsorModel) -> Self {
        Sponsor {
            id: model.id,
            name: model.name,
            email: model.email,
            crossref_member_id: model.crossref_member_id,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
