//! ActivityLog entity <-> model mapper

use doi_core::entities::{ActivityLog, ActivityRecord};
use doi_core::traits::ActionCount;

use crate::models::{ActionCountModel, ActivityLogModel, ActivityRecordModel};

/// A row read back from the table is always persisted, so `id` is set
impl From<ActivityLogModel> for ActivityLog {
    fn from(model: ActivityLogModel) -> Self {
        ActivityLog {
            id: Some(model.id),
            user_id: model.user_id,
            action: model.action,
            description: model.description,
            ip_address: model.ip_address,
            member_id: model.member_id,
            publication_id: model.publication_id,
            created_at: model.created_at,
        }
    }
}

impl From<ActivityRecordModel> for ActivityRecord {
    fn from(model: ActivityRecordModel) -> Self {
        ActivityRecord {
            entry: model.entry.into(),
            user_name: model.user_name,
        }
    }
}

impl From<ActionCountModel> for ActionCount {
    fn from(model: ActionCountModel) -> Self {
        ActionCount {
            action: model.action,
            count: model.count,
        }
    }
}
