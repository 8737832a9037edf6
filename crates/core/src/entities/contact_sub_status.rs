//! Detail outcome under a [`ContactStatus`](super::ContactStatus).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_opt, Entity, EntityKind, FieldValue};
use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubStatus {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub contact_status_id: Option<DbId>,
}

impl Entity for ContactSubStatus {
    const KIND: EntityKind = EntityKind::ContactSubStatus;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("Name", self.name.clone()),
            FieldValue::new("Contact Status", display_opt(&self.contact_status_id)),
        ]
    }
}
