//! Support coordinators who case-manage participants.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_opt, Entity, EntityKind, FieldValue};
use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupportCoordinator {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    pub enrollment_agency_id: Option<DbId>,
}

impl Entity for SupportCoordinator {
    const KIND: EntityKind = EntityKind::SupportCoordinator;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("Name", self.name.clone()),
            FieldValue::new("Phone", display_opt(&self.phone)),
            FieldValue::new("Email", display_opt(&self.email)),
            FieldValue::new(
                "Enrollment Agency",
                display_opt(&self.enrollment_agency_id),
            ),
        ]
    }
}
