//! Agencies that enroll participants into waiver programs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_opt, Entity, EntityKind, FieldValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentAgency {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
}

impl Entity for EnrollmentAgency {
    const KIND: EntityKind = EntityKind::EnrollmentAgency;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("Name", self.name.clone()),
            FieldValue::new("Phone", display_opt(&self.phone)),
            FieldValue::new("Email", display_opt(&self.email)),
        ]
    }
}
