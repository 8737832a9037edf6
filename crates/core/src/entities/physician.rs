//! Primary care physicians on record for participants.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_opt, Entity, EntityKind, FieldValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Physician {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub address: Option<String>,
}

impl Entity for Physician {
    const KIND: EntityKind = EntityKind::Physician;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("Name", self.name.clone()),
            FieldValue::new("Phone", display_opt(&self.phone)),
            FieldValue::new("Fax", display_opt(&self.fax)),
            FieldValue::new("Address", display_opt(&self.address)),
        ]
    }
}
