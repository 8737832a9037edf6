//! Second-level employee classification under an [`EmployeeType`](super::EmployeeType).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_opt, Entity, EntityKind, FieldValue};
use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSubType {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub employee_type_id: Option<DbId>,
}

impl Entity for EmployeeSubType {
    const KIND: EntityKind = EntityKind::EmployeeSubType;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("Name", self.name.clone()),
            FieldValue::new("Employee Type", display_opt(&self.employee_type_id)),
        ]
    }
}
