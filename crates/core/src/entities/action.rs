//! Follow-up actions assigned to staff for a participant.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_date, display_opt, Entity, EntityKind, FieldValue};
use crate::types::{Date, DbId};

/// A dated to-do item tied to a participant.
///
/// `due_date`, `assigned_to_id`, `participant_id` and `priority_id` are
/// required before the record can be saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[validate(required(message = "due date is required"))]
    pub due_date: Option<Date>,
    #[validate(length(max = 2000, message = "description is too long"))]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[validate(required(message = "assignee is required"))]
    pub assigned_to_id: Option<DbId>,
    /// Login of the assigned user, filled in by the server on reads.
    pub assigned_to_login: Option<String>,
    #[validate(required(message = "participant is required"))]
    pub participant_id: Option<DbId>,
    #[validate(required(message = "priority is required"))]
    pub priority_id: Option<DbId>,
}

impl Entity for Action {
    const KIND: EntityKind = EntityKind::Action;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("Due Date", display_date(&self.due_date)),
            FieldValue::new("Description", display_opt(&self.description)),
            FieldValue::new("Completed", if self.completed { "yes" } else { "no" }),
            FieldValue::new(
                "Assigned To",
                self.assigned_to_login
                    .clone()
                    .unwrap_or_else(|| display_opt(&self.assigned_to_id)),
            ),
            FieldValue::new("Participant", display_opt(&self.participant_id)),
            FieldValue::new("Priority", display_opt(&self.priority_id)),
        ]
    }
}
