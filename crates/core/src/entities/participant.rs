//! Participants: the people the CRM tracks services for.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_date, display_opt, Entity, EntityKind, FieldValue};
use crate::types::{Date, DbId};

/// Enrollment state of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Pending,
    Active,
    Inactive,
    Discharged,
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParticipantStatus::Pending => "PENDING",
            ParticipantStatus::Active => "ACTIVE",
            ParticipantStatus::Inactive => "INACTIVE",
            ParticipantStatus::Discharged => "DISCHARGED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    pub date_of_birth: Option<Date>,
    pub medicaid_id: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<ParticipantStatus>,
    pub waiver_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub mco_id: Option<DbId>,
    pub physician_id: Option<DbId>,
    pub support_coordinator_id: Option<DbId>,
}

impl Participant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for Participant {
    const KIND: EntityKind = EntityKind::Participant;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("First Name", self.first_name.clone()),
            FieldValue::new("Last Name", self.last_name.clone()),
            FieldValue::new("Date Of Birth", display_date(&self.date_of_birth)),
            FieldValue::new("Medicaid Id", display_opt(&self.medicaid_id)),
            FieldValue::new("Phone", display_opt(&self.phone)),
            FieldValue::new("Email", display_opt(&self.email)),
            FieldValue::new("Address", display_opt(&self.address)),
            FieldValue::new("Status", display_opt(&self.status)),
            FieldValue::new("Waiver", display_opt(&self.waiver_id)),
            FieldValue::new("Department", display_opt(&self.department_id)),
            FieldValue::new("MCO", display_opt(&self.mco_id)),
            FieldValue::new("Physician", display_opt(&self.physician_id)),
            FieldValue::new(
                "Support Coordinator",
                display_opt(&self.support_coordinator_id),
            ),
        ]
    }
}
