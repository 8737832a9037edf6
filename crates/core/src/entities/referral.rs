//! Referrals of a participant into the program.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{display_date, display_opt, Entity, EntityKind, FieldValue};
use crate::types::{Date, DbId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    #[validate(required(message = "referral date is required"))]
    pub referral_date: Option<Date>,
    #[validate(length(max = 2000, message = "notes are too long"))]
    pub notes: Option<String>,
    #[validate(required(message = "participant is required"))]
    pub participant_id: Option<DbId>,
    pub referral_type_id: Option<DbId>,
    pub referral_source_id: Option<DbId>,
    pub contact_type_id: Option<DbId>,
    pub contact_status_id: Option<DbId>,
    pub contact_sub_status_id: Option<DbId>,
}

impl Entity for Referral {
    const KIND: EntityKind = EntityKind::Referral;

    fn fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new("Referral Date", display_date(&self.referral_date)),
            FieldValue::new("Notes", display_opt(&self.notes)),
            FieldValue::new("Participant", display_opt(&self.participant_id)),
            FieldValue::new("Referral Type", display_opt(&self.referral_type_id)),
            FieldValue::new("Referral Source", display_opt(&self.referral_source_id)),
            FieldValue::new("Contact Type", display_opt(&self.contact_type_id)),
            FieldValue::new("Contact Status", display_opt(&self.contact_status_id)),
            FieldValue::new(
                "Contact Sub Status",
                display_opt(&self.contact_sub_status_id),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_date;

    #[test]
    fn date_and_participant_are_required() {
        let mut referral = Referral::default();
        let msg = referral.check().unwrap_err().to_string();
        assert!(msg.contains("referral date is required"));
        assert!(msg.contains("participant is required"));

        referral.referral_date = Some(parse_date("2019-03-01").unwrap());
        referral.participant_id = Some(5);
        assert!(referral.check().is_ok());
    }

    #[test]
    fn reads_server_payload_with_nulls() {
        let referral: Referral = serde_json::from_value(serde_json::json!({
            "referralDate": "2019-03-01",
            "notes": null,
            "participantId": 5,
            "referralSourceId": null
        }))
        .unwrap();
        assert_eq!(referral.participant_id, Some(5));
        assert!(referral.referral_source_id.is_none());
    }
}
