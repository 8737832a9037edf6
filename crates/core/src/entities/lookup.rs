//! Lookup entities that consist of a single required `name`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{Entity, EntityKind, FieldValue};

macro_rules! define_lookup_entity {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(default)]
            #[validate(length(min = 1, message = "name is required"))]
            pub name: String,
        }

        impl $name {
            /// Build a draft with the given name.
            pub fn named(name: impl Into<String>) -> Self {
                Self { name: name.into() }
            }
        }

        impl Entity for $name {
            const KIND: EntityKind = EntityKind::$kind;

            fn fields(&self) -> Vec<FieldValue> {
                vec![FieldValue::new("Name", self.name.clone())]
            }
        }
    };
}

define_lookup_entity! {
    /// A Medicaid waiver program a participant is enrolled under.
    Waiver => Waiver
}

define_lookup_entity! {
    /// An organisational department.
    Department => Department
}

define_lookup_entity! {
    /// Top-level employee classification.
    EmployeeType => EmployeeType
}

define_lookup_entity! {
    /// Outcome of a contact attempt.
    ContactStatus => ContactStatus
}

define_lookup_entity! {
    /// Urgency level assigned to actions.
    Priority => Priority
}

define_lookup_entity! {
    /// A managed care organisation.
    Mco => Mco
}

define_lookup_entity! {
    /// Category of an incoming referral.
    ReferralType => ReferralType
}

define_lookup_entity! {
    /// Where a referral came from.
    ReferralSource => ReferralSource
}

define_lookup_entity! {
    /// Channel used for a contact (phone, visit, mail).
    ContactType => ContactType
}
