//! Typed invalidation events.

use std::fmt;

use cwcrm_core::{DbId, Entity, EntityKind};
use serde::{Deserialize, Serialize};

/// The kind of mutation that invalidated a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeKind::Created => "Created",
            ChangeKind::Updated => "Updated",
            ChangeKind::Deleted => "Deleted",
        })
    }
}

/// Payload of an invalidation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub change: ChangeKind,
    /// Id of the record that changed.
    pub id: DbId,
    /// Short human-readable summary, e.g. `"Deleted contact-type 4"`.
    pub content: String,
}

impl Modification {
    pub fn new(kind: EntityKind, change: ChangeKind, id: DbId) -> Self {
        Self {
            change,
            id,
            content: format!("{change} {kind} {id}"),
        }
    }
}

/// A list-invalidation signal, tagged with the entity whose list changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "modification", rename_all = "kebab-case")]
pub enum CrmEvent {
    Participant(Modification),
    Referral(Modification),
    Action(Modification),
    SupportCoordinator(Modification),
    Waiver(Modification),
    Department(Modification),
    EmployeeType(Modification),
    EmployeeSubType(Modification),
    ContactStatus(Modification),
    ContactSubStatus(Modification),
    Priority(Modification),
    Mco(Modification),
    Physician(Modification),
    EnrollmentAgency(Modification),
    ReferralType(Modification),
    ReferralSource(Modification),
    ContactType(Modification),
}

impl CrmEvent {
    /// Wrap a modification in the variant for `kind`.
    pub fn new(kind: EntityKind, modification: Modification) -> Self {
        match kind {
            EntityKind::Participant => CrmEvent::Participant(modification),
            EntityKind::Referral => CrmEvent::Referral(modification),
            EntityKind::Action => CrmEvent::Action(modification),
            EntityKind::SupportCoordinator => CrmEvent::SupportCoordinator(modification),
            EntityKind::Waiver => CrmEvent::Waiver(modification),
            EntityKind::Department => CrmEvent::Department(modification),
            EntityKind::EmployeeType => CrmEvent::EmployeeType(modification),
            EntityKind::EmployeeSubType => CrmEvent::EmployeeSubType(modification),
            EntityKind::ContactStatus => CrmEvent::ContactStatus(modification),
            EntityKind::ContactSubStatus => CrmEvent::ContactSubStatus(modification),
            EntityKind::Priority => CrmEvent::Priority(modification),
            EntityKind::Mco => CrmEvent::Mco(modification),
            EntityKind::Physician => CrmEvent::Physician(modification),
            EntityKind::EnrollmentAgency => CrmEvent::EnrollmentAgency(modification),
            EntityKind::ReferralType => CrmEvent::ReferralType(modification),
            EntityKind::ReferralSource => CrmEvent::ReferralSource(modification),
            EntityKind::ContactType => CrmEvent::ContactType(modification),
        }
    }

    /// Build the event for a change to entity type `E`.
    pub fn changed<E: Entity>(change: ChangeKind, id: DbId) -> Self {
        Self::new(E::KIND, Modification::new(E::KIND, change, id))
    }

    /// The entity whose list this event invalidates.
    pub fn kind(&self) -> EntityKind {
        match self {
            CrmEvent::Participant(_) => EntityKind::Participant,
            CrmEvent::Referral(_) => EntityKind::Referral,
            CrmEvent::Action(_) => EntityKind::Action,
            CrmEvent::SupportCoordinator(_) => EntityKind::SupportCoordinator,
            CrmEvent::Waiver(_) => EntityKind::Waiver,
            CrmEvent::Department(_) => EntityKind::Department,
            CrmEvent::EmployeeType(_) => EntityKind::EmployeeType,
            CrmEvent::EmployeeSubType(_) => EntityKind::EmployeeSubType,
            CrmEvent::ContactStatus(_) => EntityKind::ContactStatus,
            CrmEvent::ContactSubStatus(_) => EntityKind::ContactSubStatus,
            CrmEvent::Priority(_) => EntityKind::Priority,
            CrmEvent::Mco(_) => EntityKind::Mco,
            CrmEvent::Physician(_) => EntityKind::Physician,
            CrmEvent::EnrollmentAgency(_) => EntityKind::EnrollmentAgency,
            CrmEvent::ReferralType(_) => EntityKind::ReferralType,
            CrmEvent::ReferralSource(_) => EntityKind::ReferralSource,
            CrmEvent::ContactType(_) => EntityKind::ContactType,
        }
    }

    pub fn modification(&self) -> &Modification {
        match self {
            CrmEvent::Participant(m)
            | CrmEvent::Referral(m)
            | CrmEvent::Action(m)
            | CrmEvent::SupportCoordinator(m)
            | CrmEvent::Waiver(m)
            | CrmEvent::Department(m)
            | CrmEvent::EmployeeType(m)
            | CrmEvent::EmployeeSubType(m)
            | CrmEvent::ContactStatus(m)
            | CrmEvent::ContactSubStatus(m)
            | CrmEvent::Priority(m)
            | CrmEvent::Mco(m)
            | CrmEvent::Physician(m)
            | CrmEvent::EnrollmentAgency(m)
            | CrmEvent::ReferralType(m)
            | CrmEvent::ReferralSource(m)
            | CrmEvent::ContactType(m) => m,
        }
    }

    /// Legacy string name, e.g. `actionListModification`.
    pub fn event_name(&self) -> &'static str {
        self.kind().event_name()
    }
}
