//! The entity abstraction shared by every CRM module.
//!
//! - [`EntityKind`] names each CRM concept and knows its REST resource,
//!   route slug, and legacy invalidation event name.
//! - [`Entity`] is implemented by each entity's field struct.
//! - [`Stored`] pairs a server-assigned id with those fields.
//! - [`Record`] is the bound form state: an unsaved draft or a stored record.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{format_date, Date, DbId};

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Every CRM entity that has its own CRUD module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Participant,
    Referral,
    Action,
    SupportCoordinator,
    Waiver,
    Department,
    EmployeeType,
    EmployeeSubType,
    ContactStatus,
    ContactSubStatus,
    Priority,
    Mco,
    Physician,
    EnrollmentAgency,
    ReferralType,
    ReferralSource,
    ContactType,
}

impl EntityKind {
    /// All entity kinds, in menu order.
    pub const ALL: [EntityKind; 17] = [
        EntityKind::Participant,
        EntityKind::Referral,
        EntityKind::Action,
        EntityKind::SupportCoordinator,
        EntityKind::Waiver,
        EntityKind::Department,
        EntityKind::EmployeeType,
        EntityKind::EmployeeSubType,
        EntityKind::ContactStatus,
        EntityKind::ContactSubStatus,
        EntityKind::Priority,
        EntityKind::Mco,
        EntityKind::Physician,
        EntityKind::EnrollmentAgency,
        EntityKind::ReferralType,
        EntityKind::ReferralSource,
        EntityKind::ContactType,
    ];

    /// Singular kebab-case route segment, e.g. `support-coordinator`.
    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::Participant => "participant",
            EntityKind::Referral => "referral",
            EntityKind::Action => "action",
            EntityKind::SupportCoordinator => "support-coordinator",
            EntityKind::Waiver => "waiver",
            EntityKind::Department => "department",
            EntityKind::EmployeeType => "employee-type",
            EntityKind::EmployeeSubType => "employee-sub-type",
            EntityKind::ContactStatus => "contact-status",
            EntityKind::ContactSubStatus => "contact-sub-status",
            EntityKind::Priority => "priority",
            EntityKind::Mco => "mco",
            EntityKind::Physician => "physician",
            EntityKind::EnrollmentAgency => "enrollment-agency",
            EntityKind::ReferralType => "referral-type",
            EntityKind::ReferralSource => "referral-source",
            EntityKind::ContactType => "contact-type",
        }
    }

    /// Plural REST resource segment, e.g. `support-coordinators`.
    pub fn resource(self) -> &'static str {
        match self {
            EntityKind::Participant => "participants",
            EntityKind::Referral => "referrals",
            EntityKind::Action => "actions",
            EntityKind::SupportCoordinator => "support-coordinators",
            EntityKind::Waiver => "waivers",
            EntityKind::Department => "departments",
            EntityKind::EmployeeType => "employee-types",
            EntityKind::EmployeeSubType => "employee-sub-types",
            EntityKind::ContactStatus => "contact-statuses",
            EntityKind::ContactSubStatus => "contact-sub-statuses",
            EntityKind::Priority => "priorities",
            EntityKind::Mco => "mcos",
            EntityKind::Physician => "physicians",
            EntityKind::EnrollmentAgency => "enrollment-agencies",
            EntityKind::ReferralType => "referral-types",
            EntityKind::ReferralSource => "referral-sources",
            EntityKind::ContactType => "contact-types",
        }
    }

    /// Human-readable name, e.g. `Support Coordinator`.
    pub fn display_name(self) -> &'static str {
        match self {
            EntityKind::Participant => "Participant",
            EntityKind::Referral => "Referral",
            EntityKind::Action => "Action",
            EntityKind::SupportCoordinator => "Support Coordinator",
            EntityKind::Waiver => "Waiver",
            EntityKind::Department => "Department",
            EntityKind::EmployeeType => "Employee Type",
            EntityKind::EmployeeSubType => "Employee Sub Type",
            EntityKind::ContactStatus => "Contact Status",
            EntityKind::ContactSubStatus => "Contact Sub Status",
            EntityKind::Priority => "Priority",
            EntityKind::Mco => "MCO",
            EntityKind::Physician => "Physician",
            EntityKind::EnrollmentAgency => "Enrollment Agency",
            EntityKind::ReferralType => "Referral Type",
            EntityKind::ReferralSource => "Referral Source",
            EntityKind::ContactType => "Contact Type",
        }
    }

    /// The string event name older list screens listened on,
    /// e.g. `contactTypeListModification`. Only used for log output.
    pub fn event_name(self) -> &'static str {
        match self {
            EntityKind::Participant => "participantListModification",
            EntityKind::Referral => "referralListModification",
            EntityKind::Action => "actionListModification",
            EntityKind::SupportCoordinator => "supportCoordinatorListModification",
            EntityKind::Waiver => "waiverListModification",
            EntityKind::Department => "departmentListModification",
            EntityKind::EmployeeType => "employeeTypeListModification",
            EntityKind::EmployeeSubType => "employeeSubTypeListModification",
            EntityKind::ContactStatus => "contactStatusListModification",
            EntityKind::ContactSubStatus => "contactSubStatusListModification",
            EntityKind::Priority => "priorityListModification",
            EntityKind::Mco => "mCOListModification",
            EntityKind::Physician => "physicianListModification",
            EntityKind::EnrollmentAgency => "enrollmentAgencyListModification",
            EntityKind::ReferralType => "referralTypeListModification",
            EntityKind::ReferralSource => "referralSourceListModification",
            EntityKind::ContactType => "contactTypeListModification",
        }
    }

    /// Look up a kind by its route slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown entity '{s}'. Must be one of: {}",
                Self::ALL
                    .iter()
                    .map(|k| k.slug())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Field mapping
// ---------------------------------------------------------------------------

/// One labelled, display-ready field of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub label: &'static str,
    pub value: String,
}

impl FieldValue {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Render an optional scalar, empty when unset.
pub fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Render an optional date in wire format, empty when unset.
pub fn display_date(value: &Option<Date>) -> String {
    value.as_ref().map(format_date).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Field set of one CRM entity, without its identifier.
///
/// Implementors derive [`Validate`] for their required fields and list
/// their fields explicitly in [`fields`](Entity::fields).
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    /// Which CRM module this entity belongs to.
    const KIND: EntityKind;

    /// Labelled field values in form order.
    fn fields(&self) -> Vec<FieldValue>;

    /// Check required fields, collapsing validator output into one message.
    fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(CoreError::from)
    }
}

/// A record the server has assigned an id to.
///
/// On the wire this is the entity's fields plus a numeric `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<E> {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: E,
}

impl<E> Stored<E> {
    pub fn new(id: DbId, fields: E) -> Self {
        Self { id, fields }
    }
}

/// The record bound to a create/update form.
///
/// A `New` record has never been saved and must be created. An
/// `Existing` record has an id and must be updated in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<E> {
    New(E),
    Existing(Stored<E>),
}

impl<E> Record<E> {
    /// The server id, if the record has been saved.
    pub fn id(&self) -> Option<DbId> {
        match self {
            Record::New(_) => None,
            Record::Existing(stored) => Some(stored.id),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Record::New(_))
    }

    pub fn fields(&self) -> &E {
        match self {
            Record::New(fields) => fields,
            Record::Existing(stored) => &stored.fields,
        }
    }

    pub fn fields_mut(&mut self) -> &mut E {
        match self {
            Record::New(fields) => fields,
            Record::Existing(stored) => &mut stored.fields,
        }
    }

    pub fn into_fields(self) -> E {
        match self {
            Record::New(fields) => fields,
            Record::Existing(stored) => stored.fields,
        }
    }
}

impl<E: Default> Record<E> {
    /// An empty draft, as opened by the `/new` route.
    pub fn draft() -> Self {
        Record::New(E::default())
    }
}

impl<E> From<Stored<E>> for Record<E> {
    fn from(stored: Stored<E>) -> Self {
        Record::Existing(stored)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
