//! Field structs for every CRM entity.
//!
//! Each struct:
//! - carries the entity's fields in camelCase wire form, without `id`
//! - derives [`validator::Validate`] for its required fields
//! - implements [`Entity`](crate::entity::Entity) with an explicit field mapping
//!
//! Single-field lookup tables share one definition macro in [`lookup`].

pub mod action;
pub mod contact_sub_status;
pub mod employee_sub_type;
pub mod enrollment_agency;
pub mod lookup;
pub mod participant;
pub mod physician;
pub mod referral;
pub mod support_coordinator;

pub use action::Action;
pub use contact_sub_status::ContactSubStatus;
pub use employee_sub_type::EmployeeSubType;
pub use enrollment_agency::EnrollmentAgency;
pub use lookup::{
    ContactStatus, ContactType, Department, EmployeeType, Mco, Priority, ReferralSource,
    ReferralType, Waiver,
};
pub use participant::{Participant, ParticipantStatus};
pub use physician::Physician;
pub use referral::Referral;
pub use support_coordinator::SupportCoordinator;
