//! CRM invalidation events and the in-process bus that carries them.
//!
//! - [`EventBus`]: injectable publish/subscribe registry with explicit
//!   subscription handles and synchronous, ordered delivery.
//! - [`CrmEvent`]: one variant per entity, so subscribers match exhaustively.
//! - [`Modification`]: what changed (created, updated, deleted) and on which id.

pub mod bus;
pub mod event;

pub use bus::{EventBus, SubscriptionHandle};
pub use event::{ChangeKind, CrmEvent, Modification};
