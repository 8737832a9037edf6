//! Headless CRUD views for CRM entities.
//!
//! Each entity module is made of the same collaborating pieces, all
//! generic over the entity type:
//!
//! - [`ListView`]: loads, searches and reloads on invalidation events.
//! - [`UpdateForm`]: binds a new or existing record and saves it.
//! - [`DeletePopup`] / [`DeleteDialog`]: confirm and perform a delete.
//! - [`DetailView`]: read-only display of one record.
//!
//! [`AppContext`] is the composition root that wires them to one
//! [`CrmApi`](cwcrm_client::CrmApi), [`EventBus`](cwcrm_events::EventBus),
//! [`AlertService`] and [`History`].

pub mod alert;
pub mod context;
pub mod delete;
pub mod detail;
pub mod list;
pub mod navigation;
pub mod resolver;
pub mod update;

pub use alert::{Alert, AlertService, Severity};
pub use context::AppContext;
pub use delete::{DeleteDialog, DeletePopup, ModalResult};
pub use detail::DetailView;
pub use list::ListView;
pub use navigation::{History, Navigator, Route};
pub use resolver::RouteResolver;
pub use update::UpdateForm;
