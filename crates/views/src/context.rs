//! Composition root.
//!
//! One [`AppContext`] per session owns the shared pieces: HTTP connection,
//! event bus, alert queue and navigation history. Views are built from it
//! so every view of every entity shares the same bus and history.

use std::sync::Arc;

use cwcrm_client::{ClientConfig, ClientError, CrmApi, EntityService};
use cwcrm_core::{Entity, Record, Stored};
use cwcrm_events::EventBus;

use crate::alert::AlertService;
use crate::delete::DeletePopup;
use crate::detail::DetailView;
use crate::list::ListView;
use crate::navigation::{History, Navigator};
use crate::resolver::RouteResolver;
use crate::update::UpdateForm;

#[derive(Clone)]
pub struct AppContext {
    api: CrmApi,
    bus: Arc<EventBus>,
    alerts: Arc<AlertService>,
    history: Arc<History>,
}

impl AppContext {
    pub fn new(api: CrmApi) -> Self {
        Self {
            api,
            bus: Arc::new(EventBus::new()),
            alerts: Arc::new(AlertService::new()),
            history: Arc::new(History::new()),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        tracing::info!(api_url = %config.api_url, "Connecting to CRM");
        Ok(Self::new(CrmApi::new(config)?))
    }

    pub fn api(&self) -> &CrmApi {
        &self.api
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn alerts(&self) -> &Arc<AlertService> {
        &self.alerts
    }

    pub fn history(&self) -> &Arc<History> {
        &self.history
    }

    pub fn service<E: Entity>(&self) -> EntityService<E> {
        self.api.service::<E>()
    }

    pub fn list_view<E: Entity>(&self) -> ListView<E, EntityService<E>> {
        ListView::new(
            self.service(),
            Arc::clone(&self.bus),
            Arc::clone(&self.alerts),
        )
    }

    pub fn update_form<E: Entity>(&self, record: Record<E>) -> UpdateForm<E, EntityService<E>> {
        UpdateForm::new(
            self.service(),
            Arc::clone(&self.bus),
            self.navigator(),
            Arc::clone(&self.alerts),
            record,
        )
    }

    pub fn delete_popup<E: Entity>(&self) -> DeletePopup<E, EntityService<E>> {
        DeletePopup::new(
            self.service(),
            Arc::clone(&self.bus),
            Arc::clone(&self.alerts),
            self.navigator(),
        )
    }

    pub fn detail_view<E: Entity>(&self, record: Stored<E>) -> DetailView<E> {
        DetailView::new(record, self.navigator())
    }

    pub fn resolver<E: Entity + Default>(&self) -> RouteResolver<E, EntityService<E>> {
        RouteResolver::new(self.service())
    }

    fn navigator(&self) -> Arc<dyn Navigator> {
        self.history.clone()
    }
}
