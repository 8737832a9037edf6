//! Searchable list of one entity type, kept fresh by invalidation events.

use std::marker::PhantomData;
use std::sync::Arc;

use cwcrm_client::{ClientError, EntityApi, Page, QueryParams};
use cwcrm_core::{DbId, Entity, Stored};
use cwcrm_events::{CrmEvent, EventBus, SubscriptionHandle};
use tokio::sync::mpsc;

use crate::alert::AlertService;

/// List view state for entity type `E`.
///
/// Holds the rendered rows and the active search term. After [`init`],
/// every create, update or delete broadcast for `E` is queued and picked up
/// by the next [`sync`]. The subscription is released by [`teardown`] or
/// on drop.
///
/// [`init`]: ListView::init
/// [`sync`]: ListView::sync
/// [`teardown`]: ListView::teardown
pub struct ListView<E, S> {
    service: S,
    bus: Arc<EventBus>,
    alerts: Arc<AlertService>,
    records: Vec<Stored<E>>,
    total_count: Option<u64>,
    current_search: String,
    last_error: Option<String>,
    params: QueryParams,
    subscription: Option<(SubscriptionHandle, mpsc::UnboundedReceiver<CrmEvent>)>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> ListView<E, S>
where
    E: Entity,
    S: EntityApi<E>,
{
    pub fn new(service: S, bus: Arc<EventBus>, alerts: Arc<AlertService>) -> Self {
        Self {
            service,
            bus,
            alerts,
            records: Vec::new(),
            total_count: None,
            current_search: String::new(),
            last_error: None,
            params: QueryParams::default(),
            subscription: None,
            _entity: PhantomData,
        }
    }

    /// Paging and sorting applied to every load.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Start listening for invalidations, then load the first listing.
    ///
    /// Changes broadcast while the first load is in flight stay queued for
    /// the next [`sync`](Self::sync).
    pub async fn init(&mut self) {
        if self.subscription.is_none() {
            self.subscription = Some(self.bus.subscribe_channel(E::KIND));
        }
        self.load_all().await;
    }

    /// Reload from the server.
    ///
    /// A non-empty search term runs a search, otherwise the plain listing is
    /// fetched. On failure the rendered rows are kept and the message goes
    /// to the alert service.
    pub async fn load_all(&mut self) {
        let result = if self.current_search.is_empty() {
            self.service.query(&self.params).await
        } else {
            self.service.search(&self.current_search, &self.params).await
        };

        match result {
            Ok(page) => self.apply(page),
            Err(e) => self.fail(e),
        }
    }

    /// Search for `query`. A blank query behaves like [`clear`](Self::clear);
    /// any other query is sent as given.
    pub async fn search(&mut self, query: &str) {
        if query.trim().is_empty() {
            return self.clear().await;
        }
        self.current_search = query.to_string();
        self.load_all().await;
    }

    /// Drop the search term and reload the full listing.
    pub async fn clear(&mut self) {
        self.current_search.clear();
        self.load_all().await;
    }

    /// Drain queued invalidations and reload once if any arrived.
    ///
    /// Returns `true` when a reload happened.
    pub async fn sync(&mut self) -> bool {
        let Some((_, rx)) = self.subscription.as_mut() else {
            return false;
        };

        let mut pending = 0usize;
        while let Ok(event) = rx.try_recv() {
            tracing::debug!(
                event_name = event.event_name(),
                content = %event.modification().content,
                "List invalidated"
            );
            pending += 1;
        }

        if pending == 0 {
            return false;
        }
        self.load_all().await;
        true
    }

    /// Wait for the next invalidation, then reload.
    ///
    /// Returns `false` if the view is not subscribed.
    pub async fn next_change(&mut self) -> bool {
        let Some((_, rx)) = self.subscription.as_mut() else {
            return false;
        };
        if rx.recv().await.is_none() {
            return false;
        }
        while rx.try_recv().is_ok() {}
        self.load_all().await;
        true
    }
}

impl<E, S> ListView<E, S> {
    /// Stop listening for invalidations. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some((handle, _)) = self.subscription.take() {
            self.bus.destroy(&handle);
        }
    }

    /// Stable identity of a row, used to key rendered items.
    pub fn track_id(record: &Stored<E>) -> DbId {
        record.id
    }

    pub fn records(&self) -> &[Stored<E>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total reported by the server for the last successful load.
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn current_search(&self) -> &str {
        &self.current_search
    }

    /// Message of the most recent failed load, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    fn apply(&mut self, page: Page<E>) {
        self.total_count = page.total_count;
        self.records = page.items;
        self.last_error = None;
    }

    fn fail(&mut self, error: ClientError) {
        let message = error.message();
        tracing::warn!(error = %error, "Failed to load list");
        self.alerts.error(message.clone());
        self.last_error = Some(message);
    }
}

impl<E, S> Drop for ListView<E, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
