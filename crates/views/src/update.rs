//! Create/edit form for one record.

use std::sync::Arc;

use cwcrm_client::{ClientError, EntityApi};
use cwcrm_core::{Entity, Record, Stored};
use cwcrm_events::{ChangeKind, CrmEvent, EventBus};
use tokio::sync::watch;

use crate::alert::AlertService;
use crate::navigation::Navigator;

/// Form bound to a new draft or an existing record of type `E`.
///
/// `save` takes `&mut self`, so one form can never have two saves in
/// flight. The saving flag is published on a [`watch`] channel for
/// front ends that disable their submit button while it is set.
pub struct UpdateForm<E, S> {
    service: S,
    bus: Arc<EventBus>,
    navigator: Arc<dyn Navigator>,
    alerts: Arc<AlertService>,
    record: Record<E>,
    saving: watch::Sender<bool>,
}

/// Raises the saving flag for its lifetime.
struct SavingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> SavingGuard<'a> {
    fn raise(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl<E, S> UpdateForm<E, S>
where
    E: Entity,
    S: EntityApi<E>,
{
    pub fn new(
        service: S,
        bus: Arc<EventBus>,
        navigator: Arc<dyn Navigator>,
        alerts: Arc<AlertService>,
        record: Record<E>,
    ) -> Self {
        let (saving, _) = watch::channel(false);
        Self {
            service,
            bus,
            navigator,
            alerts,
            record,
            saving,
        }
    }

    pub fn record(&self) -> &Record<E> {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Record<E> {
        &mut self.record
    }

    /// Editable fields of the bound record.
    pub fn fields_mut(&mut self) -> &mut E {
        self.record.fields_mut()
    }

    pub fn is_saving(&self) -> bool {
        *self.saving.borrow()
    }

    /// Receiver that follows the saving flag.
    pub fn saving_state(&self) -> watch::Receiver<bool> {
        self.saving.subscribe()
    }

    /// Persist the bound record.
    ///
    /// New drafts are created, existing records are updated. On success the
    /// change is broadcast, the form rebinds to the saved record and
    /// navigates back. On failure the error is raised as an alert and the
    /// form stays where it is.
    pub async fn save(&mut self) -> Result<Stored<E>, ClientError> {
        let result = {
            let _saving = SavingGuard::raise(&self.saving);
            match &self.record {
                Record::New(fields) => self
                    .service
                    .create(fields)
                    .await
                    .map(|saved| (ChangeKind::Created, saved)),
                Record::Existing(stored) => self
                    .service
                    .update(stored)
                    .await
                    .map(|saved| (ChangeKind::Updated, saved)),
            }
        };

        match result {
            Ok((change, saved)) => {
                let event = CrmEvent::changed::<E>(change, saved.id);
                self.alerts.success(event.modification().content.clone());
                self.bus.broadcast(&event);
                self.record = Record::Existing(saved.clone());
                self.navigator.previous_state();
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(entity = %E::KIND, error = %e, "Save failed");
                self.alerts.error(e.message());
                Err(e)
            }
        }
    }

    /// Leave the form without saving.
    pub fn previous_state(&self) {
        self.navigator.previous_state();
    }
}
