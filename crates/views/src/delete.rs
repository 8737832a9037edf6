//! Delete confirmation.
//!
//! [`DeletePopup`] is what the `/<entity>/{id}/delete` route opens: it hosts
//! a [`DeleteDialog`] for the resolved record and clears the popup outlet
//! when the dialog closes, confirmed or not.

use std::sync::Arc;

use cwcrm_client::{ClientError, EntityApi};
use cwcrm_core::{CoreError, DbId, Entity, Record, Stored};
use cwcrm_events::{ChangeKind, CrmEvent, EventBus};

use crate::alert::AlertService;
use crate::navigation::Navigator;

/// Reason passed to [`ModalResult::Dismissed`] when the user cancels.
pub const DISMISS_CANCEL: &str = "cancel";

/// How a modal dialog was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalResult {
    Confirmed,
    Dismissed(String),
}

/// Asks for confirmation, then deletes one record.
pub struct DeleteDialog<E, S> {
    service: S,
    bus: Arc<EventBus>,
    alerts: Arc<AlertService>,
    record: Stored<E>,
}

impl<E, S> DeleteDialog<E, S>
where
    E: Entity,
    S: EntityApi<E>,
{
    pub fn new(
        service: S,
        bus: Arc<EventBus>,
        alerts: Arc<AlertService>,
        record: Stored<E>,
    ) -> Self {
        Self {
            service,
            bus,
            alerts,
            record,
        }
    }

    /// The record awaiting confirmation.
    pub fn record(&self) -> &Stored<E> {
        &self.record
    }

    /// Delete `id`, broadcast the change and close as confirmed.
    ///
    /// On failure the error is raised as an alert and the dialog stays open.
    pub async fn confirm_delete(&mut self, id: DbId) -> Result<ModalResult, ClientError> {
        match self.service.delete(id).await {
            Ok(()) => {
                let event = CrmEvent::changed::<E>(ChangeKind::Deleted, id);
                self.alerts.info(event.modification().content.clone());
                self.bus.broadcast(&event);
                Ok(ModalResult::Confirmed)
            }
            Err(e) => {
                tracing::warn!(entity = %E::KIND, id, error = %e, "Delete failed");
                self.alerts.error(e.message());
                Err(e)
            }
        }
    }

    /// Close without deleting.
    pub fn clear(&mut self) -> ModalResult {
        ModalResult::Dismissed(DISMISS_CANCEL.to_string())
    }
}

/// Popup outlet host for a [`DeleteDialog`].
pub struct DeletePopup<E, S> {
    service: S,
    bus: Arc<EventBus>,
    alerts: Arc<AlertService>,
    navigator: Arc<dyn Navigator>,
    dialog: Option<DeleteDialog<E, S>>,
}

impl<E, S> DeletePopup<E, S>
where
    E: Entity,
    S: EntityApi<E> + Clone,
{
    pub fn new(
        service: S,
        bus: Arc<EventBus>,
        alerts: Arc<AlertService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            service,
            bus,
            alerts,
            navigator,
            dialog: None,
        }
    }

    /// Open the dialog for a resolved record. Drafts cannot be deleted.
    pub fn open(&mut self, resolved: Record<E>) -> Result<&mut DeleteDialog<E, S>, ClientError> {
        let Record::Existing(record) = resolved else {
            return Err(CoreError::Validation(format!(
                "A new {} has nothing to delete",
                E::KIND
            ))
            .into());
        };
        tracing::debug!(entity = %E::KIND, id = record.id, "Open delete dialog");

        let dialog = DeleteDialog::new(
            self.service.clone(),
            Arc::clone(&self.bus),
            Arc::clone(&self.alerts),
            record,
        );
        Ok(self.dialog.insert(dialog))
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn dialog(&self) -> Option<&DeleteDialog<E, S>> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut DeleteDialog<E, S>> {
        self.dialog.as_mut()
    }

    /// Confirm the open dialog. A failed delete leaves it open.
    pub async fn confirm(&mut self) -> Result<ModalResult, ClientError> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Err(CoreError::Validation("No delete dialog is open".into()).into());
        };
        let id = dialog.record().id;
        let result = dialog.confirm_delete(id).await?;
        Ok(self.close(result))
    }

    /// Dismiss the open dialog, if any.
    pub fn cancel(&mut self) -> ModalResult {
        let result = match self.dialog.as_mut() {
            Some(dialog) => dialog.clear(),
            None => ModalResult::Dismissed(DISMISS_CANCEL.to_string()),
        };
        self.close(result)
    }

    /// Drop the dialog and clear the popup outlet whatever the result.
    pub fn close(&mut self, result: ModalResult) -> ModalResult {
        tracing::debug!(entity = %E::KIND, ?result, "Close delete dialog");
        self.dialog = None;
        self.navigator.clear_popup();
        result
    }
}
