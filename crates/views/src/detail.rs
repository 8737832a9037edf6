use std::sync::Arc;

use cwcrm_core::{Entity, FieldValue, Stored};

use crate::navigation::Navigator;

/// Read-only view of one stored record.
pub struct DetailView<E> {
    record: Stored<E>,
    navigator: Arc<dyn Navigator>,
}

impl<E: Entity> DetailView<E> {
    pub fn new(record: Stored<E>, navigator: Arc<dyn Navigator>) -> Self {
        Self { record, navigator }
    }

    pub fn record(&self) -> &Stored<E> {
        &self.record
    }

    /// Labelled values in display order, headed by the id.
    pub fn fields(&self) -> Vec<FieldValue> {
        let mut fields = vec![FieldValue::new("ID", self.record.id.to_string())];
        fields.extend(self.record.fields.fields());
        fields
    }

    pub fn previous_state(&self) {
        self.navigator.previous_state();
    }
}
