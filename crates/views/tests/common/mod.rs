//! In-memory `EntityApi` used by the view tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cwcrm_client::{ClientError, EntityApi, Page, QueryParams};
use cwcrm_core::{DbId, Entity, Stored};
use tokio::sync::watch;

/// One call received by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Update(DbId),
    Delete(DbId),
    Find(DbId),
    Query,
    Search(String),
}

struct State<E> {
    next_id: DbId,
    rows: Vec<Stored<E>>,
    calls: Vec<Call>,
    fail_with: Option<(u16, String)>,
    saving_probe: Option<watch::Receiver<bool>>,
    saving_seen: Vec<bool>,
    after_query: Option<Box<dyn FnOnce() + Send>>,
}

/// Shared in-memory backend. Clones see the same rows.
pub struct FakeApi<E> {
    state: Arc<Mutex<State<E>>>,
}

impl<E> Clone for FakeApi<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<E: Entity> FakeApi<E> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                next_id: 0,
                rows: Vec::new(),
                calls: Vec::new(),
                fail_with: None,
                saving_probe: None,
                saving_seen: Vec::new(),
                after_query: None,
            })),
        }
    }

    pub fn with_rows(rows: impl IntoIterator<Item = E>) -> Self {
        let api = Self::new();
        for row in rows {
            api.insert(row);
        }
        api
    }

    pub fn insert(&self, fields: E) -> DbId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.rows.push(Stored::new(id, fields));
        id
    }

    pub fn rows(&self) -> Vec<Stored<E>> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Every following call fails with `status` and `message` until
    /// [`recover`](Self::recover).
    pub fn fail_with(&self, status: u16, message: &str) {
        self.state.lock().unwrap().fail_with = Some((status, message.to_string()));
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().fail_with = None;
    }

    /// Record the value of `probe` whenever create or update runs.
    pub fn probe_saving(&self, probe: watch::Receiver<bool>) {
        self.state.lock().unwrap().saving_probe = Some(probe);
    }

    pub fn saving_seen(&self) -> Vec<bool> {
        self.state.lock().unwrap().saving_seen.clone()
    }

    /// Run `hook` once, after the next query has read its rows but before
    /// it returns.
    pub fn after_next_query(&self, hook: impl FnOnce() + Send + 'static) {
        self.state.lock().unwrap().after_query = Some(Box::new(hook));
    }

    fn begin(&self, call: Call) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        if matches!(call, Call::Create | Call::Update(_)) {
            if let Some(seen) = state.saving_probe.as_ref().map(|p| *p.borrow()) {
                state.saving_seen.push(seen);
            }
        }
        state.calls.push(call);
        match &state.fail_with {
            Some((status, message)) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found() -> ClientError {
    ClientError::Api {
        status: 404,
        message: "Not Found".into(),
    }
}

#[async_trait]
impl<E: Entity> EntityApi<E> for FakeApi<E> {
    async fn create(&self, record: &E) -> Result<Stored<E>, ClientError> {
        self.begin(Call::Create)?;
        record.check()?;
        let id = self.insert(record.clone());
        Ok(Stored::new(id, record.clone()))
    }

    async fn update(&self, record: &Stored<E>) -> Result<Stored<E>, ClientError> {
        self.begin(Call::Update(record.id))?;
        record.fields.check()?;
        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(not_found)?;
        *row = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.begin(Call::Delete(id))?;
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|r| r.id != id);
        if state.rows.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn find(&self, id: DbId) -> Result<Stored<E>, ClientError> {
        self.begin(Call::Find(id))?;
        self.rows()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(not_found)
    }

    async fn query(&self, _params: &QueryParams) -> Result<Page<E>, ClientError> {
        self.begin(Call::Query)?;
        let rows = self.rows();
        let hook = self.state.lock().unwrap().after_query.take();
        if let Some(hook) = hook {
            hook();
        }
        let total = rows.len() as u64;
        Ok(Page::new(rows, Some(total)))
    }

    async fn search(&self, term: &str, _params: &QueryParams) -> Result<Page<E>, ClientError> {
        self.begin(Call::Search(term.to_string()))?;
        let term = term.to_lowercase();
        let rows: Vec<_> = self
            .rows()
            .into_iter()
            .filter(|r| {
                r.fields
                    .fields()
                    .iter()
                    .any(|f| f.value.to_lowercase().contains(&term))
            })
            .collect();
        let total = rows.len() as u64;
        Ok(Page::new(rows, Some(total)))
    }
}
