//! Client-side routes and navigation.
//!
//! Routes per entity:
//!
//! ```text
//! /<entity>                 -> List
//! /<entity>/new             -> New
//! /<entity>/{id}/view       -> View
//! /<entity>/{id}/edit       -> Edit
//! /<entity>/{id}/delete     -> Delete (popup outlet over the list)
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cwcrm_core::{CoreError, DbId, EntityKind};

/// A parsed client-side route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List(EntityKind),
    New(EntityKind),
    View(EntityKind, DbId),
    Edit(EntityKind, DbId),
    Delete(EntityKind, DbId),
}

impl Route {
    pub fn kind(&self) -> EntityKind {
        match *self {
            Route::List(kind)
            | Route::New(kind)
            | Route::View(kind, _)
            | Route::Edit(kind, _)
            | Route::Delete(kind, _) => kind,
        }
    }

    /// Record id for id-carrying routes.
    pub fn id(&self) -> Option<DbId> {
        match *self {
            Route::List(_) | Route::New(_) => None,
            Route::View(_, id) | Route::Edit(_, id) | Route::Delete(_, id) => Some(id),
        }
    }

    /// Delete routes open in the popup outlet rather than replacing the page.
    pub fn is_popup(&self) -> bool {
        matches!(self, Route::Delete(..))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Route::List(kind) => write!(f, "/{kind}"),
            Route::New(kind) => write!(f, "/{kind}/new"),
            Route::View(kind, id) => write!(f, "/{kind}/{id}/view"),
            Route::Edit(kind, id) => write!(f, "/{kind}/{id}/edit"),
            Route::Delete(kind, id) => write!(f, "/{kind}/{id}/delete"),
        }
    }
}

impl FromStr for Route {
    type Err = CoreError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Unrecognised route '{path}'"));
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [entity] => Ok(Route::List(entity.parse()?)),
            [entity, "new"] => Ok(Route::New(entity.parse()?)),
            [entity, id, action] => {
                let kind: EntityKind = entity.parse()?;
                let id: DbId = id.parse().map_err(|_| invalid())?;
                match *action {
                    "view" => Ok(Route::View(kind, id)),
                    "edit" => Ok(Route::Edit(kind, id)),
                    "delete" => Ok(Route::Delete(kind, id)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

/// Where views send the user after they finish.
pub trait Navigator: Send + Sync {
    /// Go to `route`. Popup routes open over the current page.
    fn navigate(&self, route: Route);

    /// Return to the previous page.
    fn previous_state(&self);

    /// Close whatever is showing in the popup outlet.
    fn clear_popup(&self);
}

#[derive(Debug, Default)]
struct HistoryState {
    stack: Vec<Route>,
    popup: Option<Route>,
}

/// In-process [`Navigator`] keeping a page stack and one popup outlet.
#[derive(Debug, Default)]
pub struct History {
    state: Mutex<HistoryState>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `route` as the only page.
    pub fn starting_at(route: Route) -> Self {
        let history = Self::new();
        history.navigate(route);
        history
    }

    /// The page currently shown in the primary outlet.
    pub fn current(&self) -> Option<Route> {
        self.lock().stack.last().copied()
    }

    /// The route currently shown in the popup outlet.
    pub fn popup(&self) -> Option<Route> {
        self.lock().popup
    }

    pub fn depth(&self) -> usize {
        self.lock().stack.len()
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "Navigate");
        let mut state = self.lock();
        if route.is_popup() {
            state.popup = Some(route);
        } else {
            state.stack.push(route);
        }
    }

    fn previous_state(&self) {
        let mut state = self.lock();
        if state.stack.len() > 1 {
            state.stack.pop();
        }
        tracing::debug!(current = ?state.stack.last(), "Back");
    }

    fn clear_popup(&self) {
        tracing::debug!("Clear popup outlet");
        self.lock().popup = None;
    }
}
