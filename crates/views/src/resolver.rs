//! Turn a route into the record its view binds to.

use std::marker::PhantomData;

use cwcrm_client::{ClientError, EntityApi};
use cwcrm_core::{CoreError, Entity, Record};

use crate::navigation::Route;

/// Resolves routes of entity `E` before its view is constructed.
///
/// `new` routes yield an empty draft. `view`, `edit` and `delete` routes
/// fetch the record by id, and a 404 becomes [`CoreError::NotFound`]. List
/// routes carry no record.
pub struct RouteResolver<E, S> {
    service: S,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> RouteResolver<E, S>
where
    E: Entity + Default,
    S: EntityApi<E>,
{
    pub fn new(service: S) -> Self {
        Self {
            service,
            _entity: PhantomData,
        }
    }

    pub async fn resolve(&self, route: &Route) -> Result<Record<E>, ClientError> {
        if route.kind() != E::KIND {
            return Err(CoreError::Validation(format!(
                "Route {route} does not belong to {}",
                E::KIND
            ))
            .into());
        }

        match *route {
            Route::New(_) => Ok(Record::draft()),
            Route::View(_, id) | Route::Edit(_, id) | Route::Delete(_, id) => {
                tracing::debug!(entity = %E::KIND, id, "Resolve record");
                match self.service.find(id).await {
                    Ok(stored) => Ok(Record::Existing(stored)),
                    Err(e) if e.status() == Some(404) => Err(CoreError::NotFound {
                        entity: E::KIND.slug(),
                        id,
                    }
                    .into()),
                    Err(e) => Err(e),
                }
            }
            Route::List(_) => Err(CoreError::Validation(format!(
                "Route {route} does not bind a record"
            ))
            .into()),
        }
    }
}
