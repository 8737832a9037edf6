//! Run one CLI operation through the entity views.

use anyhow::{anyhow, bail, Context, Result};
use cwcrm_client::QueryParams;
use cwcrm_core::entities::{
    Action, ContactStatus, ContactSubStatus, ContactType, Department, EmployeeSubType,
    EmployeeType, EnrollmentAgency, Mco, Participant, Physician, Priority, Referral,
    ReferralSource, ReferralType, SupportCoordinator, Waiver,
};
use cwcrm_core::{DbId, Entity, EntityKind, Record, Stored};
use cwcrm_views::{AppContext, ModalResult, Route};
use serde_json::Value;

use crate::output::{self, Format};

/// What to do with the selected entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List {
        search: Option<String>,
        params: QueryParams,
    },
    Show {
        id: DbId,
    },
    Create {
        json: String,
    },
    Update {
        id: DbId,
        json: String,
    },
    Delete {
        id: DbId,
        confirmed: bool,
    },
}

pub async fn execute(
    ctx: &AppContext,
    kind: EntityKind,
    operation: Operation,
    format: Format,
) -> Result<()> {
    match kind {
        EntityKind::Participant => run::<Participant>(ctx, operation, format).await,
        EntityKind::Referral => run::<Referral>(ctx, operation, format).await,
        EntityKind::Action => run::<Action>(ctx, operation, format).await,
        EntityKind::SupportCoordinator => run::<SupportCoordinator>(ctx, operation, format).await,
        EntityKind::Waiver => run::<Waiver>(ctx, operation, format).await,
        EntityKind::Department => run::<Department>(ctx, operation, format).await,
        EntityKind::EmployeeType => run::<EmployeeType>(ctx, operation, format).await,
        EntityKind::EmployeeSubType => run::<EmployeeSubType>(ctx, operation, format).await,
        EntityKind::ContactStatus => run::<ContactStatus>(ctx, operation, format).await,
        EntityKind::ContactSubStatus => run::<ContactSubStatus>(ctx, operation, format).await,
        EntityKind::Priority => run::<Priority>(ctx, operation, format).await,
        EntityKind::Mco => run::<Mco>(ctx, operation, format).await,
        EntityKind::Physician => run::<Physician>(ctx, operation, format).await,
        EntityKind::EnrollmentAgency => run::<EnrollmentAgency>(ctx, operation, format).await,
        EntityKind::ReferralType => run::<ReferralType>(ctx, operation, format).await,
        EntityKind::ReferralSource => run::<ReferralSource>(ctx, operation, format).await,
        EntityKind::ContactType => run::<ContactType>(ctx, operation, format).await,
    }
}

async fn run<E: Entity + Default>(
    ctx: &AppContext,
    operation: Operation,
    format: Format,
) -> Result<()> {
    tracing::debug!(entity = %E::KIND, ?operation, "Run command");

    match operation {
        Operation::List { search, params } => {
            let mut view = ctx.list_view::<E>().with_params(params);
            match search.as_deref() {
                Some(term) => view.search(term).await,
                None => view.load_all().await,
            }
            if let Some(message) = view.last_error() {
                bail!("Failed to list {}: {message}", E::KIND.display_name());
            }
            output::print_list(view.records(), view.total_count(), format)
        }

        Operation::Show { id } => {
            let record = resolve_existing::<E>(ctx, Route::View(E::KIND, id)).await?;
            let detail = ctx.detail_view(record);
            output::print_record(detail.record(), detail.fields(), format)
        }

        Operation::Create { json } => {
            let fields: E = parse_fields(&json)?;
            let mut form = ctx.update_form(Record::New(fields));
            let saved = form.save().await.map_err(|e| anyhow!(e.message()))?;
            let detail = ctx.detail_view(saved);
            output::print_record(detail.record(), detail.fields(), format)
        }

        Operation::Update { id, json } => {
            let current = resolve_existing::<E>(ctx, Route::Edit(E::KIND, id)).await?;
            let patch = parse_object(&json)?;
            let fields: E = merge_fields(&current.fields, patch)?;
            let mut form = ctx.update_form(Record::Existing(Stored::new(current.id, fields)));
            let saved = form.save().await.map_err(|e| anyhow!(e.message()))?;
            let detail = ctx.detail_view(saved);
            output::print_record(detail.record(), detail.fields(), format)
        }

        Operation::Delete { id, confirmed } => {
            let route = Route::Delete(E::KIND, id);
            let record = ctx
                .resolver::<E>()
                .resolve(&route)
                .await
                .map_err(|e| anyhow!(e.message()))?;
            let mut popup = ctx.delete_popup::<E>();
            popup.open(record).map_err(|e| anyhow!(e.message()))?;

            let result = if confirmed {
                popup.confirm().await.map_err(|e| anyhow!(e.message()))?
            } else {
                popup.cancel()
            };
            match result {
                ModalResult::Confirmed => println!("Deleted {} {id}", E::KIND),
                ModalResult::Dismissed(_) => println!("Delete cancelled, pass --yes to confirm"),
            }
            Ok(())
        }
    }
}

async fn resolve_existing<E: Entity + Default>(
    ctx: &AppContext,
    route: Route,
) -> Result<Stored<E>> {
    match ctx
        .resolver::<E>()
        .resolve(&route)
        .await
        .map_err(|e| anyhow!(e.message()))?
    {
        Record::Existing(stored) => Ok(stored),
        Record::New(_) => bail!("Route {route} does not identify a record"),
    }
}

fn parse_object(json: &str) -> Result<serde_json::Map<String, Value>> {
    match serde_json::from_str(json).context("--json is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("--json must be an object, got {other}"),
    }
}

fn parse_fields<E: Entity>(json: &str) -> Result<E> {
    let mut map = parse_object(json)?;
    if map.remove("id").is_some_and(|id| !id.is_null()) {
        bail!("A new {} cannot already have an id", E::KIND);
    }
    serde_json::from_value(Value::Object(map))
        .with_context(|| format!("Invalid {} fields", E::KIND))
}

/// Overlay `patch` onto the serialized `current` fields.
fn merge_fields<E: Entity>(current: &E, patch: serde_json::Map<String, Value>) -> Result<E> {
    let mut merged = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        _ => bail!("{} fields did not serialize to an object", E::KIND),
    };
    for (key, value) in patch {
        if key != "id" {
            merged.insert(key, value);
        }
    }
    serde_json::from_value(Value::Object(merged))
        .with_context(|| format!("Invalid {} fields", E::KIND))
}
