use crate::models::RefSummary;
use crate::store::DocumentStore;
use futures::future::join_all;

/// Resolve a single document reference into an `{id, name}` summary.
///
/// A missing or unreadable target never fails the read: the caller gets
/// the `Unknown <Kind>` sentinel instead. `kind` is the human-readable
/// kind used in the sentinel, e.g. "Role" or "Area".
pub async fn resolve_reference(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    kind: &str,
) -> RefSummary {
    if id.is_empty() {
        return RefSummary::unknown(kind);
    }

    match store.get(collection, id).await {
        Ok(Some(doc)) => {
            let name = doc
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            RefSummary::new(id, name)
        }
        Ok(None) => RefSummary::unknown(kind),
        Err(err) => {
            tracing::debug!(collection, id, error = %err, "reference target unreadable");
            RefSummary::unknown(kind)
        }
    }
}

/// Resolve an array of references concurrently. Output order matches the
/// input order, sentinels substituted per missing element.
///
/// Each reference costs one round trip; they run in parallel but are not
/// batched. Fine for the handful of areas/shifts a user carries, does
/// not scale to large fan-out.
pub async fn resolve_references(
    store: &dyn DocumentStore,
    collection: &str,
    ids: &[String],
    kind: &str,
) -> Vec<RefSummary> {
    join_all(
        ids.iter()
            .map(|id| resolve_reference(store, collection, id, kind)),
    )
    .await
}
