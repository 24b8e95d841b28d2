// ── Subtree query filter ──
//
// A bulk walk keeps going after it leaves the requested subtree, so every
// returned entry is re-checked against the root. Entries outside it are
// dropped quietly; overrunning the edge is the normal way a walk ends.

use pipa_api::{AttributeEntry, Identifier, TreeSession};
use tracing::{debug, trace};

use crate::error::CoreError;

/// Walk `root` and return the entries within its subtree, in walk order.
///
/// An empty subtree yields an empty list. Transport failures are wrapped
/// with the identifier being queried.
pub async fn query_subtree<S: TreeSession>(
    session: &mut S,
    root: &Identifier,
) -> Result<Vec<AttributeEntry>, CoreError> {
    let raw = session
        .bulk_walk(root)
        .await
        .map_err(|e| CoreError::query(root, e))?;
    let returned = raw.len();

    let entries: Vec<AttributeEntry> = raw
        .into_iter()
        .filter(|entry| {
            let inside = root.contains(&entry.identifier);
            if !inside {
                trace!(%root, identifier = %entry.identifier, "dropping entry outside subtree");
            }
            inside
        })
        .collect();

    debug!(%root, returned, kept = entries.len(), "subtree query");
    Ok(entries)
}
