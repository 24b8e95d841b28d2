// ── Stream enumerator ──
//
// Walks the enabled, name, and destination columns of the stream table and
// zips them by position. The three walks share one session and run one
// after another. Any failure aborts the whole enumeration: a partially
// correlated list is never returned.

use pipa_api::{AttributeEntry, AttributeValue, TreeSession};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::StreamRecord;
use crate::query::query_subtree;
use crate::templates::StreamColumn;

/// All configured streams, both directions, in row order.
pub async fn enumerate_streams<S: TreeSession>(
    session: &mut S,
) -> Result<Vec<StreamRecord>, CoreError> {
    let enabled = query_subtree(session, &StreamColumn::Enabled.identifier()).await?;
    let names = query_subtree(session, &StreamColumn::Name.identifier()).await?;
    let destinations =
        query_subtree(session, &StreamColumn::DestinationAddress.identifier()).await?;

    let records = correlate(&enabled, &names, &destinations)?;
    debug!(streams = records.len(), "stream table correlated");
    Ok(records)
}

/// Receive streams only, in row order.
pub async fn enumerate_rx_streams<S: TreeSession>(
    session: &mut S,
) -> Result<Vec<StreamRecord>, CoreError> {
    let records = enumerate_streams(session).await?;
    Ok(records
        .into_iter()
        .filter(|record| record.direction.is_rx())
        .collect())
}

/// Build one record per row from three equally long column lists.
pub fn correlate(
    enabled: &[AttributeEntry],
    names: &[AttributeEntry],
    destinations: &[AttributeEntry],
) -> Result<Vec<StreamRecord>, CoreError> {
    if enabled.len() != names.len() || enabled.len() != destinations.len() {
        return Err(CoreError::LengthMismatch {
            enabled: enabled.len(),
            names: names.len(),
            destinations: destinations.len(),
        });
    }

    (0_u64..)
        .zip(enabled.iter().zip(names).zip(destinations))
        .map(|(position, ((flag, name), destination))| {
            let index = flag.identifier.last().unwrap_or(position);
            if name.identifier.last() != Some(index) || destination.identifier.last() != Some(index)
            {
                warn!(
                    index,
                    name = %name.identifier,
                    destination = %destination.identifier,
                    "stream columns disagree on row index"
                );
            }

            Ok(StreamRecord::new(
                index,
                parse_enabled(flag)?,
                parse_name(name)?,
                parse_destination(destination)?,
            ))
        })
        .collect()
}

fn parse_enabled(entry: &AttributeEntry) -> Result<bool, CoreError> {
    match entry.value {
        AttributeValue::Integer(0) => Ok(false),
        AttributeValue::Integer(1) => Ok(true),
        ref other => Err(invalid(entry, "integer 0 or 1", other)),
    }
}

fn parse_name(entry: &AttributeEntry) -> Result<String, CoreError> {
    entry
        .value
        .as_text()
        .map(ToOwned::to_owned)
        .ok_or_else(|| invalid(entry, "text", &entry.value))
}

fn parse_destination(entry: &AttributeEntry) -> Result<String, CoreError> {
    entry
        .value
        .as_address_text()
        .ok_or_else(|| invalid(entry, "textual address", &entry.value))
}

fn invalid(entry: &AttributeEntry, expected: &'static str, found: &AttributeValue) -> CoreError {
    let found = match found {
        AttributeValue::Integer(n) => format!("integer {n}"),
        AttributeValue::Text(s) => format!("text {s:?}"),
        other => other.kind().to_string(),
    };
    CoreError::InvalidValue {
        identifier: entry.identifier.clone(),
        expected,
        found,
    }
}
