//! Reading and writing one collection under its key.

use crate::entities::Record;
use crate::error::{ParseError, Result};
use crate::storage::KvBackend;

/// Read the persisted sequence for `T`.
///
/// A missing key is an empty collection. A value that does not decode is a
/// `ParseError`, kept distinct from "absent" so callers can report it.
pub fn load<T: Record>(kv: &dyn KvBackend) -> Result<Vec<T>> {
    let key = T::KIND.storage_key();
    match kv.get(key)? {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| {
            ParseError::Corrupt {
                key: key.to_string(),
                source,
            }
            .into()
        }),
    }
}

/// Overwrite the persisted sequence for `T` with `records`.
pub fn persist<T: Record>(kv: &mut dyn KvBackend, records: &[T]) -> Result<()> {
    let (key, json) = encode(records)?;
    kv.set(key, &json)?;
    tracing::debug!(key, count = records.len(), "persisted collection");
    Ok(())
}

/// The storage key and JSON value for `records`, without writing them.
pub fn encode<T: Record>(records: &[T]) -> Result<(&'static str, String)> {
    Ok((T::KIND.storage_key(), serde_json::to_string(records)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Draft, Task, TaskDraft};
    use crate::error::CoreError;
    use crate::storage::MemoryKv;
    use chrono::Utc;

    #[test]
    fn absent_key_is_empty() {
        let kv = MemoryKv::new();
        assert!(load::<Task>(&kv).unwrap().is_empty());
    }

    #[test]
    fn corrupt_value_is_a_parse_error() {
        let kv = MemoryKv::with_entries([("tasks", "{not json")]);
        assert!(matches!(load::<Task>(&kv), Err(CoreError::Parse(_))));
    }

    #[test]
    fn persist_then_load() {
        let mut kv = MemoryKv::new();
        let task = TaskDraft::new("Lab report").build("t1".into(), Utc::now());
        persist(&mut kv, std::slice::from_ref(&task)).unwrap();
        assert_eq!(load::<Task>(&kv).unwrap(), vec![task]);
    }
}
