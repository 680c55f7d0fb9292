//! JSON file reading and atomic writing

use std::io::ErrorKind;
use std::path::Path;

use rank_core::traits::RepoResult;
use rank_core::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::warn;

use super::error::{map_io_error, map_json_error};

/// Read a JSON array of records; `None` when the file does not exist
///
/// An object wrapping the array under `messages` or `data` is accepted too.
/// Nesting depth is unbounded; deep reply chains grow the stack on the heap.
pub async fn read_records(path: &Path) -> RepoResult<Option<Vec<Value>>> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(map_io_error(path, e)),
    };

    let document = parse_document(&bytes).map_err(|e| map_json_error(path, e))?;
    match document {
        Value::Array(records) => Ok(Some(records)),
        Value::Object(mut map) => ["messages", "data"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .map(Some)
            .ok_or_else(|| {
                DomainError::SerializationError(format!(
                    "{}: expected an array of records",
                    path.display()
                ))
            }),
        _ => Err(DomainError::SerializationError(format!(
            "{}: expected an array of records",
            path.display()
        ))),
    }
}

fn parse_document(bytes: &[u8]) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_slice(bytes);
    json.disable_recursion_limit();
    let document = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(document)
}

/// Write pretty JSON through a temporary file so readers never see a partial document
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> RepoResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| map_io_error(parent, e))?;
    }

    let bytes = serde_json::to_vec_pretty(value).map_err(|e| map_json_error(path, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await.map_err(|e| map_io_error(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path).await {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temporary file");
        }
        return Err(map_io_error(path, e));
    }
    Ok(())
}
