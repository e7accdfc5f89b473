use crate::traits::Serializer;
use nest_core::{NestError, NestResult};

/// Pretty JSON (2-space indentation) for snapshots.
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> NestResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(|e| NestError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> NestResult<T> {
        serde_json::from_slice(bytes).map_err(|e| NestError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_domain::{Board, BoardExporter, BoardSnapshot};

    #[test]
    fn test_snapshot_is_pretty_printed() {
        let snapshot = BoardExporter::snapshot(&Board::seed());
        let bytes = JsonSerializer.serialize(&snapshot).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\n  \"columns\""));
        assert!(text.contains("\"status\": \"today\""));
    }

    #[test]
    fn test_deserialize_failure_is_parse_error() {
        let result: NestResult<BoardSnapshot> = JsonSerializer.deserialize(b"{\"columns\": [");
        assert!(result.unwrap_err().is_parse());
    }
}
