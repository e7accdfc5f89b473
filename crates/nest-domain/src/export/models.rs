use serde::{Deserialize, Deserializer, Serialize};

use crate::task::TaskColor;

/// Board-shaped snapshot: columns with their tasks nested in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnRecord>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub id: String,
    /// Missing titles are repaired to the column id on import.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_color"
    )]
    pub color: Option<TaskColor>,
}

/// Tab-shaped snapshot: a flat task list where `status` names the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatSnapshot {
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Colors are cosmetic; anything unrecognized is dropped instead of failing
/// the whole import.
fn lenient_color<'de, D>(deserializer: D) -> Result<Option<TaskColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_record_defaults() {
        let record: TaskRecord = serde_json::from_str(r#"{"id":"7","title":"Call mom"}"#).unwrap();
        assert!(!record.completed);
        assert!(record.tags.is_empty());
        assert!(record.status.is_none());
        assert!(record.color.is_none());
    }

    #[test]
    fn test_unknown_color_is_dropped() {
        let record: TaskRecord = serde_json::from_str(
            r#"{"id":"7","title":"x","color":"bg-blue-500/20 border-blue-500/30"}"#,
        )
        .unwrap();
        assert!(record.color.is_none());

        let record: TaskRecord =
            serde_json::from_str(r#"{"id":"7","title":"x","color":"teal"}"#).unwrap();
        assert_eq!(record.color, Some(TaskColor::Teal));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let record = TaskRecord {
            id: "1".into(),
            title: "x".into(),
            status: Some("today".into()),
            completed: false,
            tags: vec![],
            description: None,
            color: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("color"));
        assert!(json.contains(r#""status":"today""#));
    }
}
