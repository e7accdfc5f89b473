use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tag::normalize_tag;

pub type TaskId = String;

/// Cosmetic accent drawn when a task is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    Blue,
    Purple,
    Emerald,
    Amber,
    Rose,
    Cyan,
    Indigo,
    Teal,
}

impl TaskColor {
    pub const PALETTE: [TaskColor; 8] = [
        TaskColor::Blue,
        TaskColor::Purple,
        TaskColor::Emerald,
        TaskColor::Amber,
        TaskColor::Rose,
        TaskColor::Cyan,
        TaskColor::Indigo,
        TaskColor::Teal,
    ];

    /// Picks a palette entry from the random bits of a v4 id.
    pub fn from_seed(id: &Uuid) -> Self {
        let index = id.as_bytes()[0] as usize % Self::PALETTE.len();
        Self::PALETTE[index]
    }
}

/// Task content. Placement lives in the owning column's id list, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TaskColor>,
}

impl Task {
    pub fn new(title: String) -> Self {
        let id = Uuid::new_v4();
        Self {
            id: id.to_string(),
            title,
            description: None,
            completed: false,
            tags: Vec::new(),
            color: Some(TaskColor::from_seed(&id)),
        }
    }

    pub fn with_id(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            completed: false,
            tags: Vec::new(),
            color: None,
        }
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
    }

    /// Blank descriptions are stored as absent.
    pub fn update_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.trim().is_empty());
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        self.tags.iter().any(|t| *t == tag)
    }

    /// Returns false when the tag is blank or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        let before = self.tags.len();
        self.tags.retain(|t| *t != tag);
        self.tags.len() != before
    }

    pub fn replace_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
    }
}
