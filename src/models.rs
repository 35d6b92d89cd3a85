use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub duration_min: i64,
    pub fixed_time: Option<String>, // "HH:MM"; present = fixed appointment
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayWindow {
    pub start_time: String, // "HH:MM"
    pub available_hours: f64,
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            start_time: "09:00".to_string(),
            available_hours: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryColorMapping {
    pub category: String,
    pub color_index: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Db {
    pub settings: DayWindow,
    #[serde(default)]
    pub color_mappings: Vec<CategoryColorMapping>,
    pub tasks: Vec<Task>,
}
