use std::{fs, io, path::Path};

use thiserror::Error;

use crate::models::Db;

pub const DB_PATH: &str = "data/db.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access db file: {0}")]
    Io(#[from] io::Error),
    #[error("db file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_db() -> Result<Db, StoreError> {
    load_db_from(Path::new(DB_PATH))
}

pub fn save_db(db: &Db) -> Result<(), StoreError> {
    save_db_to(db, Path::new(DB_PATH))
}

// A missing db file is a fresh install, not an error
pub fn load_db_from(path: &Path) -> Result<Db, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Db::default()),
        Err(e) => return Err(e.into()),
    };
    let db: Db = serde_json::from_str(&text)?;
    Ok(db)
}

pub fn save_db_to(db: &Db, path: &Path) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(db)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write to a temp file first so a crash never truncates the db
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayWindow, Task};
    use uuid::Uuid;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let db = load_db_from(&dir.path().join("db.json")).unwrap();
        assert!(db.tasks.is_empty());
        assert_eq!(db.settings.start_time, "09:00");
        assert_eq!(db.settings.available_hours, 8.0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let db = Db {
            settings: DayWindow {
                start_time: "08:30".to_string(),
                available_hours: 7.5,
            },
            color_mappings: vec![],
            tasks: vec![Task {
                id: Uuid::new_v4(),
                description: "Write report".to_string(),
                category: "Work".to_string(),
                duration_min: 120,
                fixed_time: None,
                active: true,
            }],
        };

        save_db_to(&db, &path).unwrap();
        let loaded = load_db_from(&path).unwrap();

        assert_eq!(loaded.settings.start_time, "08:30");
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].id, db.tasks[0].id);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_db_from(&path), Err(StoreError::Json(_))));
    }
}
