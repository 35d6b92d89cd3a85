// --------------------------------------------------
// Handles API endpoints related to task CRUD operations,
// day window settings and category color mappings.
//
// Responsibilities:
// - Create / read / update / delete tasks
// - Reorder the backlog (list order drives flexible packing)
// - Toggle whether a task is active
// - Get / update the day window
// - Get / update category color mappings
// -------------------------------------------------

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::colors;
use crate::models::{CategoryColorMapping, DayWindow, Db, Task};
use crate::scheduler;
use crate::store;

// Reference date for validating "HH:MM" strings; only the
// time-of-day matters anywhere in the system.
fn is_valid_hhmm(hhmm: &str) -> bool {
    let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    scheduler::parse_hhmm(date, hhmm).is_some()
}

// -----------------------------
// GET /api/tasks
// Returns the full backlog, in stored order
// -----------------------------
pub async fn get_tasks() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "failed to load db");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };
    Json(db.tasks).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskInput {
    pub description: String,
    pub category: String,
    pub duration_min: i64,
    pub fixed_time: Option<String>, // "HH:MM"
}

// -----------------------------
// POST /api/tasks
// Creates a new task at the end of the backlog
// -----------------------------
pub async fn create_task(Json(input): Json<CreateTaskInput>) -> impl IntoResponse {
    if input.description.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "description required").into_response();
    }
    if input.duration_min <= 0 {
        return (StatusCode::BAD_REQUEST, "duration_min must be positive").into_response();
    }
    if let Some(t) = &input.fixed_time {
        if !is_valid_hhmm(t) {
            return (StatusCode::BAD_REQUEST, "fixed_time must be HH:MM").into_response();
        }
    }

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };

    let task = Task {
        id: Uuid::new_v4(),
        description: input.description,
        category: input.category,
        duration_min: input.duration_min,
        fixed_time: input.fixed_time,
        active: true,
    };

    db.tasks.push(task.clone());

    if store::save_db(&db).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(task).into_response()
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskInput {
    pub description: String,
    pub category: String,
    pub duration_min: i64,
    pub fixed_time: Option<String>,
    pub active: bool,
}

// -----------------------------
// PUT /api/tasks/:id
// Updates an existing task by ID
// ----------------------------
pub async fn update_task(
    Path(id): Path<String>,
    Json(input): Json<UpdateTaskInput>,
) -> impl IntoResponse {
    let id = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    };

    if input.description.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "description required").into_response();
    }
    if input.duration_min <= 0 {
        return (StatusCode::BAD_REQUEST, "duration_min must be positive").into_response();
    }
    if let Some(t) = &input.fixed_time {
        if !is_valid_hhmm(t) {
            return (StatusCode::BAD_REQUEST, "fixed_time must be HH:MM").into_response();
        }
    }

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };

    let Some(t) = db.tasks.iter_mut().find(|t| t.id == id) else {
        return (StatusCode::NOT_FOUND, "task not found").into_response();
    };

    t.description = input.description;
    t.category = input.category;
    t.duration_min = input.duration_min;
    t.fixed_time = input.fixed_time;
    t.active = input.active;

    let updated = t.clone();

    if store::save_db(&db).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(updated).into_response()
}

// -----------------------------
// DELETE /api/tasks/:id
// Removes a task permanently
// -----------------------------
pub async fn delete_task(Path(id): Path<String>) -> impl IntoResponse {
    let id = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };

    let before = db.tasks.len();
    db.tasks.retain(|t| t.id != id);

    if db.tasks.len() == before {
        return (StatusCode::NOT_FOUND, "task not found").into_response();
    }

    if store::save_db(&db).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(serde_json::json!({ "ok": true })).into_response()
}

// -----------------------------
// POST /api/tasks/:id/toggle
// Toggles whether a task takes part in scheduling
// -----------------------------
pub async fn toggle_task(Path(id): Path<String>) -> impl IntoResponse {
    let id = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };

    let Some(t) = db.tasks.iter_mut().find(|t| t.id == id) else {
        return (StatusCode::NOT_FOUND, "task not found").into_response();
    };

    t.active = !t.active;
    let updated = t.clone();

    if store::save_db(&db).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(updated).into_response()
}

// -----------------------------
// PUT /api/tasks/order
// Reorders the backlog; the body is the full list of task ids in
// the new order. Flexible tasks are packed in this order, so the
// ordering is part of the scheduling contract, not cosmetics.
// -----------------------------
pub async fn reorder_tasks(Json(ids): Json<Vec<Uuid>>) -> impl IntoResponse {
    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };

    if ids.len() != db.tasks.len() {
        return (StatusCode::BAD_REQUEST, "id list must cover every task").into_response();
    }

    let mut reordered: Vec<Task> = Vec::with_capacity(ids.len());
    for id in &ids {
        let Some(pos) = db.tasks.iter().position(|t| t.id == *id) else {
            return (StatusCode::BAD_REQUEST, "unknown or duplicate task id").into_response();
        };
        reordered.push(db.tasks.remove(pos));
    }
    db.tasks = reordered;

    if store::save_db(&db).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(db.tasks).into_response()
}

// -----------------------------
// GET /api/settings
// Returns the day window (start time / available hours)
// -----------------------------
pub async fn get_settings() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };
    Json(db.settings).into_response()
}

// -----------------------------
// PUT /api/settings
// Updates the day window
// -----------------------------
pub async fn put_settings(Json(s): Json<DayWindow>) -> impl IntoResponse {
    if !is_valid_hhmm(&s.start_time) {
        return (StatusCode::BAD_REQUEST, "start_time must be HH:MM").into_response();
    }
    if !s.available_hours.is_finite() {
        return (StatusCode::BAD_REQUEST, "available_hours must be a number").into_response();
    }

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };

    db.settings = s;

    if store::save_db(&db).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(db.settings).into_response()
}

// -----------------------------
// GET /api/colors
// Returns the explicit category color mappings
// -----------------------------
pub async fn get_colors() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };
    Json(db.color_mappings).into_response()
}

// -----------------------------
// PUT /api/colors
// Replaces the category color mappings
// -----------------------------
pub async fn put_colors(Json(mappings): Json<Vec<CategoryColorMapping>>) -> impl IntoResponse {
    if mappings.iter().any(|m| m.color_index >= colors::COLORS.len()) {
        return (StatusCode::BAD_REQUEST, "color_index out of range").into_response();
    }

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response(),
    };

    db.color_mappings = mappings;

    if store::save_db(&db).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(db.color_mappings).into_response()
}
