use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Db, DayWindow};
use crate::scheduler;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub date: String, // "YYYY-MM-DD"
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub date: String,
    pub settings: DayWindow,
    pub schedule: Vec<ScheduledTaskResponse>,
    pub category_stats: Vec<CategoryStatResponse>,
}

#[derive(Debug, Serialize)]
pub struct ScheduledTaskResponse {
    pub task_id: String,
    pub description: String,
    pub category: String,
    pub start: String, // "HH:MM"
    pub end: String,
    pub is_fixed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_parts: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CategoryStatResponse {
    pub category: String,
    pub total_minutes: i64,
    pub color: &'static str, // palette color name
}

pub async fn get_plan(Query(q): Query<PlanQuery>) -> impl IntoResponse {
    let date = match NaiveDate::parse_from_str(&q.date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid date").into_response(),
    };

    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "failed to load db");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let plan = scheduler::schedule_day(&db.tasks, &db.settings, &db.color_mappings, date);

    let schedule: Vec<ScheduledTaskResponse> = plan
        .schedule
        .into_iter()
        .map(|s| ScheduledTaskResponse {
            task_id: s.task_id.to_string(),
            description: s.description,
            category: s.category,
            start: s.start.format("%H:%M").to_string(),
            end: s.end.format("%H:%M").to_string(),
            is_fixed: s.is_fixed,
            part_number: s.part_number,
            total_parts: s.total_parts,
        })
        .collect();

    let category_stats: Vec<CategoryStatResponse> = plan
        .category_stats
        .into_iter()
        .map(|s| CategoryStatResponse {
            category: s.category,
            total_minutes: s.total_minutes,
            color: s.color.name,
        })
        .collect();

    Json(PlanResponse {
        date: q.date,
        settings: db.settings,
        schedule,
        category_stats,
    })
    .into_response()
}
