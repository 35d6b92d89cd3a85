/*
Day scheduling logic.
Module was independently written from HTTP / Axum for testing.

Pure computation over a snapshot of tasks, the day window and the
category color mappings: places fixed appointments, derives the free
slots between them and packs flexible tasks into those slots in
backlog order, splitting a task across slots when it does not fit
contiguously.
*/

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::colors::{self, Color};
use crate::models::{CategoryColorMapping, DayWindow, Task};

// One placed segment on the timeline.
// A flexible task produces several of these when it is split.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub task_id: uuid::Uuid,
    pub description: String, // suffixed "(k/N)" when split
    pub category: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_fixed: bool,
    pub part_number: Option<i64>, // set only when split into >1 parts
    pub total_parts: Option<i64>,
}

// Placed minutes per category, for the summary bar
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: String,
    pub total_minutes: i64,
    pub color: Color,
}

// Free interval between/around fixed appointments. Internal only.
#[derive(Debug, Clone, Copy)]
struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration: i64, // minutes
}

#[derive(Debug, Clone, Default)]
pub struct DayPlan {
    pub schedule: Vec<ScheduledTask>,
    pub category_stats: Vec<CategorySummary>,
}

// Parse a "HH:MM" string into a DateTime on the given date.
pub fn parse_hhmm(date: NaiveDate, hhmm: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = hhmm.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let h: u32 = parts[0].parse().ok()?;
    let m: u32 = parts[1].parse().ok()?;
    date.and_hms_opt(h, m, 0)
}

/// Build the day plan for the given date.
///
/// Process:
/// - Drop inactive tasks, split the rest into fixed and flexible
/// - Place fixed appointments that fit inside the day window
/// - Compute the free slots left between them
/// - Pack flexible tasks into the slots in backlog order, splitting
///   across slots where needed
/// - Sort chronologically and total the placed minutes per category
///
/// Degenerate input (unparseable window start, zero or negative
/// available hours, empty backlog) degrades to an empty or partial
/// plan; nothing here returns an error.
pub fn schedule_day(
    tasks: &[Task],
    window: &DayWindow,
    mappings: &[CategoryColorMapping],
    date: NaiveDate,
) -> DayPlan {
    let Some(day_start) = parse_hhmm(date, &window.start_time) else {
        return DayPlan::default();
    };
    let total_min = (window.available_hours * 60.0).round() as i64;
    let day_end = day_start + Duration::minutes(total_min);

    let (fixed, flexible): (Vec<&Task>, Vec<&Task>) = tasks
        .iter()
        .filter(|t| t.active)
        .partition(|t| t.fixed_time.is_some());

    let fixed_placed = place_fixed(&fixed, date, day_start, day_end);
    let slots = free_slots(&fixed_placed, day_start, day_end);
    let flexible_placed = pack_flexible(&flexible, &slots, day_start);

    let mut schedule = fixed_placed;
    schedule.extend(flexible_placed);
    schedule.sort_by_key(|s| s.start);

    let category_stats = category_stats(&schedule, mappings);

    DayPlan {
        schedule,
        category_stats,
    }
}

// Place fixed appointments inside the day window, sorted by start.
//
// An appointment is admitted only if it lies entirely within
// [day_start, day_end]; anything else (including an unparseable
// fixed_time) is silently left out of the plan. The sort is stable,
// so appointments sharing a start time keep backlog order.
fn place_fixed(
    fixed: &[&Task],
    date: NaiveDate,
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
) -> Vec<ScheduledTask> {
    let mut placed: Vec<ScheduledTask> = Vec::new();

    for task in fixed {
        let Some(hhmm) = task.fixed_time.as_deref() else {
            continue;
        };
        let Some(start) = parse_hhmm(date, hhmm) else {
            continue;
        };
        let end = start + Duration::minutes(task.duration_min);

        if start >= day_start && end <= day_end {
            placed.push(ScheduledTask {
                task_id: task.id,
                description: task.description.clone(),
                category: task.category.clone(),
                start,
                end,
                is_fixed: true,
                part_number: None,
                total_parts: None,
            });
        }
    }

    placed.sort_by_key(|s| s.start);
    placed
}

// Compute the free slots of the day window around the sorted fixed
// appointments: before the first, between consecutive pairs, after
// the last. Zero-length slots (and negative ones, from overlapping
// appointments) are dropped.
fn free_slots(
    fixed: &[ScheduledTask],
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
) -> Vec<TimeSlot> {
    let mut slots: Vec<TimeSlot> = Vec::new();

    let mut push = |start: NaiveDateTime, end: NaiveDateTime| {
        let duration = (end - start).num_minutes();
        if duration > 0 {
            slots.push(TimeSlot {
                start,
                end,
                duration,
            });
        }
    };

    if fixed.is_empty() {
        push(day_start, day_end);
    } else {
        push(day_start, fixed[0].start);
        for pair in fixed.windows(2) {
            push(pair[0].end, pair[1].start);
        }
        push(fixed[fixed.len() - 1].end, day_end);
    }

    slots
}

// Pack flexible tasks into the free slots, in backlog order.
//
// A single cursor walks forward through the slot list and never
// resets: each task consumes slot time from the cursor on, emitting
// one segment per slot it touches. The split label uses the part
// count a task needs given the largest slot of the day.
//
// If a task cannot be fully placed, packing stops at that point:
// its partial segments stand and no later flexible task is tried.
fn pack_flexible(
    flexible: &[&Task],
    slots: &[TimeSlot],
    day_start: NaiveDateTime,
) -> Vec<ScheduledTask> {
    let mut placed: Vec<ScheduledTask> = Vec::new();

    let mut slot_index = 0;
    let mut position = slots.first().map_or(day_start, |s| s.start);

    let max_slot = slots.iter().map(|s| s.duration).max().unwrap_or(0);

    for task in flexible {
        let mut remaining = task.duration_min;
        let mut part = 1;
        let total_parts = if max_slot > 0 {
            (task.duration_min + max_slot - 1) / max_slot
        } else {
            1
        };

        while remaining > 0 && slot_index < slots.len() {
            let slot = slots[slot_index];
            let available = (slot.end - position).num_minutes();

            if available <= 0 {
                // Current slot is used up, move to the next one
                slot_index += 1;
                if let Some(next) = slots.get(slot_index) {
                    position = next.start;
                }
                continue;
            }

            let used = remaining.min(available);
            let start = position;
            let end = start + Duration::minutes(used);

            placed.push(ScheduledTask {
                task_id: task.id,
                description: if total_parts > 1 {
                    format!("{} ({}/{})", task.description, part, total_parts)
                } else {
                    task.description.clone()
                },
                category: task.category.clone(),
                start,
                end,
                is_fixed: false,
                part_number: (total_parts > 1).then_some(part),
                total_parts: (total_parts > 1).then_some(total_parts),
            });

            remaining -= used;
            position = end;
            part += 1;

            if end >= slot.end {
                slot_index += 1;
                if let Some(next) = slots.get(slot_index) {
                    position = next.start;
                }
            }
        }

        // Ran out of slots mid-task: keep the partial segments but do
        // not attempt any later flexible task.
        if remaining > 0 {
            break;
        }
    }

    placed
}

// Total the actually placed minutes per category, most time first.
// Ties keep first-appearance order (the sort is stable).
fn category_stats(
    schedule: &[ScheduledTask],
    mappings: &[CategoryColorMapping],
) -> Vec<CategorySummary> {
    let mut stats: Vec<CategorySummary> = Vec::new();

    for task in schedule {
        let minutes = (task.end - task.start).num_minutes();
        match stats.iter_mut().find(|s| s.category == task.category) {
            Some(entry) => entry.total_minutes += minutes,
            None => stats.push(CategorySummary {
                category: task.category.clone(),
                total_minutes: minutes,
                color: colors::color_for_category(&task.category, mappings),
            }),
        }
    }

    stats.sort_by_key(|s| std::cmp::Reverse(s.total_minutes));
    stats
}
