use crate::errors::AppError;
use crate::models::{CreateHabitRequest, DeleteResponse, GardenResponse, Habit, HabitResponse};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::store;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};
use chrono::{Duration, Local, NaiveDate};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(&data.habits))
}

pub async fn get_garden(State(state): State<AppState>) -> Result<Json<GardenResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(to_garden(&data.habits)))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<Json<HabitResponse>, AppError> {
    let mut data = state.data.lock().await;
    let habit = store::create(
        &mut data.habits,
        &payload.name,
        payload.frequency,
        Local::now(),
        &mut rand::thread_rng(),
    )
    .map_err(AppError::bad_request)?;

    persist_data(&state.data_path, &data).await?;

    let notice = format!("Seed Planted! {} has been added to your garden", habit.name);
    Ok(Json(HabitResponse {
        habit: Some(habit),
        cues: Vec::new(),
        notice: Some(notice),
    }))
}

pub async fn complete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HabitResponse>, AppError> {
    let response = apply_complete(&state, &id).await?;
    Ok(Json(response))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let removed = apply_delete(&state, &id).await?;
    Ok(Json(DeleteResponse {
        removed,
        notice: removed.then(|| "Habit removed from your garden".to_string()),
    }))
}

pub async fn complete_habit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    apply_complete(&state, &id).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_habit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    apply_delete(&state, &id).await?;
    Ok(Redirect::to("/"))
}

async fn apply_complete(state: &AppState, id: &str) -> Result<HabitResponse, AppError> {
    let today = today();
    let mut data = state.data.lock().await;

    let Some(completion) = store::complete(&mut data.habits, id, today) else {
        // Unknown id or already watered today: silent no-op, no cues.
        let habit = data.habits.iter().find(|h| h.id == id).cloned();
        return Ok(HabitResponse {
            habit,
            cues: Vec::new(),
            notice: None,
        });
    };

    persist_data(&state.data_path, &data).await?;

    let cues = if completion.bloomed {
        vec!["water", "bloom"]
    } else {
        vec!["water"]
    };
    Ok(HabitResponse {
        habit: Some(completion.habit),
        cues,
        notice: None,
    })
}

async fn apply_delete(state: &AppState, id: &str) -> Result<bool, AppError> {
    let mut data = state.data.lock().await;
    let removed = store::delete(&mut data.habits, id);
    if removed {
        persist_data(&state.data_path, &data).await?;
    }
    Ok(removed)
}

fn to_garden(habits: &[Habit]) -> GardenResponse {
    GardenResponse {
        habits: habits.to_vec(),
        completion_rate: store::completion_rate(habits),
        bloomed_count: store::bloomed_count(habits),
        completed_today: habits.iter().filter(|h| h.completed_today).count(),
        total: habits.len(),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Finalizes every day that ended since the last finalized one; driven by the
/// midnight task in `main`. A single firing can owe more than one pass when
/// the sleep overshot a midnight (system suspend pauses tokio's monotonic
/// timers), so this walks day by day instead of assuming exactly one boundary.
/// Returns the number of passes applied.
pub async fn run_rollover(state: &AppState, today: NaiveDate) -> Result<u32, AppError> {
    let mut data = state.data.lock().await;
    let ended = today - Duration::days(1);
    let passes = match data.last_rollover {
        Some(last) => store::catch_up_rollovers(&mut data.habits, Some(last), today),
        None => {
            store::apply_day_rollover(&mut data.habits, ended);
            1
        }
    };
    let last = data.last_rollover;
    data.last_rollover = Some(last.map_or(ended, |l| l.max(ended)));
    persist_data(&state.data_path, &data).await?;
    Ok(passes)
}
