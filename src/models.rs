use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Custom,
}

/// One tracked habit. Field names stay camelCase on the wire so snapshots
/// written by earlier versions of the app keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub frequency: Frequency,
    pub growth_stage: u8,
    pub completed_today: bool,
    pub last_completed: Option<NaiveDate>,
    pub created_at: String,
}

/// Persisted snapshot: the whole garden plus the most recent day finalized by
/// a rollover pass, so days missed while the process was down can be caught up
/// at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub habits: Vec<Habit>,
    pub last_rollover: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    #[serde(default)]
    pub frequency: Frequency,
}

#[derive(Debug, Serialize)]
pub struct HabitResponse {
    /// The habit after the operation; `None` when the id was unknown.
    pub habit: Option<Habit>,
    /// Audio cues for the page to play: "water" on completion, plus "bloom"
    /// when the growth stage crossed into the fruiting range.
    pub cues: Vec<&'static str>,
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GardenResponse {
    pub habits: Vec<Habit>,
    pub completion_rate: f64,
    pub bloomed_count: usize,
    pub completed_today: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub removed: bool,
    pub notice: Option<String>,
}
