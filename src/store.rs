use crate::icons;
use crate::models::{Frequency, Habit};
use chrono::{DateTime, Duration, Local, NaiveDate};
use rand::Rng;
use uuid::Uuid;

pub const GROWTH_PER_COMPLETION: u8 = 10;
pub const DECAY_PER_MISSED_DAY: u8 = 15;
pub const BLOOM_THRESHOLD: u8 = 80;
pub const FULL_BLOOM: u8 = 100;

/// Result of a successful completion. `bloomed` is true exactly when this
/// completion moved the growth stage across the bloom threshold from below.
#[derive(Debug, Clone)]
pub struct Completion {
    pub habit: Habit,
    pub bloomed: bool,
}

/// Creates a habit and appends it to the garden, keeping insertion order.
/// The only validation rule: a trimmed-empty name is rejected.
pub fn create(
    habits: &mut Vec<Habit>,
    name: &str,
    frequency: Frequency,
    now: DateTime<Local>,
    rng: &mut impl Rng,
) -> Result<Habit, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Please enter a habit name");
    }

    let habit = Habit {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        icon: icons::icon_for(name, rng).to_string(),
        frequency,
        growth_stage: 0,
        completed_today: false,
        last_completed: None,
        created_at: now.to_rfc3339(),
    };
    habits.push(habit.clone());
    Ok(habit)
}

/// Marks a habit complete for `today`. Idempotent per calendar day: an unknown
/// id or a habit already completed today is a silent no-op (`None`).
pub fn complete(habits: &mut [Habit], id: &str, today: NaiveDate) -> Option<Completion> {
    let habit = habits.iter_mut().find(|h| h.id == id)?;
    if habit.completed_today {
        return None;
    }

    let was_blooming = habit.growth_stage >= BLOOM_THRESHOLD;
    habit.growth_stage = habit
        .growth_stage
        .saturating_add(GROWTH_PER_COMPLETION)
        .min(FULL_BLOOM);
    habit.completed_today = true;
    habit.last_completed = Some(today);

    Some(Completion {
        bloomed: !was_blooming && habit.growth_stage >= BLOOM_THRESHOLD,
        habit: habit.clone(),
    })
}

/// Finalizes the day that just ended: habits that have been completed at least
/// once but missed `ended_day` wilt by the decay step (floored at zero), and
/// every habit's completed-today flag resets for the new day. Habits never yet
/// completed stay untouched at stage 0.
pub fn apply_day_rollover(habits: &mut [Habit], ended_day: NaiveDate) {
    for habit in habits.iter_mut() {
        let missed = !habit.completed_today
            && habit
                .last_completed
                .is_some_and(|last| last != ended_day);
        if missed {
            habit.growth_stage = habit.growth_stage.saturating_sub(DECAY_PER_MISSED_DAY);
        }
        habit.completed_today = false;
    }
}

/// Applies one rollover pass per calendar day that ended since the last
/// finalized day, so decay accumulates across days the process was not
/// running. `last_rollover` is the most recent day already finalized; every
/// day after it up to and including yesterday gets a pass. Returns the number
/// of passes applied.
pub fn catch_up_rollovers(
    habits: &mut [Habit],
    last_rollover: Option<NaiveDate>,
    today: NaiveDate,
) -> u32 {
    let Some(finalized) = last_rollover else {
        return 0;
    };
    let mut day = finalized + Duration::days(1);
    let mut passes = 0;
    while day < today {
        apply_day_rollover(habits, day);
        day += Duration::days(1);
        passes += 1;
    }
    passes
}

/// Removes a habit by id without reordering the rest. Unknown id is a no-op.
pub fn delete(habits: &mut Vec<Habit>, id: &str) -> bool {
    let before = habits.len();
    habits.retain(|h| h.id != id);
    habits.len() < before
}

/// Percentage of habits completed today; 0 for an empty garden.
pub fn completion_rate(habits: &[Habit]) -> f64 {
    if habits.is_empty() {
        return 0.0;
    }
    let done = habits.iter().filter(|h| h.completed_today).count();
    100.0 * done as f64 / habits.len() as f64
}

/// Habits at full bloom, exactly stage 100.
pub fn bloomed_count(habits: &[Habit]) -> usize {
    habits.iter().filter(|h| h.growth_stage == FULL_BLOOM).count()
}
