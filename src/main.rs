use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use habit_garden::{handlers, load_data, resolve_data_path, router, storage, store, AppState};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut data = load_data(&data_path).await;

    // Finalize any days that ended while the process was down, one decay pass
    // per missed day, before accepting requests.
    let today = Local::now().date_naive();
    let passes = store::catch_up_rollovers(&mut data.habits, data.last_rollover, today);
    if passes > 0 {
        info!("caught up {passes} missed day rollover(s)");
    }
    if passes > 0 || data.last_rollover.is_none() {
        data.last_rollover = Some(today - Duration::days(1));
        if let Err(err) = storage::persist_data(&data_path, &data).await {
            error!("failed to persist startup rollover: {}", err.message);
        }
    }

    let state = AppState::new(data_path, data);
    spawn_midnight_rollover(state.clone());

    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Sleeps until local midnight, finalizes every day that ended, and rearms,
/// so rollovers keep firing across any number of midnights the process stays
/// up. A firing that slept through several midnights (suspend) still settles
/// one pass per missed day.
fn spawn_midnight_rollover(state: AppState) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(until_next_midnight(Local::now())).await;
            let today = Local::now().date_naive();
            match handlers::run_rollover(&state, today).await {
                Ok(passes) => info!("applied {passes} day rollover pass(es)"),
                Err(err) => error!("day rollover failed: {}", err.message),
            }
        }
    });
}

fn until_next_midnight(now: DateTime<Local>) -> std::time::Duration {
    let midnight = (now.date_naive() + Duration::days(1)).and_time(NaiveTime::MIN);
    let target = Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or(now + Duration::days(1));
    (target - now)
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(1))
}
