use anyhow::Result;
use dashb_core::{AppError, Config};
use dashb_dashboard::{App, ClockLabels, DashboardViewModel};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    dashb_core::init()?;

    let mut app = match Config::load_validated().and_then(|(config, _)| App::new(config)) {
        Ok(app) => app,
        Err(e) => {
            let err = AppError::from(e);
            eprintln!("DashB could not start: {}", err.user_message());
            return Err(err.into());
        }
    };

    tracing::info!("DashB started");
    if let Ok(path) = Config::config_path() {
        tracing::info!("Config file: {}", path.display());
    }
    for entry in app.state().agenda() {
        tracing::info!(day = %entry.day_label, detail = %entry.detail, "Agenda: {}", entry.title);
    }

    let mut view = app.state().subscribe();
    app.start();

    let mut clock = app.clock().map(|c| c.subscribe());
    if let Some(rx) = clock.as_mut() {
        let labels = rx.borrow_and_update().clone();
        tracing::info!("{} {}", labels.time, labels.date);
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                let vm = view.borrow_and_update().clone();
                log_view_model(&vm);
            }
            Some(labels) = next_clock(clock.as_mut()) => {
                tracing::debug!("Clock {} {}", labels.time, labels.date);
            }
        }
    }

    // Graceful shutdown
    app.shutdown().await;
    Ok(())
}

async fn next_clock(rx: Option<&mut watch::Receiver<ClockLabels>>) -> Option<ClockLabels> {
    let rx = rx?;
    rx.changed().await.ok()?;
    let labels = rx.borrow_and_update().clone();
    Some(labels)
}

fn log_view_model(vm: &DashboardViewModel) {
    if vm.loading {
        tracing::info!("Refreshing...");
        return;
    }
    let weather = &vm.weather;
    tracing::info!(
        "{}: {} {} | hours: {} | days: {}",
        weather.city,
        weather.temperature_label,
        weather.description,
        weather.next_hours.join(", "),
        weather.next_days.join(", ")
    );
    for headline in &vm.news {
        tracing::info!("[{}] {}", headline.source, headline.title);
    }
}
