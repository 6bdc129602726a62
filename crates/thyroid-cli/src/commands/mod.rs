use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thyroid_core::advice::{Advisor, BreakfastAdvice, HttpAdvisor, OfflineAdvisor, Suggestion, Tip};
use thyroid_core::ritual::{SilentAlarm, TerminalBell};
use thyroid_core::{AlarmPlayer, App, Config, Database, SymptomEntry, SystemClock};
use tracing::warn;

pub mod config;
pub mod profile;
pub mod report;
pub mod ritual;
pub mod symptom;
pub mod tips;
pub mod weight;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Mount the app over the on-disk store. Mounting also completes a ritual
/// whose window ran out while nothing was running.
pub fn open_app(config: &Config) -> Result<App<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let alarm: Box<dyn AlarmPlayer> = if config.alarm.enabled {
        Box::new(TerminalBell::new(
            config.alarm.tones,
            Duration::from_millis(config.alarm.tone_gap_ms),
        ))
    } else {
        Box::new(SilentAlarm)
    };
    Ok(App::new(db, config, Arc::new(SystemClock), alarm))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

fn http_advisor(config: &Config) -> Option<HttpAdvisor> {
    if !config.advice.enabled {
        return None;
    }
    match HttpAdvisor::from_config(&config.advice) {
        Ok(advisor) => Some(advisor),
        Err(e) => {
            warn!(error = %e, "advice service misconfigured, using offline answers");
            None
        }
    }
}

pub fn breakfast_advice(config: &Config, food_input: &str) -> Result<Suggestion<BreakfastAdvice>, std::io::Error> {
    let rt = runtime()?;
    Ok(rt.block_on(async {
        match http_advisor(config) {
            Some(advisor) => advisor.breakfast(food_input).await,
            None => OfflineAdvisor.breakfast(food_input).await,
        }
    }))
}

pub fn tips_advice(config: &Config, history: &[SymptomEntry]) -> Result<Suggestion<Vec<Tip>>, std::io::Error> {
    let rt = runtime()?;
    Ok(rt.block_on(async {
        match http_advisor(config) {
            Some(advisor) => advisor.tips(history).await,
            None => OfflineAdvisor.tips(history).await,
        }
    }))
}

pub fn welcome() -> CmdResult {
    let config = Config::load_or_default();
    let mut app = open_app(&config)?;
    let first_time = !app.welcome_seen();
    app.complete_welcome()?;
    if first_time {
        println!("Bienvenido/a. Toma tu pastilla, espera y desayuna tranquilo/a.");
    } else {
        println!("welcome already completed");
    }
    Ok(())
}

pub fn reset(yes: bool) -> CmdResult {
    if !yes {
        return Err("refusing to wipe all data without --yes".into());
    }
    let config = Config::load_or_default();
    let mut app = open_app(&config)?;
    app.reset_all()?;
    println!("all data deleted");
    Ok(())
}
