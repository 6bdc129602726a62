use clap::Subcommand;
use thyroid_core::history::weight_trend;
use thyroid_core::Config;

use super::{open_app, print_json, CmdResult};

#[derive(Subcommand)]
pub enum WeightAction {
    /// Record today's weight in kilograms
    Add { kg: f64 },
    /// List recorded weights, oldest first
    List,
    /// Change over the most recent entries
    Trend,
}

pub fn run(action: WeightAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut app = open_app(&config)?;

    match action {
        WeightAction::Add { kg } => {
            let entry = app.record_weight(kg)?;
            print_json(&entry)?;
        }
        WeightAction::List => {
            print_json(&app.weights())?;
        }
        WeightAction::Trend => {
            let trend = weight_trend(&app.weights());
            if trend.drastic {
                eprintln!(
                    "Cambio de {:+.1} kg: coméntalo con tu endocrinólogo.",
                    trend.change_kg
                );
            }
            print_json(&trend)?;
        }
    }
    Ok(())
}
