use clap::Subcommand;
use serde_json::json;
use thyroid_core::history::suggested_dose_mcg;
use thyroid_core::Config;

use super::{open_app, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the profile as JSON
    Show,
    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Daily dose in micrograms
        #[arg(long)]
        dose: Option<f64>,
        #[arg(long)]
        age: Option<u32>,
    },
}

pub fn run(action: ProfileAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut app = open_app(&config)?;

    match action {
        ProfileAction::Show => {
            let profile = app.profile();
            print_json(&json!({
                "profile": profile,
                "suggested_dose_mcg": suggested_dose_mcg(profile.weight),
            }))?;
        }
        ProfileAction::Set {
            name,
            weight,
            dose,
            age,
        } => {
            let mut profile = app.profile();
            if let Some(name) = name {
                profile.name = name.trim().to_string();
            }
            if let Some(weight) = weight {
                profile.weight = weight;
            }
            if let Some(dose) = dose {
                profile.current_dose = dose;
            }
            if age.is_some() {
                profile.age = age;
            }
            app.save_profile(&profile)?;
            print_json(&profile)?;
        }
    }
    Ok(())
}
