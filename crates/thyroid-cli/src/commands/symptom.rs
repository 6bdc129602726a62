use clap::Subcommand;
use thyroid_core::history::SYMPTOMS;
use thyroid_core::Config;

use super::{open_app, print_json, CmdResult};

#[derive(Subcommand)]
pub enum SymptomAction {
    /// Record today's symptoms
    Add {
        /// One or more symptom labels (see `symptom catalog`)
        #[arg(required = true)]
        labels: Vec<String>,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List diary entries, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print the suggested symptom labels
    Catalog,
}

pub fn run(action: SymptomAction) -> CmdResult {
    match action {
        SymptomAction::Add { labels, notes } => {
            let config = Config::load_or_default();
            let mut app = open_app(&config)?;
            match app.add_symptoms(&labels, &notes)? {
                Some(entry) => print_json(&entry)?,
                None => eprintln!("no symptoms given; nothing recorded"),
            }
        }
        SymptomAction::List { json } => {
            let config = Config::load_or_default();
            let app = open_app(&config)?;
            let entries = app.symptoms();
            if json {
                print_json(&entries)?;
            } else if entries.is_empty() {
                println!("No entries yet.");
            } else {
                for e in &entries {
                    if e.notes.is_empty() {
                        println!("{}  {}", e.date, e.symptoms.join(", "));
                    } else {
                        println!("{}  {}  -- {}", e.date, e.symptoms.join(", "), e.notes);
                    }
                }
            }
        }
        SymptomAction::Catalog => {
            for label in SYMPTOMS {
                println!("{label}");
            }
        }
    }
    Ok(())
}
