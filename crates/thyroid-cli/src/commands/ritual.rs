use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use serde_json::json;
use thyroid_core::ritual::format_remaining;
use thyroid_core::{Config, RitualError, RitualPhase};

use super::{breakfast_advice, open_app, print_json, CmdResult};

#[derive(Subcommand)]
pub enum RitualAction {
    /// Record the pill and start the wait
    Take {
        /// Wait length in minutes (defaults to ritual.default_wait_minutes)
        #[arg(long, conflicts_with = "breakfast")]
        minutes: Option<u32>,
        /// Ask the advice service how long to wait for this breakfast
        #[arg(long)]
        breakfast: Option<String>,
    },
    /// Print the current ritual state as JSON
    Status,
    /// Count down in the terminal and ring when breakfast is allowed
    Watch,
    /// Acknowledge and start a new cycle
    Finish,
}

pub fn run(action: RitualAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut app = open_app(&config)?;

    match action {
        RitualAction::Take { minutes, breakfast } => {
            if app.phase() != RitualPhase::Waiting {
                return Err(RitualError::AlreadyActive { phase: app.phase() }.into());
            }
            match breakfast {
                Some(food) => {
                    let advice = breakfast_advice(&config, &food)?;
                    let event = app.take_pill_with_advice(&advice)?;
                    print_json(&json!({ "advice": advice, "event": event }))?;
                }
                None => {
                    let event = app.take_pill(minutes)?;
                    print_json(&event)?;
                }
            }
        }
        RitualAction::Status => {
            print_json(&app.snapshot())?;
        }
        RitualAction::Watch => {
            if app.phase() == RitualPhase::Waiting {
                eprintln!("no ritual in progress; run `ritual take` first");
                return print_json(&app.snapshot());
            }
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(async {
                let mut interval = tokio::time::interval(Duration::from_secs(1));
                let ctrl_c = tokio::signal::ctrl_c();
                tokio::pin!(ctrl_c);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            if let Some(event) = app.tick() {
                                eprintln!();
                                print_json(&event)?;
                            }
                            if app.phase() == RitualPhase::ReadyToEat {
                                break;
                            }
                            eprint!("\r{} ", format_remaining(app.remaining_secs()));
                            std::io::stderr().flush()?;
                        }
                        _ = &mut ctrl_c => {
                            eprintln!();
                            break;
                        }
                    }
                }
                CmdResult::Ok(())
            })?;
            if app.phase() == RitualPhase::ReadyToEat {
                eprintln!("¡Listo! Ya puedes desayunar.");
            }
        }
        RitualAction::Finish => {
            let event = app.finish_ritual()?;
            print_json(&event)?;
        }
    }
    Ok(())
}
