use thyroid_core::Config;

use super::{open_app, print_json, CmdResult};

pub fn run(json: bool) -> CmdResult {
    let config = Config::load_or_default();
    let app = open_app(&config)?;
    let report = app.report();
    if json {
        print_json(&report)?;
    } else {
        print!("{report}");
    }
    Ok(())
}
