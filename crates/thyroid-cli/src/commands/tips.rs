use thyroid_core::advice::static_tips;
use thyroid_core::Config;

use super::{breakfast_advice, open_app, print_json, tips_advice, CmdResult};

pub fn run_tips(static_only: bool) -> CmdResult {
    if static_only {
        return print_json(&static_tips());
    }
    let config = Config::load_or_default();
    let app = open_app(&config)?;
    let tips = tips_advice(&config, &app.symptoms())?;
    if tips.is_fallback() {
        eprintln!("(advice service unavailable; showing general tips)");
    }
    print_json(tips.value())
}

pub fn run_advise(breakfast: &str) -> CmdResult {
    let config = Config::load_or_default();
    let advice = breakfast_advice(&config, breakfast)?;
    print_json(&advice)
}
