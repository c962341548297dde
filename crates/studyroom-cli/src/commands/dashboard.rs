use studyroom_core::Config;

use super::{open_store, print_json, CliResult};

pub fn run() -> CliResult {
    let config = Config::load_or_default();
    let store = open_store(&config)?;
    print_json(&store.dashboard(config.dashboard.recent_tasks))
}
