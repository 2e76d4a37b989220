//! Procedure bodies reachable from the menus.

use anyhow::Result;

use crate::console::Console;
use crate::dispatch::Dispatcher;

pub mod agents;
pub mod ingest;
pub mod storage;

/// Register every implemented procedure. Menu entries whose procedure is not
/// listed here get the dispatcher's "not yet implemented" notice.
pub fn register_all(dispatcher: &mut Dispatcher) {
    dispatcher
        .register("ingest", ingest::new_ingest)
        .register("show_agents", agents::show_agents)
        .register("add_agent", agents::add_agent)
        .register("deactivate_agent", agents::deactivate_agent)
        .register("show_storage", storage::show_storage)
        .register("add_storage", storage::add_storage)
        .register("deactivate_storage", storage::deactivate_storage);
}

/// Ask for one field. Blank input or closed input gives `None`.
pub(crate) fn ask_field(con: &mut dyn Console, label: &str) -> Result<Option<String>> {
    let answer = con.ask(&format!("   {label}: "))?;
    Ok(answer
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
