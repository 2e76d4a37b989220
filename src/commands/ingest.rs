use std::time::Duration;

use anyhow::Result;

use crate::app::AppCtx;
use crate::console::Console;

const STEPS: [&str; 3] = [
    "   Setting up new ingest operation...",
    "   Standby...",
    "   Preparing for ingest...",
];

const NOT_READY: &str = "   Bag ingest is not yet implemented.";

/// Placeholder for bag ingest: walks the user through the staging messages
/// and stops before touching anything.
pub fn new_ingest(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
    let step_delay = Duration::from_millis(ctx.config.render_delay_ms);
    for step in STEPS {
        con.say(step)?;
        con.pause(step_delay);
    }
    con.say(NOT_READY)?;
    ctx.log.log("new_ingest: Stub ingest run, nothing recorded.")?;
    Ok(())
}
