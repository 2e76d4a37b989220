use anyhow::{bail, Result};

use super::ask_field;
use crate::app::AppCtx;
use crate::console::Console;
use crate::database::StorageLocation;

pub fn show_storage(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
    let locations = ctx.db.active_storage()?;
    if locations.is_empty() {
        con.say("   (no active storage locations)")?;
        return Ok(());
    }
    for loc in &locations {
        con.say(&format!("   {:<14}{:<32}{}", loc.code, loc.name, loc.path))?;
    }
    Ok(())
}

pub fn add_storage(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
    con.say("   New storage location (leave blank to cancel).")?;
    let Some(code) = ask_field(con, "Storage code")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };
    if ctx.db.storage_exists(&code)? {
        bail!("storage code `{code}` is already in use");
    }
    let Some(name) = ask_field(con, "Storage name")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };
    let Some(path) = ask_field(con, "Storage path")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };

    let location = StorageLocation { code, name, path };
    ctx.db.add_storage(&location)?;
    ctx.log
        .log(&format!("add_storage: Added storage location {}.", location.code))?;
    con.say(&format!("   Added storage location {}.", location.code))?;
    Ok(())
}

pub fn deactivate_storage(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
    let Some(code) = ask_field(con, "Storage code to deactivate")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };
    if ctx.db.deactivate_storage(&code)? {
        ctx.log
            .log(&format!("deactivate_storage: Deactivated storage location {code}."))?;
        con.say(&format!("   Deactivated storage location {code}."))?;
    } else {
        con.say(&format!("   No active storage location with code {code}."))?;
    }
    Ok(())
}
