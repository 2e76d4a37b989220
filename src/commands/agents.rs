use anyhow::{bail, Result};

use super::ask_field;
use crate::app::AppCtx;
use crate::console::Console;
use crate::database::Agent;

pub fn show_agents(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
    let agents = ctx.db.active_agents()?;
    if agents.is_empty() {
        con.say("   (no active agents)")?;
        return Ok(());
    }

    con.say(&format!("   {:<2}{:<14}{:<32}{:<14}{}", "", "CODE", "NAME", "TYPE", "VERSION"))?;
    for a in &agents {
        let marker = if a.code == ctx.config.person_agent_code { "*" } else { "" };
        con.say(&format!(
            "   {:<2}{:<14}{:<32}{:<14}{}",
            marker,
            a.code,
            a.name,
            a.agent_type,
            a.version.as_deref().unwrap_or("-"),
        ))?;
    }
    con.say(&format!("   {} active agent(s); * marks the default person agent.", agents.len()))?;
    Ok(())
}

pub fn add_agent(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
    con.say("   New agent (leave blank to cancel).")?;
    let Some(code) = ask_field(con, "Agent code")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };
    if ctx.db.agent_exists(&code)? {
        bail!("agent code `{code}` is already in use");
    }
    let Some(name) = ask_field(con, "Agent name")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };
    let Some(agent_type) = ask_field(con, "Agent type (person/organization/software)")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };
    let version = ask_field(con, "Version (optional)")?;

    let agent = Agent { code, name, agent_type, version };
    ctx.db.add_agent(&agent)?;
    ctx.log.log(&format!("add_agent: Added agent {}.", agent.code))?;
    con.say(&format!("   Added agent {}.", agent.code))?;
    Ok(())
}

pub fn deactivate_agent(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
    let Some(code) = ask_field(con, "Agent code to deactivate")? else {
        con.say("   Cancelled.")?;
        return Ok(());
    };
    if ctx.db.deactivate_agent(&code, &ctx.config.person_agent_code)? {
        ctx.log.log(&format!("deactivate_agent: Deactivated agent {code}."))?;
        con.say(&format!("   Deactivated agent {code}."))?;
    } else {
        con.say(&format!("   No active agent with code {code}."))?;
    }
    Ok(())
}
