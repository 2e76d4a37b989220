use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::commands;
use crate::config::Config;
use crate::console::{Console, LineConsole};
use crate::database::{Database, RefData};
use crate::defaults::Defaults;
use crate::dispatch::Dispatcher;
use crate::logger::SessionLog;
use crate::menu::{MenuTable, Session, SessionEnd};
use crate::ui::banner;

/// Everything a procedure may touch during a session. Built once at startup
/// and lent to the engine and dispatcher.
pub struct AppCtx {
    pub config: Config,
    pub log: SessionLog,
    pub db: Database,
    pub refdata: RefData,
}

impl AppCtx {
    /// Open and check the database named in `config`, then load reference data.
    pub fn open(config: Config, mut log: SessionLog, con: &mut dyn Console) -> Result<Self> {
        let db = Database::open(&config.dbfile)
            .with_context(|| format!("opening database {}", config.dbfile.display()))?;
        log.log(&format!(
            "check_db: Connected to SQLite database at: {}",
            config.dbfile.display()
        ))?;

        let counts = db
            .verify(&config.person_agent_code)
            .context("checking the SANCdpd database")?;
        if counts.event_types < Defaults::MIN_EVENT_TYPES
            || counts.outcomes < Defaults::MIN_EVENT_OUTCOMES
        {
            tracing::warn!(?counts, "sparse event reference tables");
            con.say("Warning:  Little or no data in event reference tables.")?;
            log.log(&format!(
                "check_db: Sparse reference data ({} event types, {} outcomes).",
                counts.event_types, counts.outcomes
            ))?;
        }

        let refdata = db.load_reference().context("loading reference tables")?;
        log.log(&format!(
            "loadref: Loaded {} event types.",
            refdata.event_types.len()
        ))?;

        Ok(Self {
            config,
            log,
            db,
            refdata,
        })
    }
}

/// Run the menu system from the root menu with the built-in table and procedures.
pub fn run_session(ctx: &mut AppCtx, con: &mut dyn Console) -> Result<SessionEnd> {
    let table = MenuTable::builtin();
    table
        .validate(Defaults::ROOT_MENU)
        .context("built-in menu table is inconsistent")?;

    let mut dispatcher = Dispatcher::new();
    commands::register_all(&mut dispatcher);
    for name in table.procedures() {
        if !dispatcher.is_registered(name) {
            tracing::debug!(procedure = name, "menu procedure has no handler");
        }
    }

    let mut session = Session::new(&table, Defaults::ROOT_MENU)?;
    ctx.log.log("run_menu: Starting menu session.")?;
    let end = session.run(con, &dispatcher, ctx)?;
    Ok(end)
}

/// Full startup: banner, config, session log, database, then the menus.
pub fn start_cli(cli: &Cli) -> Result<SessionEnd> {
    let mut con = LineConsole::stdio();
    for line in banner::welcome_lines() {
        con.say(&line)?;
    }

    let cwd = std::env::current_dir().context("reading working directory")?;
    let path = Config::locate(&cwd, cli.config.as_deref())?;
    let config =
        Config::load(&path).with_context(|| format!("loading config {}", path.display()))?;

    let mut log = SessionLog::for_config(&config);
    if log.is_enabled() {
        log.start(&config)?;
    }
    log.log(&format!("readfile: Loaded config from {}", path.display()))?;

    let mut ctx = AppCtx::open(config, log, &mut con)?;
    run_session(&mut ctx, &mut con)
}
