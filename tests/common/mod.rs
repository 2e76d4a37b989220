#![allow(dead_code)]

use std::cell::Cell;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use sancdpd::app::AppCtx;
use sancdpd::config::Config;
use sancdpd::console::{Console, LineConsole};
use sancdpd::database::{Database, RefData};
use sancdpd::dispatch::Procedure;
use sancdpd::logger::SessionLog;

pub type TestConsole = LineConsole<Cursor<String>, Vec<u8>>;

pub fn config(dir: &Path) -> Config {
    Config {
        logging: false,
        logdir: dir.to_path_buf(),
        dbfile: dir.join("sancdpd.db"),
        person_agent_code: "jdoe".into(),
        access_copy_root: dir.join("access"),
        render_delay_ms: 0,
        input_delay_ms: 0,
        pause_after_procedure: false,
    }
}

pub const SEED: &str = "
    INSERT INTO event_type VALUES ('ing', 'Ingestion', 'tfr');
    INSERT INTO event_type VALUES ('fix', 'Fixity check', 'pres');
    INSERT INTO event_type VALUES ('acc', 'Access copy creation', 'acc');
    INSERT INTO event_type_outcome VALUES ('fix', 'pass');
    INSERT INTO event_type_outcome VALUES ('fix', 'fail');
    INSERT INTO agent (agent_code, agent_name, agent_type, agent_version)
        VALUES ('jdoe', 'Jane Doe', 'person', NULL);
    INSERT INTO agent (agent_code, agent_name, agent_type, agent_version)
        VALUES ('sancdpd', 'SANCdpd CLI', 'software', '0.1.0');
";

pub fn seeded_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.create_schema().unwrap();
    db.connection().execute_batch(SEED).unwrap();
    db
}

pub fn ctx(dir: &Path) -> AppCtx {
    AppCtx {
        config: config(dir),
        log: SessionLog::disabled(),
        db: seeded_db(),
        refdata: RefData::default(),
    }
}

/// Console fed with one line per entry of `lines`.
pub fn console(lines: &[&str]) -> TestConsole {
    let mut input = lines.join("\n");
    if !lines.is_empty() {
        input.push('\n');
    }
    LineConsole::new(Cursor::new(input), Vec::new())
}

pub fn output(con: TestConsole) -> String {
    String::from_utf8(con.into_output()).unwrap()
}

/// Breadcrumb lines in the order they were rendered.
pub fn crumbs(out: &str) -> Vec<&str> {
    out.lines().filter(|l| l.starts_with(">> ")).collect()
}

/// Procedure that only counts its calls.
#[derive(Clone, Default)]
pub struct Counter(pub Rc<Cell<usize>>);

impl Counter {
    pub fn calls(&self) -> usize {
        self.0.get()
    }
}

impl Procedure for Counter {
    fn invoke(&self, _ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
        self.0.set(self.0.get() + 1);
        con.say("   (counted)")?;
        Ok(())
    }
}
