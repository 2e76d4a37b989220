//! Navigation engine: renders the current menu, reads a command and moves
//! the branch until the user quits.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::app::AppCtx;
use crate::console::Console;
use crate::defaults::Defaults;
use crate::dispatch::Dispatcher;
use crate::logger::LogError;
use crate::menu::branch::Branch;
use crate::menu::table::{MenuAction, MenuError, MenuTable};
use crate::ui::{banner, frame};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Log(#[from] LogError),

    #[error("console I/O failed")]
    Io(#[from] io::Error),
}

/// What the engine does with the branch after one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Push(&'static str),
    Pop,
    Run(&'static str),
    Quit,
}

impl From<MenuAction> for Transition {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::SubMenu(target) => Transition::Push(target),
            MenuAction::Back => Transition::Pop,
            MenuAction::Procedure(name) => Transition::Run(name),
            MenuAction::Quit => Transition::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user picked a Quit option.
    Quit,
    /// Input closed before a Quit option was picked.
    EndOfInput,
}

/// Trim, keep the first three characters, lower-case.
pub fn normalize_input(raw: &str) -> String {
    raw.trim().chars().take(3).collect::<String>().to_lowercase()
}

/// One interactive run over a menu table.
pub struct Session<'t> {
    table: &'t MenuTable,
    branch: Branch,
}

impl<'t> Session<'t> {
    /// Fails if `root` is not in the table.
    pub fn new(table: &'t MenuTable, root: &'static str) -> Result<Self, MenuError> {
        table.lookup(root)?;
        Ok(Self {
            table,
            branch: Branch::new(root),
        })
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    /// Drive the session until Quit or end of input.
    pub fn run(
        &mut self,
        con: &mut dyn Console,
        dispatcher: &Dispatcher,
        ctx: &mut AppCtx,
    ) -> Result<SessionEnd, SessionError> {
        let render_delay = Duration::from_millis(ctx.config.render_delay_ms);
        let input_delay = Duration::from_millis(ctx.config.input_delay_ms);

        loop {
            con.pause(render_delay);
            self.render(con)?;

            let Some(transition) = self.prompt(con, input_delay)? else {
                ctx.log.log("run_menu: Input closed. Returning.")?;
                for line in banner::farewell_lines() {
                    con.say(&line)?;
                }
                return Ok(SessionEnd::EndOfInput);
            };

            if let Some(end) = self.apply(transition, con, dispatcher, ctx)? {
                return Ok(end);
            }
        }
    }

    /// Breadcrumb header followed by the current menu's options.
    pub fn render(&self, con: &mut dyn Console) -> Result<(), SessionError> {
        let titles = self.branch.titles(self.table)?;
        for line in frame::header_lines(&titles) {
            con.say(&line)?;
        }
        let current = self.table.lookup(self.branch.current())?;
        for op in &current.options {
            con.say(&frame::option_line(op.command, op.description))?;
        }
        Ok(())
    }

    /// Ask until the input names an option of the current menu.
    /// `None` when input is closed.
    fn prompt(
        &self,
        con: &mut dyn Console,
        input_delay: Duration,
    ) -> Result<Option<Transition>, SessionError> {
        let current = self.table.lookup(self.branch.current())?;
        loop {
            let Some(raw) = con.ask(Defaults::PROMPT)? else {
                return Ok(None);
            };
            con.pause(input_delay);

            match current.resolve(&normalize_input(&raw)) {
                Some(op) => return Ok(Some(op.action.into())),
                None => con.say("-- Invalid entry. --")?,
            }
        }
    }

    /// Apply one transition. `Some` means the session is over.
    pub fn apply(
        &mut self,
        transition: Transition,
        con: &mut dyn Console,
        dispatcher: &Dispatcher,
        ctx: &mut AppCtx,
    ) -> Result<Option<SessionEnd>, SessionError> {
        tracing::debug!(?transition, menu = self.branch.current(), "menu selection");
        match transition {
            Transition::Push(target) => {
                self.table.lookup(target)?;
                self.branch.push(target);
            }
            Transition::Pop => {
                if !self.branch.pop() {
                    tracing::debug!("back at root ignored");
                }
            }
            Transition::Run(name) => {
                let outcome = dispatcher.dispatch(name, ctx, con)?;
                tracing::debug!(procedure = name, ?outcome, "procedure returned");
            }
            Transition::Quit => {
                ctx.log
                    .log("run_menu: Received 'quit' command from menu.  Returning.")?;
                for line in banner::farewell_lines() {
                    con.say(&line)?;
                }
                return Ok(Some(SessionEnd::Quit));
            }
        }
        Ok(None)
    }
}
