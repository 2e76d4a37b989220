//! Maps procedure names from the menu table to the code that runs them.

use std::collections::HashMap;

use anyhow::Result;

use crate::app::AppCtx;
use crate::console::Console;
use crate::logger::LogError;
use crate::menu::engine::SessionError;

/// A named operation a menu option can run.
///
/// Procedures report their own problems; an `Err` here is shown to the user
/// and logged. Only a failing session log ends the session.
pub trait Procedure {
    fn invoke(&self, ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()>;
}

impl<F> Procedure for F
where
    F: Fn(&mut AppCtx, &mut dyn Console) -> Result<()>,
{
    fn invoke(&self, ctx: &mut AppCtx, con: &mut dyn Console) -> Result<()> {
        self(ctx, con)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    Failed,
    NotImplemented,
}

#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Box<dyn Procedure>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P>(&mut self, name: impl Into<String>, procedure: P) -> &mut Self
    where
        P: Procedure + 'static,
    {
        self.handlers.insert(name.into(), Box::new(procedure));
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Run `name`, then wait for Enter if the config asks for it.
    ///
    /// Only session-level failures (log writes, console I/O) come back as `Err`.
    pub fn dispatch(
        &self,
        name: &str,
        ctx: &mut AppCtx,
        con: &mut dyn Console,
    ) -> Result<DispatchOutcome, SessionError> {
        ctx.log
            .log(&format!("Menu command: {name}. Will attempt to execute."))?;

        let outcome = match self.handlers.get(name) {
            Some(procedure) => match procedure.invoke(ctx, con) {
                Ok(()) => DispatchOutcome::Completed,
                // a broken session log ends the session, even from inside a procedure
                Err(err) => match err.downcast::<LogError>() {
                    Ok(fatal) => return Err(fatal.into()),
                    Err(err) => {
                        tracing::warn!(procedure = name, error = %err, "procedure failed");
                        con.say(&format!("   Procedure '{name}' failed: {err:#}"))?;
                        ctx.log.log(&format!("Procedure {name} failed: {err:#}"))?;
                        DispatchOutcome::Failed
                    }
                },
            },
            None => {
                con.say(&format!("   Procedure '{name}' not yet implemented."))?;
                DispatchOutcome::NotImplemented
            }
        };

        if ctx.config.pause_after_procedure {
            con.ask("   Press Enter to continue.")?;
        }
        Ok(outcome)
    }
}
