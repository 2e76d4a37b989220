//! Interactive menu system: declarative table, navigation branch, engine.

pub mod branch;
pub mod engine;
pub mod table;

pub use branch::Branch;
pub use engine::{normalize_input, Session, SessionEnd, Transition};
pub use table::{MenuAction, MenuDefinition, MenuError, MenuOption, MenuTable};
