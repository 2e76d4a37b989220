//! The menu table: every menu the CLI can show, keyed by menu id.
//!
//! Option order inside a menu is the display order and the match order.
//! Menus link to each other through [`MenuAction::SubMenu`] targets.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("menu `{0}` is not defined")]
    NotFound(String),

    #[error("menu `{menu}` option `{command}` points at undefined menu `{target}`")]
    DanglingTarget {
        menu: String,
        command: String,
        target: String,
    },

    #[error("menu `{menu}` defines command `{command}` more than once")]
    DuplicateCommand { menu: String, command: String },

    #[error("menu `{menu}` has malformed command `{command}` (want 1-3 lowercase letters or digits)")]
    InvalidCommand { menu: String, command: String },

    #[error("menu `{0}` has no options")]
    EmptyMenu(String),

    #[error("submenu cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Descend into the menu with this id.
    SubMenu(&'static str),
    /// Return to the parent menu.
    Back,
    /// Run the named procedure, then show the same menu again.
    Procedure(&'static str),
    /// End the session.
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub command: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

impl MenuOption {
    pub fn submenu(command: &'static str, description: &'static str, target: &'static str) -> Self {
        Self { command, description, action: MenuAction::SubMenu(target) }
    }

    pub fn procedure(command: &'static str, description: &'static str, name: &'static str) -> Self {
        Self { command, description, action: MenuAction::Procedure(name) }
    }

    pub fn back(command: &'static str, description: &'static str) -> Self {
        Self { command, description, action: MenuAction::Back }
    }

    pub fn quit(command: &'static str, description: &'static str) -> Self {
        Self { command, description, action: MenuAction::Quit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDefinition {
    pub id: &'static str,
    /// Breadcrumb label.
    pub title: &'static str,
    pub options: Vec<MenuOption>,
}

impl MenuDefinition {
    /// Find the option for an already-normalized input token.
    ///
    /// An exact command match wins. Otherwise the option with the longest
    /// command that prefixes the token is taken, so `"qxx"` selects `q`.
    pub fn resolve(&self, token: &str) -> Option<&MenuOption> {
        if token.is_empty() {
            return None;
        }
        if let Some(exact) = self.options.iter().find(|op| op.command == token) {
            return Some(exact);
        }
        self.options
            .iter()
            .filter(|op| !op.command.is_empty() && token.starts_with(op.command))
            .fold(None, |best: Option<&MenuOption>, op| match best {
                Some(b) if b.command.len() >= op.command.len() => Some(b),
                _ => Some(op),
            })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuTable {
    menus: HashMap<&'static str, MenuDefinition>,
}

impl MenuTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a menu.
    pub fn menu(mut self, id: &'static str, title: &'static str, options: Vec<MenuOption>) -> Self {
        self.menus.insert(id, MenuDefinition { id, title, options });
        self
    }

    pub fn lookup(&self, id: &str) -> Result<&MenuDefinition, MenuError> {
        self.menus
            .get(id)
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.menus.contains_key(id)
    }

    /// Check the table before a session starts from `root`.
    pub fn validate(&self, root: &str) -> Result<(), MenuError> {
        self.lookup(root)?;

        let mut ids: Vec<&&'static str> = self.menus.keys().collect();
        ids.sort();
        for id in ids {
            let def = &self.menus[*id];
            if def.options.is_empty() {
                return Err(MenuError::EmptyMenu(def.id.to_string()));
            }

            let mut seen = HashSet::new();
            for op in &def.options {
                if !is_valid_command(op.command) {
                    return Err(MenuError::InvalidCommand {
                        menu: def.id.to_string(),
                        command: op.command.to_string(),
                    });
                }
                if !seen.insert(op.command) {
                    return Err(MenuError::DuplicateCommand {
                        menu: def.id.to_string(),
                        command: op.command.to_string(),
                    });
                }
                if let MenuAction::SubMenu(target) = op.action {
                    if !self.contains(target) {
                        return Err(MenuError::DanglingTarget {
                            menu: def.id.to_string(),
                            command: op.command.to_string(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }

        // walk from the table's own key so the path can hold 'static ids
        let (&root, _) = self
            .menus
            .get_key_value(root)
            .ok_or_else(|| MenuError::NotFound(root.to_string()))?;
        let mut path = Vec::new();
        self.find_cycle(root, &mut path)
    }

    /// Procedure names the table can dispatch, sorted, without repeats.
    pub fn procedures(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .menus
            .values()
            .flat_map(|def| def.options.iter())
            .filter_map(|op| match op.action {
                MenuAction::Procedure(name) => Some(name),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn find_cycle(&self, id: &'static str, path: &mut Vec<&'static str>) -> Result<(), MenuError> {
        if path.contains(&id) {
            let mut cycle: Vec<String> = path
                .iter()
                .skip_while(|p| **p != id)
                .map(|p| p.to_string())
                .collect();
            cycle.push(id.to_string());
            return Err(MenuError::Cycle(cycle));
        }

        path.push(id);
        for op in &self.menus[id].options {
            if let MenuAction::SubMenu(target) = op.action {
                self.find_cycle(target, path)?;
            }
        }
        path.pop();
        Ok(())
    }

    /// The SANCdpd CLI menus.
    pub fn builtin() -> Self {
        Self::new()
            .menu(
                "main",
                "MAIN MENU",
                vec![
                    MenuOption::procedure("n", "Perform new ingest", "ingest"),
                    MenuOption::submenu("e", "Record administrative events", "recevents"),
                    MenuOption::submenu("l", "Evolve lineage", "lineage"),
                    MenuOption::submenu("c", "Create or register access copies", "access"),
                    MenuOption::submenu("r", "Generate reports", "reports"),
                    MenuOption::submenu("a", "Manage agents", "agent"),
                    MenuOption::submenu("s", "Manage storage", "storage"),
                    MenuOption::quit("q", "Quit SANCdpd CLI"),
                ],
            )
            .menu("recevents", "Event Recording", vec![MenuOption::back("b", "Go back")])
            .menu("lineage", "Lineage Evolution", vec![MenuOption::back("b", "Go back")])
            .menu("access", "Access Copies", vec![MenuOption::back("b", "Go back")])
            .menu("reports", "Reports", vec![MenuOption::back("b", "Go back")])
            .menu(
                "agent",
                "Agent Management",
                vec![
                    MenuOption::procedure("s", "Show active agents", "show_agents"),
                    MenuOption::procedure("a", "Add new agent", "add_agent"),
                    MenuOption::procedure("d", "Deactivate agent", "deactivate_agent"),
                    MenuOption::back("b", "Go back"),
                ],
            )
            .menu(
                "storage",
                "Storage Management",
                vec![
                    MenuOption::procedure("s", "Show active storage locations", "show_storage"),
                    MenuOption::procedure("a", "Add new storage location", "add_storage"),
                    MenuOption::procedure("d", "Deactivate storage", "deactivate_storage"),
                    MenuOption::back("b", "Go back"),
                ],
            )
    }
}

fn is_valid_command(cmd: &str) -> bool {
    (1..=3).contains(&cmd.len())
        && cmd
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reachable(table: &MenuTable, root: &'static str) -> Vec<&'static str> {
        let mut out = vec![root];
        let mut i = 0;
        while i < out.len() {
            for op in &table.lookup(out[i]).unwrap().options {
                if let MenuAction::SubMenu(t) = op.action {
                    if !out.contains(&t) {
                        out.push(t);
                    }
                }
            }
            i += 1;
        }
        out
    }

    #[test]
    fn builtin_table_is_valid() {
        MenuTable::builtin().validate("main").unwrap();
    }

    #[test]
    fn validate_accepts_a_borrowed_root() {
        let table = MenuTable::builtin();
        let root = String::from("main");
        table.validate(&root).unwrap();

        let unknown = String::from("nowhere");
        assert_eq!(table.validate(&unknown), Err(MenuError::NotFound("nowhere".into())));
    }

    #[test]
    fn builtin_procedures_are_listed_once() {
        assert_eq!(
            MenuTable::builtin().procedures(),
            [
                "add_agent",
                "add_storage",
                "deactivate_agent",
                "deactivate_storage",
                "ingest",
                "show_agents",
                "show_storage"
            ]
        );
    }

    #[test]
    fn every_reachable_menu_resolves() {
        let table = MenuTable::builtin();
        let ids = reachable(&table, "main");
        assert_eq!(ids.len(), 7);
        for id in ids {
            assert!(table.lookup(id).is_ok(), "{id} missing");
        }
    }

    #[test]
    fn builtin_commands_are_distinct_after_truncation() {
        let table = MenuTable::builtin();
        for id in reachable(&table, "main") {
            let def = table.lookup(id).unwrap();
            let mut seen = HashSet::new();
            for op in &def.options {
                let key: String = op.command.chars().take(3).collect::<String>().to_lowercase();
                assert!(seen.insert(key), "duplicate in {id}");
            }
        }
    }

    #[test]
    fn lookup_unknown_menu_fails() {
        assert_eq!(
            MenuTable::builtin().lookup("nowhere"),
            Err(MenuError::NotFound("nowhere".into()))
        );
    }

    #[test]
    fn option_order_is_preserved() {
        let table = MenuTable::builtin();
        let cmds: Vec<_> = table.lookup("agent").unwrap().options.iter().map(|o| o.command).collect();
        assert_eq!(cmds, ["s", "a", "d", "b"]);
    }

    #[test]
    fn dangling_target_is_rejected() {
        let table = MenuTable::new().menu("main", "MAIN", vec![MenuOption::submenu("x", "Go", "ghost")]);
        assert!(matches!(table.validate("main"), Err(MenuError::DanglingTarget { .. })));
    }

    #[test]
    fn duplicate_and_malformed_commands_are_rejected() {
        let dup = MenuTable::new().menu(
            "main",
            "MAIN",
            vec![MenuOption::quit("q", "Quit"), MenuOption::quit("q", "Quit again")],
        );
        assert!(matches!(dup.validate("main"), Err(MenuError::DuplicateCommand { .. })));

        let upper = MenuTable::new().menu("main", "MAIN", vec![MenuOption::quit("Q", "Quit")]);
        assert!(matches!(upper.validate("main"), Err(MenuError::InvalidCommand { .. })));

        let long = MenuTable::new().menu("main", "MAIN", vec![MenuOption::quit("quit", "Quit")]);
        assert!(matches!(long.validate("main"), Err(MenuError::InvalidCommand { .. })));
    }

    #[test]
    fn cycles_are_rejected() {
        let table = MenuTable::new()
            .menu("main", "MAIN", vec![MenuOption::submenu("a", "A", "a"), MenuOption::quit("q", "Quit")])
            .menu("a", "A", vec![MenuOption::submenu("m", "Main", "main")]);
        assert_eq!(
            table.validate("main"),
            Err(MenuError::Cycle(vec!["main".into(), "a".into(), "main".into()]))
        );
    }

    #[test]
    fn resolve_prefers_exact_then_longest_prefix() {
        let def = MenuDefinition {
            id: "m",
            title: "M",
            options: vec![
                MenuOption::back("s", "short"),
                MenuOption::quit("sa", "longer"),
            ],
        };
        assert_eq!(def.resolve("s").unwrap().description, "short");
        assert_eq!(def.resolve("sa").unwrap().description, "longer");
        assert_eq!(def.resolve("sax").unwrap().description, "longer");
        assert_eq!(def.resolve("sx").unwrap().description, "short");
        assert!(def.resolve("x").is_none());
        assert!(def.resolve("").is_none());
    }
}
