//! Central place for the CLI's fixed values.
//! Update these and the whole app picks them up.

pub struct Defaults;

impl Defaults {
    /* Identity (must match `agent`.`agent_name` / `agent_version` in the database) */
    pub const SOFTW_AGENT_NAME: &'static str = "SANCdpd CLI";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /* Config file lookup */
    pub const CONFIG_FILE_NAME: &'static str = "SANCdpd_config.json";
    pub const CONFIG_SEARCH_DIRS: [&'static str; 4] = ["./", "../", "./SANCdpd/", "../SANCdpd/"];

    /* Menu system */
    pub const ROOT_MENU: &'static str = "main";
    pub const PROMPT: &'static str = "?> ";
    pub const RENDER_DELAY_MS: u64 = 300;
    pub const INPUT_DELAY_MS: u64 = 100;
    pub const PAUSE_AFTER_PROCEDURE: bool = true;

    /* Session log */
    pub const LOG_FILE_PREFIX: &'static str = "SANCdpd_log_";

    /* Reference data sanity thresholds (below these we only warn) */
    pub const MIN_EVENT_TYPES: usize = 3;
    pub const MIN_EVENT_OUTCOMES: usize = 2;
}
