use crate::defaults::Defaults;

/// Startup banner shown before config is read.
pub fn welcome_lines() -> Vec<String> {
    let stars = "*".repeat(26);
    let edge = format!("*{}*", " ".repeat(24));
    vec![
        String::new(),
        stars.clone(),
        edge.clone(),
        format!("    {}", Defaults::SOFTW_AGENT_NAME),
        edge.clone(),
        format!("    (ver {})", Defaults::VERSION),
        edge,
        stars,
    ]
}

pub fn farewell_lines() -> Vec<String> {
    vec![
        String::new(),
        format!("   Exiting the {} menu system now.  Goodbye.", Defaults::SOFTW_AGENT_NAME),
        String::new(),
    ]
}
