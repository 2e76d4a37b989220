//! Text framing for menus: breadcrumb header and option rows.

const CRUMB: &str = ">>";
const RULE_CHAR: char = '>';

/// `>> MAIN MENU  >> Agent Management  >>`
pub fn breadcrumbs(titles: &[&str]) -> String {
    let mut crumbs: String = titles.iter().map(|t| format!("{CRUMB} {t}  ")).collect();
    crumbs.push_str(CRUMB);
    crumbs
}

/// Two blank lines, then the breadcrumb line between two rules of equal width.
pub fn header_lines(titles: &[&str]) -> Vec<String> {
    let crumbs = breadcrumbs(titles);
    let rule: String = std::iter::repeat(RULE_CHAR)
        .take(crumbs.chars().count())
        .collect();
    vec![String::new(), String::new(), rule.clone(), crumbs, rule]
}

pub fn option_line(command: &str, description: &str) -> String {
    format!("   {command}\t{description}")
}
