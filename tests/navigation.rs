mod common;

use common::{console, crumbs, ctx, output, Counter};
use sancdpd::dispatch::Dispatcher;
use sancdpd::logger::SessionLog;
use sancdpd::menu::{MenuOption, MenuTable, Session, SessionEnd};

fn small_table() -> MenuTable {
    MenuTable::new()
        .menu(
            "main",
            "MAIN",
            vec![
                MenuOption::procedure("n", "New ingest", "ingest"),
                MenuOption::submenu("a", "Agents", "agent"),
                MenuOption::quit("q", "Quit"),
            ],
        )
        .menu(
            "agent",
            "AGENT",
            vec![
                MenuOption::procedure("s", "Show agents", "show_agents"),
                MenuOption::back("b", "Go back"),
            ],
        )
}

#[test]
fn walk_into_agents_and_back_out() {
    let tmp = tempfile::tempdir().unwrap();
    let table = small_table();
    table.validate("main").unwrap();

    let ingest = Counter::default();
    let show = Counter::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register("ingest", ingest.clone())
        .register("show_agents", show.clone());

    let mut ctx = ctx(tmp.path());
    let mut con = console(&["a", "s", "b", "q"]);
    let mut session = Session::new(&table, "main").unwrap();
    let end = session.run(&mut con, &dispatcher, &mut ctx).unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(show.calls(), 1);
    assert_eq!(ingest.calls(), 0);
    assert_eq!(session.branch().ids(), ["main"]);

    let out = output(con);
    assert_eq!(
        crumbs(&out),
        [
            ">> MAIN  >>",
            ">> MAIN  >> AGENT  >>",
            ">> MAIN  >> AGENT  >>",
            ">> MAIN  >>",
        ]
    );
    assert!(out.contains("Goodbye."));
}

#[test]
fn back_at_root_keeps_the_root() {
    let tmp = tempfile::tempdir().unwrap();
    let table = MenuTable::new().menu(
        "main",
        "MAIN",
        vec![MenuOption::back("b", "Go back"), MenuOption::quit("q", "Quit")],
    );

    let mut ctx = ctx(tmp.path());
    let mut con = console(&["b", "b", "q"]);
    let mut session = Session::new(&table, "main").unwrap();
    let end = session.run(&mut con, &Dispatcher::new(), &mut ctx).unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(session.branch().depth(), 1);
    assert_eq!(session.branch().current(), "main");
    assert_eq!(crumbs(&output(con)), [">> MAIN  >>"; 3]);
}

#[test]
fn procedures_never_change_depth() {
    let tmp = tempfile::tempdir().unwrap();
    let table = MenuTable::new()
        .menu("main", "MAIN", vec![MenuOption::submenu("a", "Agents", "agent")])
        .menu(
            "agent",
            "AGENT",
            vec![
                MenuOption::procedure("s", "Show", "show_agents"),
                MenuOption::procedure("u", "Unwritten", "unwritten"),
                MenuOption::quit("q", "Quit"),
            ],
        );

    let show = Counter::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("show_agents", show.clone());

    let mut ctx = ctx(tmp.path());
    let mut con = console(&["a", "s", "u", "s", "q"]);
    let mut session = Session::new(&table, "main").unwrap();
    session.run(&mut con, &dispatcher, &mut ctx).unwrap();

    assert_eq!(show.calls(), 2);
    assert_eq!(session.branch().depth(), 2);

    let out = output(con);
    assert!(out.contains("   Procedure 'unwritten' not yet implemented."));
    let seen = crumbs(&out);
    assert_eq!(seen.len(), 5);
    assert!(seen[1..].iter().all(|c| *c == ">> MAIN  >> AGENT  >>"));
}

#[test]
fn bad_input_reprompts_until_a_command_matches() {
    let tmp = tempfile::tempdir().unwrap();
    let table = small_table();

    let mut ctx = ctx(tmp.path());
    let mut con = console(&["", "zz", "   ", "Quit"]);
    let mut session = Session::new(&table, "main").unwrap();
    let end = session.run(&mut con, &Dispatcher::new(), &mut ctx).unwrap();

    assert_eq!(end, SessionEnd::Quit);
    let out = output(con);
    assert_eq!(out.matches("-- Invalid entry. --").count(), 3);
    assert_eq!(crumbs(&out).len(), 1);
}

#[test]
fn closed_input_ends_the_session() {
    let tmp = tempfile::tempdir().unwrap();
    let table = small_table();

    let mut ctx = ctx(tmp.path());
    let mut con = console(&["a"]);
    let mut session = Session::new(&table, "main").unwrap();
    let end = session.run(&mut con, &Dispatcher::new(), &mut ctx).unwrap();

    assert_eq!(end, SessionEnd::EndOfInput);
    assert_eq!(session.branch().current(), "agent");
}

#[test]
fn quit_from_depth_is_logged() {
    let tmp = tempfile::tempdir().unwrap();
    let table = MenuTable::new()
        .menu("main", "MAIN", vec![MenuOption::submenu("a", "Agents", "agent")])
        .menu("agent", "AGENT", vec![MenuOption::quit("q", "Quit")]);

    let mut ctx = ctx(tmp.path());
    ctx.config.logging = true;
    ctx.log = SessionLog::begin(tmp.path(), &ctx.config).unwrap();

    let mut con = console(&["a", "q"]);
    let mut session = Session::new(&table, "main").unwrap();
    let end = session.run(&mut con, &Dispatcher::new(), &mut ctx).unwrap();
    assert_eq!(end, SessionEnd::Quit);

    let log = std::fs::read_to_string(ctx.log.path().unwrap()).unwrap();
    let quits = log
        .lines()
        .filter(|l| l.ends_with("Received 'quit' command from menu.  Returning."))
        .count();
    assert_eq!(quits, 1);
}

#[test]
fn unstarted_log_aborts_the_session() {
    let tmp = tempfile::tempdir().unwrap();
    let table = small_table();

    let mut ctx = ctx(tmp.path());
    ctx.log = SessionLog::pending();

    let mut dispatcher = Dispatcher::new();
    dispatcher.register("ingest", Counter::default());

    let mut con = console(&["n", "q"]);
    let mut session = Session::new(&table, "main").unwrap();
    assert!(session.run(&mut con, &dispatcher, &mut ctx).is_err());
}
