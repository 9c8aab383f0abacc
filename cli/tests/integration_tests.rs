use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use stockroom_cli::AppConfig;
use tempfile::TempDir;

/// Runs the binary with `args`, feeding `input` on stdin.
fn run_stockroom(args: &[&str], input: &str) -> Output {
    run_stockroom_bytes(args, input.as_bytes())
}

fn run_stockroom_bytes(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stockroom"))
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn stockroom");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input)
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for stockroom")
}

fn run_with_database(database: &Path, input: &str) -> String {
    let output = run_stockroom(&["--database", database.to_str().unwrap()], input);
    assert!(
        output.status.success(),
        "stockroom failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

#[test]
fn test_exit_immediately_creates_default_table() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    let stdout = run_with_database(&database, "0\n");

    assert!(stdout.contains("----------BOOK STOCK MANAGER---------"));
    assert!(stdout.contains("5 - View All Books"));
    assert!(stdout.contains("----------APPLICATION CLOSED---------"));

    let conn = rusqlite::Connection::open(&database).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT count(name) FROM sqlite_master WHERE type='table' AND name='books'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_create_then_read_all_prints_grid() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    let stdout = run_with_database(&database, "1\nA. Author\nTitle One\n10\n5\n0\n");

    assert!(stdout.contains("New Book Added Successfully"));
    assert!(stdout.contains("|   id |   qty | author    | title     |"));
    assert!(stdout.contains("|    1 |    10 | A. Author | Title One |"));
}

#[test]
fn test_books_persist_between_sessions() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    run_with_database(&database, "1\nHerbert\nDune\n4\n0\n");
    run_with_database(&database, "1\nLe Guin\nLavinia\n1\n0\n");

    let stdout = run_with_database(&database, "5\n0\n");
    assert!(stdout.contains("|    1 |     4 | Herbert  | Dune    |"));
    assert!(stdout.contains("|    2 |     1 | Le Guin  | Lavinia |"));
}

#[test]
fn test_invalid_input_is_retried() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    // menu: bad option, then create with a negative quantity first
    let stdout = run_with_database(&database, "7\nx\n1\n\nAuthor\nTitle\n-5\n2\n0\n");

    assert!(stdout.contains("Please enter an option number between 0 and 5"));
    assert!(stdout.contains("Please enter a valid, non-decimal number"));
    assert!(stdout.contains("An input was not received."));
    assert!(stdout.contains("Value entered is smaller than allowed minimum of 0"));
    assert!(stdout.contains("New Book Added Successfully"));
}

#[test]
fn test_update_search_and_delete() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    let input = [
        "1", "A. Author", "Title One", "10",
        // update id 1, field 0 (qty) to 3
        "2", "1", "0", "3",
        // search by title
        "4", "2", "Title One",
        // delete id 1, then delete it again
        "3", "1",
        "3", "1",
        "5", "0",
    ]
    .join("\n")
        + "\n";
    let stdout = run_with_database(&database, &input);

    assert!(stdout.contains("Book Update was Successful"));
    assert!(stdout.contains("Search Results"));
    assert!(stdout.contains("|    1 |     3 | A. Author | Title One |"));
    assert!(stdout.contains("Book has been deleted"));
    assert!(stdout.contains("Book could not be deleted"));
    assert!(stdout.contains("No Books in Stock"));
}

#[test]
fn test_closed_stdin_ends_session_cleanly() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    let stdout = run_with_database(&database, "1\nA. Author\n");
    assert!(stdout.contains("New Book was not created"));
}

#[test]
fn test_undecodable_input_is_retried() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    let output = run_stockroom_bytes(
        &["--database", database.to_str().unwrap()],
        b"\xff\xfe\n1\nA. Author\nTitle One\n10\n5\n0\n",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please enter a valid, non-decimal number"));
    assert!(stdout.contains("New Book Added Successfully"));
    assert!(stdout.contains("|    1 |    10 | A. Author | Title One |"));
    assert!(stdout.contains("----------APPLICATION CLOSED---------"));
}

#[test]
fn test_unopenable_database_keeps_menu_running() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("missing").join("ebookstore");
    let stdout = run_with_database(&database, "5\n0\n");
    assert!(stdout.contains("Books could not be read: database could not be opened"));
    assert!(stdout.contains("----------APPLICATION CLOSED---------"));
}

#[test]
fn test_unregistered_table_halts_actions() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("ebookstore");
    let output = run_stockroom(
        &["--database", database.to_str().unwrap(), "--table", "magazines"],
        "3\n0\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Reason: no entity is registered for this table"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_init_config_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stockroom.yml");
    let output = run_stockroom(&["init-config", path.to_str().unwrap()], "");
    assert!(output.status.success());

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_init_config_records_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stockroom.yml");
    let output = run_stockroom(
        &["--database", "/var/lib/stock.db", "init-config", path.to_str().unwrap()],
        "",
    );
    assert!(output.status.success());

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.database.to_str(), Some("/var/lib/stock.db"));
    assert_eq!(config.table, "books");
}

#[test]
fn test_config_file_selects_database() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("from-config");
    let path = dir.path().join("stockroom.yml");
    AppConfig {
        database: database.clone(),
        table: "books".to_string(),
    }
    .save(&path)
    .unwrap();

    let output = run_stockroom(&["--config", path.to_str().unwrap()], "0\n");
    assert!(output.status.success());
    assert!(database.exists());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yml");
    let output = run_stockroom(&["--config", path.to_str().unwrap()], "0\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to load config"));
}
