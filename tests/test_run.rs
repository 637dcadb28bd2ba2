mod helpers;

use anyhow::Result;
use clap::Parser;
use clipnotes::application::NoteRepository;
use clipnotes::cli::args::Args;
use helpers::{test_notes, TestNotesDir};

/// Run the CLI against the fixture with a config path that does not exist yet
fn run_cli(fixture: &TestNotesDir, command: &[&str]) -> Result<()> {
    let config = fixture.notes_dir.with_file_name("clipnotes.toml");
    let notes_dir = fixture.notes_dir.to_string_lossy().to_string();
    let config = config.to_string_lossy().to_string();
    let mut argv = vec!["clipnotes", "-c", config.as_str(), "-n", notes_dir.as_str()];
    argv.extend_from_slice(command);
    clipnotes::run(Args::try_parse_from(argv)?)
}

#[test]
fn given_restored_entry_when_captured_in_next_run_then_note_is_unchanged() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    run_cli(&fixture, &["history", "add", "example.com/docs"])?;
    let id = fixture.open_store()?.load_clipboard_history()?[0].id.clone();

    // Act
    run_cli(&fixture, &["history", "restore", &id])?;
    run_cli(&fixture, &["capture", test_notes::BLANK, "example.com/docs"])?;

    // Assert
    let mut store = fixture.open_store()?;
    assert!(store.get_note(test_notes::BLANK)?.links.is_empty());
    assert_eq!(
        store.load_clipboard_state()?.last_internal_copy.as_deref(),
        Some("example.com/docs")
    );
    Ok(())
}

#[test]
fn given_entry_not_restored_when_captured_then_note_gains_link() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    run_cli(&fixture, &["history", "add", "example.com/docs"])?;

    // Act
    run_cli(&fixture, &["capture", test_notes::BLANK, "example.com/docs"])?;

    // Assert
    let mut store = fixture.open_store()?;
    assert_eq!(
        store.get_note(test_notes::BLANK)?.links,
        vec!["https://example.com/docs"]
    );
    Ok(())
}
