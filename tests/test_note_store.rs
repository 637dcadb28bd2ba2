mod helpers;

use anyhow::Result;
use clipnotes::application::{NoteDeleter, NoteExporter, NoteLister, NoteRepository, NoteViewer, NoteWriter};
use clipnotes::domain::DomainError;
use clipnotes::ports::MarkdownExporter;
use helpers::{test_notes, TestNotesDir};

#[test]
fn given_seeded_dir_when_listing_then_newest_note_first() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut lister = NoteLister::new(fixture.open_store()?);

    // Act
    let notes = lister.list_notes(None)?;

    // Assert
    let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![test_notes::SNIPPETS, test_notes::TRIP, test_notes::BLANK]);
    Ok(())
}

#[test]
fn given_search_term_when_listing_then_matches_title_case_insensitively() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut lister = NoteLister::new(fixture.open_store()?);

    // Act
    let notes = lister.list_notes(Some("lisbon"))?;

    // Assert
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Trip to Lisbon");
    Ok(())
}

#[test]
fn given_existing_note_when_viewing_then_returns_links_in_order() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut viewer = NoteViewer::new(fixture.open_store()?);

    // Act
    let note = viewer.view_note(test_notes::TRIP)?;

    // Assert
    assert_eq!(
        note.links,
        vec!["https://www.visitlisboa.com", "https://maps.google.com/lisbon"]
    );
    Ok(())
}

#[test]
fn given_nonexistent_note_when_viewing_then_returns_not_found_error() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut viewer = NoteViewer::new(fixture.open_store()?);

    // Act
    let result = viewer.view_note(test_notes::NONEXISTENT);

    // Assert
    match result {
        Err(DomainError::NoteNotFound(id)) => assert_eq!(id, test_notes::NONEXISTENT),
        other => panic!("Expected NoteNotFound error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn given_existing_note_when_deleting_then_file_is_removed() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut deleter = NoteDeleter::new(fixture.open_store()?);
    assert!(fixture.note_file(test_notes::TRIP).exists());

    // Act
    deleter.delete_note(test_notes::TRIP)?;

    // Assert
    assert!(!fixture.note_file(test_notes::TRIP).exists());
    let mut reopened = fixture.open_store()?;
    assert_eq!(reopened.list_notes()?.len(), 2);
    Ok(())
}

#[test]
fn given_nonexistent_note_when_deleting_then_returns_not_found_error() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut deleter = NoteDeleter::new(fixture.open_store()?);

    // Act
    let result = deleter.delete_note(test_notes::NONEXISTENT);

    // Assert
    assert!(matches!(result, Err(DomainError::NoteNotFound(_))));
    Ok(())
}

#[test]
fn given_link_field_with_bare_domains_when_creating_then_stores_normalized_links() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::empty()?;
    let mut writer = NoteWriter::new(fixture.open_store()?);

    // Act
    let id = writer.create("Reading", "", "example.com/a, https://rust-lang.org")?;

    // Assert
    let mut reopened = fixture.open_store()?;
    let note = reopened.get_note(&id)?;
    assert_eq!(note.links, vec!["https://example.com/a", "https://rust-lang.org"]);
    Ok(())
}

#[test]
fn given_invalid_link_field_when_creating_then_nothing_is_stored() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::empty()?;
    let mut writer = NoteWriter::new(fixture.open_store()?);

    // Act
    let result = writer.create("Reading", "", "example.com, not a url");

    // Assert
    match result {
        Err(DomainError::InvalidUrls(bad)) => assert_eq!(bad, vec!["not a url"]),
        other => panic!("Expected InvalidUrls error, got {:?}", other),
    }
    assert!(fixture.open_store()?.list_notes()?.is_empty());
    Ok(())
}

#[test]
fn given_stored_note_when_adding_known_link_then_reports_no_change() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut writer = NoteWriter::new(fixture.open_store()?);

    // Act
    let added = writer.add_link(test_notes::TRIP, "www.visitlisboa.com")?;
    let added_new = writer.add_link(test_notes::TRIP, "timeout.com")?;

    // Assert
    assert!(!added);
    assert!(added_new);
    let note = writer.repository_mut().get_note(test_notes::TRIP)?;
    assert_eq!(note.links.last().map(String::as_str), Some("https://timeout.com"));
    Ok(())
}

#[test]
fn given_stored_note_when_exporting_then_renders_links_and_metadata() -> Result<()> {
    // Arrange
    let fixture = TestNotesDir::new()?;
    let mut exporter = NoteExporter::new(fixture.open_store()?, MarkdownExporter::utc());

    // Act
    let export = exporter.export_note(test_notes::TRIP)?;

    // Assert
    assert_eq!(export.file_name, "Trip to Lisbon.md");
    assert!(export.markdown.starts_with("# Trip to Lisbon\n\nPack light.\n\n## Links\n\n"));
    assert!(export.markdown.contains("- https://maps.google.com/lisbon\n"));
    assert!(export.markdown.contains("Created: 2024-05-02 12:00:00"));
    assert!(export.markdown.ends_with(&format!("Note ID: {}\n---", test_notes::TRIP)));
    Ok(())
}
