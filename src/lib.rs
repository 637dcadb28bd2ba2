// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod content;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use application::{
    Capture, ClipboardHistory, EditingSession, NoteDeleter, NoteExporter, NoteLister, NoteRepository,
    NoteViewer, NoteWriter, RecordOutcome,
};
use chrono::{Local, Utc};
use cli::args::{Args, Command, HistoryAction};
use constants::{EXPORT_DATETIME_FORMAT, UNTITLED_NOTE};
use content::url::extract_domain;
use content::{classify_for, is_valid_url, normalize_url};
use domain::ClipboardState;
use infrastructure::{Config, JsonNoteStore};
use ports::MarkdownExporter;
use tracing::{debug, info, warn};

const PREVIEW_CHARS: usize = 60;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting clipnotes with arguments");

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_or_default(&config_path)?;
    debug!(?config_path, ?config, "Configuration loaded");

    match args.command {
        Command::Classify { text, channel } => {
            let text = text_or_stdin(text)?;
            let result = classify_for(channel, &text);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::CheckUrl { url } => {
            if is_valid_url(&url) {
                println!("{}", normalize_url(&url));
            } else {
                anyhow::bail!("Not a URL: {}", url.trim());
            }
        }
        Command::List { search } => {
            let mut store = open_store(&config, args.notes_dir.as_deref())?;
            handle_list(&mut store, search.as_deref())?;
        }
        Command::Show { note_id, json } => {
            let mut store = open_store(&config, args.notes_dir.as_deref())?;
            handle_show(&mut store, &note_id, json)?;
        }
        Command::New { title, content, links } => {
            let store = open_store(&config, args.notes_dir.as_deref())?;
            let mut writer = NoteWriter::new(store);
            let id = writer.create(&title, &content, &links)?;
            println!("{}", id);
        }
        Command::Link { note_id, url } => {
            let store = open_store(&config, args.notes_dir.as_deref())?;
            let mut writer = NoteWriter::new(store);
            if writer.add_link(&note_id, &url)? {
                println!("Added {} to note {}", normalize_url(&url), note_id);
            } else {
                println!("Note {} already links to {}", note_id, normalize_url(&url));
            }
        }
        Command::Capture { note_id, text } => {
            let store = open_store(&config, args.notes_dir.as_deref())?;
            let text = text_or_stdin(text)?;
            handle_capture(store, &config, &note_id, &text)?;
        }
        Command::Export { note_id, output } => {
            let store = open_store(&config, args.notes_dir.as_deref())?;
            handle_export(store, &note_id, output.as_deref())?;
        }
        Command::Delete { note_id } => {
            let store = open_store(&config, args.notes_dir.as_deref())?;
            let mut deleter = NoteDeleter::new(store);
            deleter.delete_note(&note_id)?;
            println!("Deleted note {}", note_id);
        }
        Command::History { action } => {
            let store = open_store(&config, args.notes_dir.as_deref())?;
            handle_history(&store, config, &config_path, action)?;
        }
    }

    Ok(())
}

fn open_store(config: &Config, override_dir: Option<&Path>) -> Result<JsonNoteStore> {
    let notes_dir: PathBuf = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => config.notes_dir()?,
    };
    JsonNoteStore::open(&notes_dir)
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            Ok(buffer)
        }
    }
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        UNTITLED_NOTE
    } else {
        title
    }
}

fn handle_list(store: &mut JsonNoteStore, search: Option<&str>) -> Result<()> {
    let notes = NoteLister::new(&mut *store).list_notes(search)?;
    info!(count = notes.len(), "Listed notes");

    for note in &notes {
        println!(
            "{}\t{}\t{}",
            note.id,
            note.updated_at.with_timezone(&Local).format(EXPORT_DATETIME_FORMAT),
            display_title(&note.title)
        );
    }

    if search.is_none() {
        let mut state = store.load_sidebar_state()?.unwrap_or_default();
        state.notes = notes;
        state.last_sync_time = Utc::now().timestamp_millis();
        store.save_sidebar_state(&state)?;
    }
    Ok(())
}

fn handle_show(store: &mut JsonNoteStore, note_id: &str, json: bool) -> Result<()> {
    let note = NoteViewer::new(&mut *store).view_note(note_id)?;

    let mut state = store.load_sidebar_state()?.unwrap_or_default();
    state.selected_note_id = Some(note.id.clone());
    store.save_sidebar_state(&state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
        return Ok(());
    }

    println!("{}\n", display_title(&note.title));
    if !note.content.trim().is_empty() {
        println!("{}\n", note.content);
    }
    for link in &note.links {
        println!("- {}  ({})", link, extract_domain(link));
    }
    Ok(())
}

fn handle_export<R: NoteRepository>(repository: R, note_id: &str, output: Option<&Path>) -> Result<()> {
    let mut exporter = NoteExporter::new(repository, MarkdownExporter::local());
    let export = exporter.export_note(note_id)?;

    let Some(output) = output else {
        println!("{}", export.markdown);
        return Ok(());
    };

    let path = if output.is_dir() {
        output.join(&export.file_name)
    } else {
        output.to_path_buf()
    };
    std::fs::write(&path, &export.markdown)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    info!(?path, note_id, "Exported note");
    println!("{}", path.display());
    Ok(())
}

/// Run one clipboard change through the same path a background capture takes:
/// history, debounce, classification, then save.
fn handle_capture(mut store: JsonNoteStore, config: &Config, note_id: &str, text: &str) -> Result<()> {
    if !config.clipboard.monitoring_enabled {
        println!("Clipboard monitoring is disabled");
        return Ok(());
    }

    let mut history = load_history(&store, config)?;
    let recorded = history.record(Capture::text(text), Utc::now());
    debug!(?recorded, "Recorded clipboard capture");

    let note = store.get_note(note_id)?;
    let mut session = EditingSession::from_note(&note, config.clipboard.debounce());

    let sample = history.sample(text, Instant::now());
    let scheduled = session.on_clipboard_changed(sample);
    debug!(?scheduled, "Clipboard sample scheduled");

    let outcome = match session.next_deadline() {
        Some(deadline) => {
            std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
            session.tick(Instant::now())
        }
        None => None,
    };

    match outcome {
        Some(outcome) => {
            NoteWriter::new(&mut store).save_session(&session)?;
            println!("{:?}", outcome);
        }
        None => println!("Nothing captured"),
    }
    session.close();
    save_history(&store, &history, config)
}

fn load_history(store: &JsonNoteStore, config: &Config) -> Result<ClipboardHistory> {
    let entries = if config.clipboard.persistence_enabled {
        store.load_clipboard_history()?
    } else {
        Vec::new()
    };
    let mut history = ClipboardHistory::from_entries(entries, config.clipboard.history_settings());
    history.set_rules(config.rules.clone())?;
    if config.clipboard.persistence_enabled {
        if let Some(text) = store.load_clipboard_state()?.last_internal_copy {
            history.mark_internal_copy(&text);
        }
    }
    Ok(history)
}

fn save_history(store: &JsonNoteStore, history: &ClipboardHistory, config: &Config) -> Result<()> {
    if config.clipboard.persistence_enabled {
        store.save_clipboard_history(history.entries())?;
        store.save_clipboard_state(&ClipboardState {
            last_internal_copy: history.last_internal_copy().map(str::to_string),
        })
    } else {
        warn!("Clipboard persistence disabled, history not saved");
        Ok(())
    }
}

fn handle_history(
    store: &JsonNoteStore,
    mut config: Config,
    config_path: &Path,
    action: HistoryAction,
) -> Result<()> {
    let mut history = load_history(store, &config)?;

    match action {
        HistoryAction::List => {
            for entry in history.entries() {
                let pin = if entry.pinned { "*" } else { " " };
                let tags = if entry.tags.is_empty() {
                    String::new()
                } else {
                    format!("  #{}", entry.tags.join(" #"))
                };
                println!(
                    "{} {}\t{}{}",
                    pin,
                    entry.id,
                    util::text::preview_line(&entry.text, PREVIEW_CHARS),
                    tags
                );
            }
            return Ok(());
        }
        HistoryAction::Add { text, app } => {
            let capture = Capture {
                source_app: app,
                ..Capture::text(text_or_stdin(text)?)
            };
            match history.record(capture, Utc::now()) {
                RecordOutcome::Added(id) => println!("Added {}", id),
                RecordOutcome::Deduplicated(id) => println!("Already captured as {}", id),
                RecordOutcome::Merged(id) => println!("Merged into {}", id),
                RecordOutcome::Ignored(reason) => println!("Ignored ({:?})", reason),
            }
        }
        HistoryAction::Pin { id } => history.pin(&id, true)?,
        HistoryAction::Unpin { id } => history.pin(&id, false)?,
        HistoryAction::Delete { id } => history.delete(&id)?,
        HistoryAction::Restore { id } => {
            let text = history.restore(&id)?;
            print!("{}", text);
        }
        HistoryAction::Clear { keep_pinned } => {
            let removed = history.clear(keep_pinned);
            println!("Removed {} entries", removed);
        }
        HistoryAction::Limit { limit } => match limit {
            Some(limit) => {
                history.set_limit(limit);
                config.clipboard.history_limit = limit;
                config.save(config_path)?;
                info!(limit, ?config_path, "History limit saved to config");
            }
            None => {
                println!("{}", history.limit());
                return Ok(());
            }
        },
        HistoryAction::Settings {
            monitoring,
            persistence,
            min_length,
            dedup_window,
        } => {
            let changed = monitoring.is_some()
                || persistence.is_some()
                || min_length.is_some()
                || dedup_window.is_some();
            if let Some(enabled) = monitoring {
                config.clipboard.monitoring_enabled = enabled;
            }
            if let Some(enabled) = persistence {
                config.clipboard.persistence_enabled = enabled;
            }
            if let Some(min) = min_length {
                history.set_min_text_length(min);
                config.clipboard.min_text_length = min;
            }
            if let Some(minutes) = dedup_window {
                history.set_dedup_window_minutes(minutes);
                config.clipboard.dedup_window_minutes = minutes;
            }
            print!("{}", toml::to_string_pretty(&config.clipboard)?);
            if !changed {
                return Ok(());
            }
            config.save(config_path)?;
            info!(?config_path, "Clipboard settings saved to config");
        }
        HistoryAction::Rules { json } => {
            let Some(json) = json else {
                println!("{}", history.rules_json()?);
                return Ok(());
            };
            history.set_rules_json(&json)?;
            config.rules = history.rules();
            config.save(config_path)?;
            info!(count = config.rules.len(), "Capture rules saved to config");
            return Ok(());
        }
    }

    save_history(store, &history, &config)
}

#[cfg(test)]
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
