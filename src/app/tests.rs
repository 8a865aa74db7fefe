use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tempfile::tempdir;

use crate::clipboard::ClipboardSink;
use crate::session::store::{LAST_FILE_KEY, LAST_INDEX_KEY, TEMPLATE_KEY};
use crate::session::{MemoryStore, SessionStore};
use crate::source::{RestoreTask, SourceError, SourceFetcher};

use super::{App, InputMode, Message, Model, ToastLevel, update};

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Rc<RefCell<Vec<String>>>,
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> std::io::Result<()> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Blocks each fetch until the test releases it.
struct GatedFetcher {
    gate: Mutex<Receiver<()>>,
    text: String,
}

impl GatedFetcher {
    fn new(text: &str) -> (Arc<Self>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let fetcher = Arc::new(Self {
            gate: Mutex::new(rx),
            text: text.to_string(),
        });
        (fetcher, tx)
    }
}

impl SourceFetcher for GatedFetcher {
    fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let gate = self.gate.lock().map_err(|_| SourceError::Interrupted {
            path: path.to_string(),
        })?;
        let _ = gate.recv();
        Ok(self.text.clone())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn loaded_model(text: &str) -> Model {
    update(
        Model::default(),
        Message::FileLoaded {
            path: "list.txt".to_string(),
            text: text.to_string(),
        },
    )
}

fn type_into(mut model: Model, text: &str) -> Model {
    for c in text.chars() {
        model = update(model, Message::PromptInput(c));
    }
    model
}

fn test_app(store: MemoryStore) -> (App, Rc<RefCell<Vec<String>>>) {
    let clipboard = RecordingClipboard::default();
    let copied = clipboard.copied.clone();
    let app = App::new()
        .with_store(Box::new(store), None)
        .with_clipboard(Box::new(clipboard));
    (app, copied)
}

fn wait_for_restore(app: &mut App, model: &mut Model, restore: &mut Option<RestoreTask>) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if app.poll_restore(model, restore) {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("restore did not resolve within 5 seconds");
}

#[test]
fn test_next_and_previous_move_cursor() {
    let model = loaded_model("a\nb\nc");
    let model = update(model, Message::NextLine);
    assert_eq!(model.session.current_line(), Some("b"));
    let model = update(model, Message::PrevLine);
    assert_eq!(model.session.current_line(), Some("a"));
}

#[test]
fn test_last_line_jumps_to_end() {
    let model = update(loaded_model("a\nb\nc"), Message::LastLine);
    assert_eq!(model.session.cursor(), 2);
    let model = update(model, Message::FirstLine);
    assert_eq!(model.session.cursor(), 0);
}

#[test]
fn test_goto_prompt_moves_and_closes_on_valid_index() {
    let model = update(loaded_model("a\nb\nc"), Message::StartGoTo);
    assert_eq!(model.mode, InputMode::GoTo);
    let model = type_into(model, "2");
    let model = update(model, Message::PromptSubmit);
    assert_eq!(model.session.current_line(), Some("c"));
    assert_eq!(model.mode, InputMode::Normal);
    assert!(model.prompt_input.is_empty());
    assert!(model.alert.is_none());
}

#[test]
fn test_goto_prompt_rejects_out_of_range_and_stays_open() {
    let model = update(update(loaded_model("a\nb\nc"), Message::NextLine), Message::StartGoTo);
    let model = type_into(model, "5");
    let model = update(model, Message::PromptSubmit);
    assert_eq!(model.session.cursor(), 1);
    assert_eq!(model.mode, InputMode::GoTo);
    assert_eq!(model.prompt_input, "5");
    assert!(
        model
            .alert
            .as_deref()
            .is_some_and(|a| a.contains("Invalid index 5")),
        "alert should name the rejected index: {:?}",
        model.alert
    );

    let model = update(model, Message::DismissAlert);
    assert!(model.alert.is_none());
    assert_eq!(model.mode, InputMode::GoTo);
}

#[test]
fn test_goto_prompt_rejects_non_numeric_input() {
    let model = type_into(update(loaded_model("a\nb"), Message::StartGoTo), "abc");
    let model = update(model, Message::PromptSubmit);
    assert!(model.alert.is_some());
    assert_eq!(model.session.cursor(), 0);
}

#[test]
fn test_goto_prompt_cancel_discards_input() {
    let model = type_into(update(loaded_model("a\nb"), Message::StartGoTo), "1");
    let model = update(model, Message::PromptCancel);
    assert_eq!(model.mode, InputMode::Normal);
    assert_eq!(model.session.cursor(), 0);
}

#[test]
fn test_goto_prompt_does_not_open_without_document() {
    let model = update(Model::default(), Message::StartGoTo);
    assert_eq!(model.mode, InputMode::Normal);
}

#[test]
fn test_template_editing_updates_link() {
    let model = update(loaded_model("rust"), Message::StartTemplateEdit);
    let model = update(model, Message::TemplateClear);
    let mut model = model;
    for c in "q=[[my-data]]".chars() {
        model = update(model, Message::TemplateInput(c));
    }
    assert_eq!(model.session.generated_link().as_deref(), Some("q=rust"));
    let model = update(model, Message::TemplateBackspace);
    assert_eq!(model.session.template(), "q=[[my-data]");
    assert_eq!(model.session.generated_link().as_deref(), Some("q=[[my-data]"));
    let model = update(model, Message::FinishTemplateEdit);
    assert_eq!(model.mode, InputMode::Normal);
}

#[test]
fn test_open_prompt_queues_path() {
    let model = type_into(update(Model::default(), Message::StartOpen), " notes.txt ");
    let model = update(model, Message::PromptSubmit);
    assert_eq!(
        model.pending_open.as_deref(),
        Some(std::path::Path::new("notes.txt"))
    );
    assert_eq!(model.mode, InputMode::Normal);
}

#[test]
fn test_toggle_help_changes_visibility() {
    let model = Model::default();
    assert!(!model.help_visible);
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_sets_should_quit() {
    let model = update(Model::default(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_keys_are_disabled_at_boundaries() {
    let model = loaded_model("a\nb");
    assert_eq!(App::handle_key(key(KeyCode::Left), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Right), &model),
        Some(Message::NextLine)
    );
    let model = update(model, Message::NextLine);
    assert_eq!(App::handle_key(key(KeyCode::Right), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Left), &model),
        Some(Message::PrevLine)
    );
}

#[test]
fn test_keys_without_document_are_inert() {
    let model = Model::default();
    for code in [KeyCode::Right, KeyCode::Left, KeyCode::Char('c'), KeyCode::Char('g')] {
        assert_eq!(App::handle_key(key(code), &model), None, "{code:?}");
    }
    assert_eq!(
        App::handle_key(key(KeyCode::Char('f')), &model),
        Some(Message::StartOpen)
    );
}

#[test]
fn test_any_key_dismisses_alert() {
    let mut model = loaded_model("a");
    model.alert = Some("Invalid index".to_string());
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x')), &model),
        Some(Message::DismissAlert)
    );
}

#[test]
fn test_prompt_captures_typed_characters() {
    let model = update(loaded_model("a\nb"), Message::StartGoTo);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::PromptInput('q'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::PromptSubmit)
    );
}

#[test]
fn test_open_link_key_disabled_when_link_is_empty() {
    let model = loaded_model("a\nb");
    assert_eq!(
        App::handle_key(key(KeyCode::Char('o')), &model),
        Some(Message::OpenLink)
    );

    let model = update(model, Message::TemplateClear);
    assert_eq!(App::handle_key(key(KeyCode::Char('o')), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Enter), &model), None);
}

#[test]
fn test_release_events_are_ignored() {
    let model = loaded_model("a\nb");
    let mut release = key(KeyCode::Right);
    release.kind = KeyEventKind::Release;
    assert_eq!(App::handle_event(&Event::Key(release), &model), None);
}

#[test]
fn test_navigation_persists_cursor() {
    let (mut app, _) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.dispatch(
        &mut model,
        Message::FileLoaded {
            path: "/data/list.txt".into(),
            text: "a\nb\nc".into(),
        },
    );
    app.dispatch(&mut model, Message::NextLine);
    app.dispatch(&mut model, Message::NextLine);

    assert_eq!(app.store().get(LAST_INDEX_KEY).as_deref(), Some("2"));
    assert_eq!(app.store().get(LAST_FILE_KEY).as_deref(), Some("/data/list.txt"));
    assert!(model.pending_effects.is_empty());
}

#[test]
fn test_template_edit_persists_template() {
    let (mut app, _) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.dispatch(&mut model, Message::StartTemplateEdit);
    app.dispatch(&mut model, Message::TemplateInput('!'));
    assert_eq!(
        app.store().get(TEMPLATE_KEY).as_deref(),
        Some("https://go.to/[[my-data]]!")
    );
}

#[test]
fn test_copy_sends_current_line_to_clipboard() {
    let (mut app, copied) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.dispatch(
        &mut model,
        Message::FileLoaded {
            path: "l.txt".into(),
            text: "first\nsecond".into(),
        },
    );
    app.dispatch(&mut model, Message::NextLine);
    app.dispatch(&mut model, Message::CopyLine);

    assert_eq!(*copied.borrow(), vec!["second".to_string()]);
    assert_eq!(
        model.active_toast(),
        Some(("Copied 6 chars from line 2", ToastLevel::Info))
    );
}

#[test]
fn test_copy_toast_counts_characters_not_bytes() {
    let (mut app, copied) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.dispatch(
        &mut model,
        Message::FileLoaded {
            path: "l.txt".into(),
            text: "héllo wörld".into(),
        },
    );
    app.dispatch(&mut model, Message::CopyLine);

    assert_eq!(*copied.borrow(), vec!["héllo wörld".to_string()]);
    assert_eq!(
        model.active_toast(),
        Some(("Copied 11 chars from line 1", ToastLevel::Info))
    );
}

#[test]
fn test_copy_without_document_does_nothing() {
    let (mut app, copied) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.dispatch(&mut model, Message::CopyLine);
    assert!(copied.borrow().is_empty());
}

#[test]
fn test_open_link_with_empty_template_launches_nothing() {
    let (mut app, _) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.dispatch(
        &mut model,
        Message::FileLoaded {
            path: "l.txt".into(),
            text: "a".into(),
        },
    );
    app.dispatch(&mut model, Message::TemplateClear);
    app.dispatch(&mut model, Message::OpenLink);

    assert_eq!(
        model.active_toast(),
        Some(("No link to open", ToastLevel::Info))
    );
}

#[test]
fn test_open_prompt_reads_file_and_persists_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "alpha\nbeta").unwrap();

    let (mut app, _) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.dispatch(&mut model, Message::StartOpen);
    for c in path.display().to_string().chars() {
        app.dispatch(&mut model, Message::PromptInput(c));
    }
    app.dispatch(&mut model, Message::PromptSubmit);

    assert_eq!(model.session.current_line(), Some("alpha"));
    let canonical = path.canonicalize().unwrap().display().to_string();
    assert_eq!(app.store().get(LAST_FILE_KEY), Some(canonical));
    assert!(
        model
            .active_toast()
            .is_some_and(|(msg, _)| msg.contains("2 line(s) from words.txt"))
    );
}

#[test]
fn test_open_missing_file_shows_error_toast() {
    let dir = tempdir().unwrap();
    let (mut app, _) = test_app(MemoryStore::new());
    let mut model = Model::default();
    app.open_file(&mut model, &dir.path().join("missing.txt"));

    assert!(!model.session.has_document());
    assert!(matches!(model.active_toast(), Some((_, ToastLevel::Error))));
    assert_eq!(app.store().get(LAST_FILE_KEY), None);
}

#[test]
fn test_start_session_restores_file_and_cursor() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.txt");
    std::fs::write(&path, "a\nb\nc\nd").unwrap();

    let mut store = MemoryStore::new();
    store.set(LAST_FILE_KEY, &path.display().to_string()).unwrap();
    store.set(LAST_INDEX_KEY, "2").unwrap();
    let (mut app, _) = test_app(store);

    let (mut model, mut restore) = app.start_session();
    assert!(restore.is_some());
    assert!(model.session.pending_restore().is_some());
    assert_eq!(model.session.current_line(), None);

    wait_for_restore(&mut app, &mut model, &mut restore);
    assert_eq!(model.session.current_line(), Some("c"));
    assert!(model.session.pending_restore().is_none());
    assert!(restore.is_none());
}

#[test]
fn test_start_session_forgets_missing_file() {
    let dir = tempdir().unwrap();
    let mut store = MemoryStore::new();
    store
        .set(LAST_FILE_KEY, &dir.path().join("deleted.txt").display().to_string())
        .unwrap();
    store.set(LAST_INDEX_KEY, "3").unwrap();
    let (mut app, _) = test_app(store);

    let (mut model, mut restore) = app.start_session();
    wait_for_restore(&mut app, &mut model, &mut restore);

    assert!(!model.session.has_document());
    assert!(model.alert.is_none(), "restore failures are not surfaced");
    assert_eq!(app.store().get(LAST_FILE_KEY), None);

    // Next startup does not retry
    let (_, restore) = app.start_session();
    assert!(restore.is_none());
}

#[test]
fn test_start_session_with_file_skips_restore() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("given.txt");
    std::fs::write(&path, "x\ny").unwrap();

    let mut store = MemoryStore::new();
    store.set(LAST_FILE_KEY, "elsewhere.txt").unwrap();
    store.set(LAST_INDEX_KEY, "1").unwrap();
    let (app, _) = test_app(store);
    let mut app = app.with_file(Some(path));

    let (model, restore) = app.start_session();
    assert!(restore.is_none());
    assert_eq!(model.session.current_line(), Some("x"));
}

#[test]
fn test_start_session_respects_disabled_restore() {
    let mut store = MemoryStore::new();
    store.set(LAST_FILE_KEY, "list.txt").unwrap();
    let (app, _) = test_app(store);
    let mut app = app.with_restore(false);

    let (model, restore) = app.start_session();
    assert!(restore.is_none());
    assert!(model.session.pending_restore().is_none());
}

#[test]
fn test_upload_during_restore_wins() {
    let dir = tempdir().unwrap();
    let uploaded = dir.path().join("new.txt");
    std::fs::write(&uploaded, "fresh").unwrap();

    let mut store = MemoryStore::new();
    store.set(LAST_FILE_KEY, "old.txt").unwrap();
    let (fetcher, release) = GatedFetcher::new("stale\nlines");
    let (app, _) = test_app(store);
    let mut app = app.with_fetcher(fetcher);

    let (mut model, mut restore) = app.start_session();
    app.open_file(&mut model, &uploaded);
    assert_eq!(model.session.current_line(), Some("fresh"));

    release.send(()).unwrap();
    wait_for_restore(&mut app, &mut model, &mut restore);

    assert_eq!(model.session.current_line(), Some("fresh"));
    let expected = uploaded.canonicalize().unwrap().display().to_string();
    assert_eq!(app.store().get(LAST_FILE_KEY), Some(expected));
}
