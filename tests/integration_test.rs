// Integration tests for contacts-manager

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use contacts_manager::app::update::handle_key;
use contacts_manager::app::{
    AppState, CURRENT_PHOTO, EMPTY_SEARCH, EditorField, InputMode, Keymap, ModalState, Theme,
};
use contacts_manager::directory::{ContactDirectory, DirectoryEvent, GroupKey};
use contacts_manager::launcher::Launcher;
use contacts_manager::source::{JsonFileSource, SampleContacts, seed_directory};
use contacts_manager::ui::key_hints;

fn temp_path(name: &str) -> PathBuf {
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("contacts_{}_{}_{}", std::process::id(), nonce, name))
}

fn press(app: &mut AppState, code: KeyCode) -> bool {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn sample_app() -> AppState {
    let outcome = seed_directory(&SampleContacts);
    AppState::with_directory(outcome.directory, Theme::dark(), Keymap::default())
}

fn visible_labels(app: &AppState) -> Vec<String> {
    app.view()
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|c| c.row_label()))
        .collect()
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    let path = temp_path("theme.conf");
    let t = Theme::mocha();
    t.write_file(&path).expect("write theme");
    let t2 = Theme::from_file(&path).expect("read theme");
    assert_eq!(format!("{:?}", t.text), format!("{:?}", t2.text));
    assert_eq!(format!("{:?}", t.section), format!("{:?}", t2.section));
    assert_eq!(format!("{:?}", t.highlight_bg), format!("{:?}", t2.highlight_bg));

    // load_or_init creates the file, nested directories included
    let dir = temp_path("cfg");
    let nested = dir.join("theme.conf");
    let _created = Theme::load_or_init(&nested);
    assert!(nested.exists());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_dir_all(&dir);
}

// 2) Keybinding overrides survive a write/read cycle
#[test]
fn keybinds_override_and_roundtrip() {
    let path = temp_path("keybinds.conf");
    std::fs::write(&path, "# custom\nNewContact = Ctrl+n\nx = Quit\nbogus line\n").unwrap();
    let km = Keymap::from_file(&path).expect("read keybinds");
    let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
    assert_eq!(km.resolve(&ctrl_n), Some(contacts_manager::app::KeyAction::NewContact));
    let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    assert_eq!(km.resolve(&x), Some(contacts_manager::app::KeyAction::Quit));

    km.write_file(&path).expect("write keybinds");
    let again = Keymap::from_file(&path).expect("reread keybinds");
    assert_eq!(again.resolve(&ctrl_n), Some(contacts_manager::app::KeyAction::NewContact));
    let _ = std::fs::remove_file(&path);
}

// 3) Seeding from a JSON file feeds the sectioned view
#[test]
fn json_seed_builds_sections() {
    let path = temp_path("seed.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "1", "firstName": "Ahmed", "lastName": "Fathi",
             "mobile": "0112345678", "email": "ahmedfathi680@gmail.com"},
            {"id": "2", "firstName": "Radwa", "lastName": "Ahmed", "mobile": "0112233445"},
            {"id": "3", "mobile": "0100000000", "isOwnContact": true}
        ]"#,
    )
    .unwrap();
    let cfg = temp_path("seedcfg");
    let app = AppState::new(&JsonFileSource::new(&path), &cfg, Launcher::default());
    assert!(app.load_error.is_none());
    let view = app.view();
    assert_eq!(view.section_titles(), vec!["A", "R", "#"]);
    assert_eq!(view.get(GroupKey::Other).unwrap()[0].row_label(), "0100000000");
    assert!(cfg.join("theme.conf").exists());
    assert!(cfg.join("keybinds.conf").exists());
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_dir_all(&cfg);
}

// 4) A missing seed file starts empty and explains why
#[test]
fn missing_seed_shows_error_in_empty_state() {
    let cfg = temp_path("emptycfg");
    let app = AppState::new(
        &JsonFileSource::new(temp_path("missing.json")),
        &cfg,
        Launcher::default(),
    );
    assert!(app.directory.is_empty());
    assert!(app.view().is_empty());
    let msg = app.empty_message();
    assert!(msg.starts_with("No contacts."));
    assert!(msg.contains("unavailable"));
    let _ = std::fs::remove_dir_all(&cfg);
}

// 5) The reference scenario: seed, search, overwrite, delete
#[test]
fn directory_scenario_end_to_end() {
    let mut dir = seed_directory(&SampleContacts).directory;
    let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&events);
    dir.subscribe(move |e: &DirectoryEvent| sink.borrow_mut().push(e.clone()));

    let view = dir.display_view("", false);
    assert_eq!(view.section_titles(), vec!["A", "R"]);

    let found = dir.display_view("ahmed", true);
    assert_eq!(found.total_rows(), 2);
    let found = dir.display_view("0112233", true);
    assert_eq!(found.section_titles(), vec!["R"]);

    let ahmed = dir
        .sorted_contacts()
        .into_iter()
        .find(|c| c.row_label() == "Ahmed Fathi")
        .unwrap();
    let radwa = dir
        .sorted_contacts()
        .into_iter()
        .find(|c| c.row_label() == "Radwa Ahmed")
        .unwrap();
    let mut renamed = ahmed.clone();
    renamed.last_name = Some("Hassan".into());
    dir.upsert(renamed);
    dir.remove(&radwa);

    let view = dir.display_view("", false);
    assert_eq!(view.section_titles(), vec!["A"]);
    assert_eq!(view.get(GroupKey::Letter('A')).unwrap()[0].row_label(), "Ahmed Hassan");
    assert_eq!(events.borrow().len(), 2);
    assert!(ContactDirectory::new().display_view("", false).is_empty());
}

// 6) Keyboard flow: search, create, edit, delete
#[test]
fn keyboard_flow_create_edit_delete() {
    let mut app = sample_app();

    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode, InputMode::Search);
    type_text(&mut app, "zzz");
    assert!(app.view().is_empty());
    assert_eq!(app.empty_message(), EMPTY_SEARCH);
    press(&mut app, KeyCode::Esc);
    assert_eq!(visible_labels(&app), vec!["Ahmed Fathi", "Radwa Ahmed"]);

    press(&mut app, KeyCode::Char('n'));
    assert!(matches!(app.modal, Some(ModalState::Editor(_))));
    // nothing typed yet: Enter must not save
    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.modal, Some(ModalState::Editor(_))));
    type_text(&mut app, "Mona");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Zaki");
    press(&mut app, KeyCode::Enter);
    assert!(app.modal.is_none());
    assert_eq!(app.directory.len(), 3);
    assert_eq!(app.selected_contact().unwrap().row_label(), "Mona Zaki");

    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::Tab);
    for _ in 0..4 {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "Adel");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.directory.len(), 3);
    assert_eq!(app.selected_contact().unwrap().row_label(), "Mona Adel");

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.directory.len(), 2);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.status.as_deref().unwrap_or("").starts_with("Deleted"));

    assert!(!press(&mut app, KeyCode::Char('q')));
}

// 7) Index strip jump with Shift+letter
#[test]
fn shift_letter_jumps_to_section() {
    let mut app = sample_app();
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
    assert_eq!(app.selected_contact().unwrap().row_label(), "Radwa Ahmed");
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('#'), KeyModifiers::SHIFT));
    assert_eq!(app.selected_contact().unwrap().row_label(), "Radwa Ahmed");
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
    assert_eq!(app.selected, 0);
}

// 8) Photos are attached from a file path in the editor
#[test]
fn editor_attaches_and_clears_photo() {
    let photo_path = temp_path("photo.png");
    std::fs::write(&photo_path, [0x89u8, b'P', b'N', b'G']).unwrap();
    let mut app = sample_app();

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Mona");
    for _ in 0..5 {
        press(&mut app, KeyCode::Tab);
    }
    match &app.modal {
        Some(ModalState::Editor(ed)) => assert_eq!(ed.focus, EditorField::Photo),
        other => panic!("unexpected modal {other:?}"),
    }
    type_text(&mut app, &photo_path.display().to_string());
    press(&mut app, KeyCode::Enter);
    assert!(app.modal.is_none());
    let saved = app.selected_contact().unwrap();
    assert_eq!(saved.row_label(), "Mona");
    assert_eq!(saved.photo.as_ref().map(|p| p.len()), Some(4));

    // editing keeps the photo until the field is cleared
    press(&mut app, KeyCode::Char('e'));
    match &app.modal {
        Some(ModalState::Editor(ed)) => assert_eq!(ed.value(EditorField::Photo), CURRENT_PHOTO),
        other => panic!("unexpected modal {other:?}"),
    }
    press(&mut app, KeyCode::Enter);
    assert!(app.selected_contact().unwrap().photo.is_some());

    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selected_contact().unwrap().photo, None);
    let _ = std::fs::remove_file(&photo_path);
}

// 9) An unreadable photo keeps the editor open and reports why
#[test]
fn unreadable_photo_is_reported_in_status() {
    let mut app = sample_app();
    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Mona");
    press(&mut app, KeyCode::BackTab);
    type_text(&mut app, "/definitely/not/here.png");
    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.modal, Some(ModalState::Editor(_))));
    assert_eq!(app.directory.len(), 2);
    let status = app.status.clone().unwrap_or_default();
    assert!(status.contains("cannot read photo"), "{status}");
}

// 10) The header hints follow keybinds.conf
#[test]
fn header_hints_follow_keymap() {
    let mut app = sample_app();
    assert_eq!(
        key_hints(&app),
        "/: search; n: new; e: edit; d: delete; ?: help; q: quit"
    );

    let path = temp_path("hints.conf");
    std::fs::write(&path, "n = Quit\nNewContact = a\n").unwrap();
    app.keymap = Keymap::from_file(&path).expect("read keybinds");
    let hints = key_hints(&app);
    assert!(hints.contains("a: new"), "{hints}");
    assert!(hints.contains("n: quit"), "{hints}");
    let _ = std::fs::remove_file(&path);
}
