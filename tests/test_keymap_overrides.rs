//! User keymap overrides loaded from the config file drive the login screen.

mod common;

use common::{key, TestEnv};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use esteem::config::Config;
use esteem::keymap::{Action, KeymapPreset};
use esteem::ui::Screen as ScreenId;
use tempfile::TempDir;

const CONFIG: &str = r#"
[keymap]
preset = "emacs"

[[keymap.overrides]]
key = "ctrl+l"
action = "switch_tab"
"#;

fn with_mods(c: char, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), modifiers))
}

fn load(content: &str) -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    let config = Config::load_or_create(&path).unwrap();
    (dir, config)
}

#[test]
fn test_override_round_trips_through_config_file() {
    let (dir, config) = load(CONFIG);
    assert_eq!(config.keymap.preset, KeymapPreset::Emacs);
    assert_eq!(
        config.keymap.get_action(KeyCode::Char('l'), KeyModifiers::CONTROL),
        Some(Action::SwitchTab)
    );
    // the override shadows the preset's own binding for the action
    assert_eq!(config.keymap.get_action(KeyCode::Char('t'), KeyModifiers::ALT), None);

    let path = dir.path().join("saved.toml");
    config.save(&path).unwrap();
    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[tokio::test]
async fn test_overridden_key_switches_login_tab() {
    let (_dir, config) = load(CONFIG);
    let mut env = TestEnv::new();
    env.config = config;
    let ctx = env.ctx();
    let mut router = env.router();

    router.handle_event(with_mods('t', KeyModifiers::ALT), &ctx).unwrap();
    router.handle_event(key(KeyCode::Tab), &ctx).unwrap();
    assert_eq!(router.depth(), 1);

    router.handle_event(with_mods('l', KeyModifiers::CONTROL), &ctx).unwrap();
    router.handle_event(key(KeyCode::Enter), &ctx).unwrap();
    assert_eq!(router.current_screen(), Some(ScreenId::SteemConnect));
}

#[test]
fn test_footer_hints_follow_overrides() {
    let (_dir, config) = load(CONFIG);
    let hints = config.keymap.footer_hints(&[("Tab", Action::SwitchTab)]);
    assert_eq!(hints, "Tab: Ctrl+L");
}
