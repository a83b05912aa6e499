//! Render the routed screens into a test backend and check what a user sees.

mod common;

use common::{chars, ctrl, key, settle_router, TestEnv};
use crossterm::event::KeyCode;
use esteem::app::Router;
use esteem::config::Config;
use esteem::ui::Screen as ScreenId;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const WIDTH: u16 = 90;
const HEIGHT: u16 = 32;

fn screen_text(router: &mut Router, config: &Config) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal
        .draw(|frame| router.render(frame, frame.area(), config).unwrap())
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..HEIGHT)
        .map(|y| {
            (0..WIDTH)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_login_screen_shows_sign_in_tab() {
    let env = TestEnv::new();
    let mut router = env.router();

    let text = screen_text(&mut router, &env.config);
    assert!(text.contains("To get all the benefits using eSteem"));
    assert!(text.contains("Sign Up"));
    assert!(text.contains("Username"));
    assert!(text.contains("Password or WIF"));
    assert!(text.contains("LOGIN"));
    assert!(text.contains("kept locally on the device"));
}

#[tokio::test]
async fn test_password_is_masked() {
    let env = TestEnv::new();
    let ctx = env.ctx();
    let mut router = env.router();

    router.handle_event(key(KeyCode::Tab), &ctx).unwrap();
    for event in chars("hunter2") {
        router.handle_event(event, &ctx).unwrap();
    }
    let text = screen_text(&mut router, &env.config);
    assert!(!text.contains("hunter2"));
}

#[tokio::test]
async fn test_steemconnect_tab_shows_its_note() {
    let env = TestEnv::new();
    let ctx = env.ctx();
    let mut router = env.router();

    router.handle_event(ctrl('t'), &ctx).unwrap();
    let text = screen_text(&mut router, &env.config);
    assert!(text.contains("steemconnect"));
    assert!(!text.contains("Password or WIF"));
}

#[tokio::test]
async fn test_steemconnect_screen_shows_route_title_and_url() {
    let env = TestEnv::new();
    let ctx = env.ctx();
    let mut router = env.router();

    router.handle_event(ctrl('t'), &ctx).unwrap();
    router.handle_event(key(KeyCode::Enter), &ctx).unwrap();
    let text = screen_text(&mut router, &env.config);
    assert!(text.contains("Login via SC2"));
    assert!(text.contains("If the browser did not open"));
}

#[tokio::test]
async fn test_failed_login_renders_alert() {
    let env = TestEnv::new();
    let ctx = env.ctx();
    let mut router = env.router();

    for event in chars("alice") {
        router.handle_event(event, &ctx).unwrap();
    }
    router.handle_event(ctrl('g'), &ctx).unwrap();
    settle_router(&mut router, &ctx, |r| r.alert().is_some()).await;

    let text = screen_text(&mut router, &env.config);
    assert!(text.contains("Login failed"));
    assert!(text.contains("bad password"));
}

#[tokio::test]
async fn test_pin_code_screen_greets_account() {
    let env = TestEnv::new();
    let ctx = env.ctx();
    let mut router = env.router();

    for event in chars("alice") {
        router.handle_event(event, &ctx).unwrap();
    }
    router.handle_event(key(KeyCode::Tab), &ctx).unwrap();
    for event in chars("pw") {
        router.handle_event(event, &ctx).unwrap();
    }
    router.handle_event(key(KeyCode::Enter), &ctx).unwrap();
    settle_router(&mut router, &ctx, |r| r.current_screen() == Some(ScreenId::PinCode)).await;

    let text = screen_text(&mut router, &env.config);
    assert!(text.contains("Signed in as @alice"));
}
