//! Input handling for the Vitrine terminal host.
//!
//! Terminal events are read on a blocking thread and queued; the frame loop
//! drains a bounded batch per frame and translates each into an engine
//! operation.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use vitrine_engine::{App, Focus, Key, UtilityEffect, Visibility};

use crate::effects::{PX_PER_COLUMN, PX_PER_ROW};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

/// Rows moved per `j`/`k` press or wheel notch.
const SCROLL_STEP_ROWS: f32 = 3.0;

/// Labels of the call-to-action buttons the feedback keys target.
pub const DONATE_LABEL: &str = "Donate";
pub const DOWNLOAD_LABEL: &str = "Download";

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued terminal events into the app. Returns `true` when the app
/// asked to quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };
        apply_event(app, ev);
        if app.should_quit() {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Translate one terminal event.
pub fn apply_event(app: &mut App, ev: Event) {
    match ev {
        Event::Key(key) => apply_key(app, key),
        Event::Mouse(mouse) => apply_mouse(app, mouse),
        Event::FocusLost => app.set_visibility(Visibility::Hidden),
        Event::FocusGained => app.set_visibility(Visibility::Visible),
        Event::Resize(..) | Event::Paste(_) => {}
    }
}

fn apply_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    if app.focus().is_text_entry() {
        // The newsletter field swallows everything but the way out.
        if matches!(key.code, KeyCode::Esc | KeyCode::Tab) {
            app.set_focus(Focus::Body);
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Tab => app.set_focus(Focus::TextField),
        KeyCode::Esc => app.set_focus(Focus::Body),
        KeyCode::Char('a') => {
            let enabled = app.toggle_autoplay();
            debug!(enabled, "Autoplay toggled");
        }
        KeyCode::Char('m') => {
            let motion = app.toggle_reduced_motion();
            debug!(?motion, "Reduced motion toggled");
        }
        KeyCode::Char('d') => {
            let _ = app.play_effect_on(DONATE_LABEL, UtilityEffect::Bounce);
        }
        KeyCode::Char('s') => {
            let _ = app.play_effect_on(DOWNLOAD_LABEL, UtilityEffect::Shake);
        }
        KeyCode::Char('j') => app.scroll_by(SCROLL_STEP_ROWS * PX_PER_ROW),
        KeyCode::Char('k') => app.scroll_by(-SCROLL_STEP_ROWS * PX_PER_ROW),
        KeyCode::Char(c @ '1'..='9') => {
            let n = c.to_digit(10).map_or(0, |d| d as usize);
            let _ = app.go_to(n);
        }
        code => {
            app.handle_key(map_key(code));
        }
    }
}

/// Map a terminal key to the page's key vocabulary.
#[must_use]
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

fn apply_mouse(app: &mut App, mouse: MouseEvent) {
    let x = f32::from(mouse.column) * PX_PER_COLUMN;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.pointer_down(x),
        MouseEventKind::Up(MouseButton::Left) => {
            let _ = app.pointer_up(x);
        }
        MouseEventKind::ScrollDown => app.scroll_by(SCROLL_STEP_ROWS * PX_PER_ROW),
        MouseEventKind::ScrollUp => app.scroll_by(-SCROLL_STEP_ROWS * PX_PER_ROW),
        _ => {}
    }
}
