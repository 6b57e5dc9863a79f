//! Polled keyboard, mouse and window-close input.
//!
//! An [`InputSource`] feeds raw transitions into an [`InputState`] once per
//! frame; the state keeps edge information (pressed / released this frame)
//! alongside the held set, which is what frame-based update code queries.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Keys the demos react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Space,
    Enter,
    Escape,
    Left,
    Right,
    N,
    P,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input as seen by one frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_position: [f32; 2],
    close_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop per-frame edges; held keys and the cursor position carry over.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.close_requested = false;
    }

    /// Record a key going down. Auto-repeat of a held key is not a new press.
    pub fn key_down(&mut self, key: Key) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    pub fn mouse_button_down(&mut self, button: MouseButton) {
        if self.buttons_down.insert(button) {
            self.buttons_pressed.insert(button);
        }
    }

    pub fn mouse_button_up(&mut self, button: MouseButton) {
        if self.buttons_down.remove(&button) {
            self.buttons_released.insert(button);
        }
    }

    pub fn set_mouse_position(&mut self, position: [f32; 2]) {
        self.mouse_position = position;
    }

    /// Record the platform's close signal (window close button) for this frame.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> [f32; 2] {
        self.mouse_position
    }

    /// Whether the platform asked the window to close during this frame.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

/// Backend that delivers input once per frame.
pub trait InputSource {
    /// Apply every input transition that arrived since the previous poll.
    fn poll(&mut self, input: &mut InputState) -> anyhow::Result<()>;
}

/// One scripted input transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
    MouseMove { position: [f32; 2] },
    MouseDown { button: MouseButton },
    MouseUp { button: MouseButton },
    Close,
}

/// Headless input source replaying events at fixed frame indices.
///
/// Frame indices count polls, starting at 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: BTreeMap<u64, Vec<InputEvent>>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` for delivery on poll number `frame`.
    pub fn at(mut self, frame: u64, event: InputEvent) -> Self {
        self.events.entry(frame).or_default().push(event);
        self
    }

    /// Press `key` on `frame` and release it on the following frame.
    pub fn tap(self, frame: u64, key: Key) -> Self {
        self.at(frame, InputEvent::KeyDown { key })
            .at(frame + 1, InputEvent::KeyUp { key })
    }

    pub fn click(self, frame: u64, button: MouseButton) -> Self {
        self.at(frame, InputEvent::MouseDown { button })
            .at(frame + 1, InputEvent::MouseUp { button })
    }

    /// Deliver the platform close signal on `frame`.
    pub fn close_at(self, frame: u64) -> Self {
        self.at(frame, InputEvent::Close)
    }

    /// Number of polls served so far.
    pub fn frames_polled(&self) -> u64 {
        self.frame
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, input: &mut InputState) -> anyhow::Result<()> {
        if let Some(events) = self.events.remove(&self.frame) {
            for event in events {
                match event {
                    InputEvent::KeyDown { key } => input.key_down(key),
                    InputEvent::KeyUp { key } => input.key_up(key),
                    InputEvent::MouseMove { position } => input.set_mouse_position(position),
                    InputEvent::MouseDown { button } => input.mouse_button_down(button),
                    InputEvent::MouseUp { button } => input.mouse_button_up(button),
                    InputEvent::Close => input.request_close(),
                }
            }
        }
        self.frame += 1;
        Ok(())
    }
}
