pub mod types;

use cadence_loop::{InputState, Key, MouseButton};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub use types::CadenceWindowEvent;

pub fn translate_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Space => Key::Space,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyY => Key::Y,
        _ => return None,
    })
}

pub fn translate_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn translate_window_event(event: &WindowEvent) -> Option<CadenceWindowEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            let key = translate_key(code)?;
            match event.state {
                ElementState::Pressed => Some(CadenceWindowEvent::KeyPressed(key)),
                ElementState::Released => Some(CadenceWindowEvent::KeyReleased(key)),
            }
        }
        WindowEvent::CursorMoved { position, .. } => Some(CadenceWindowEvent::CursorMoved {
            position: [position.x as f32, position.y as f32],
        }),
        WindowEvent::MouseInput { state, button, .. } => {
            let button = translate_button(*button)?;
            match state {
                ElementState::Pressed => Some(CadenceWindowEvent::MousePressed(button)),
                ElementState::Released => Some(CadenceWindowEvent::MouseReleased(button)),
            }
        }
        WindowEvent::CloseRequested => Some(CadenceWindowEvent::CloseRequested),
        _ => None,
    }
}

/// Fold one translated event into the frame's input state.
pub fn apply(event: CadenceWindowEvent, input: &mut InputState) {
    match event {
        CadenceWindowEvent::KeyPressed(key) => input.key_down(key),
        CadenceWindowEvent::KeyReleased(key) => input.key_up(key),
        CadenceWindowEvent::CursorMoved { position } => input.set_mouse_position(position),
        CadenceWindowEvent::MousePressed(button) => input.mouse_button_down(button),
        CadenceWindowEvent::MouseReleased(button) => input.mouse_button_up(button),
        CadenceWindowEvent::CloseRequested => input.request_close(),
    }
}
