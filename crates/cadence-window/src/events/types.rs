use cadence_loop::{Key, MouseButton};

/// Window events the input layer cares about, decoupled from winit types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CadenceWindowEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    CursorMoved { position: [f32; 2] },
    MousePressed(MouseButton),
    MouseReleased(MouseButton),
    CloseRequested,
}
