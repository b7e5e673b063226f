//! Terminal events folded into one input snapshot per frame.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::geom::Point;
use crate::render::Viewport;

/// Everything the game needs to know about input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Pointer in world coordinates.
    pub pointer: Point,
    /// Primary button (or flap key) is down this frame.
    pub pressed: bool,
    /// Mouse button only; the restart button ignores the keyboard.
    pub pointer_pressed: bool,
    /// A press started this frame.
    pub activated: bool,
    /// The restart key was hit.
    pub restart: bool,
    pub quit: bool,
}

/// Accumulates events between frames.
///
/// Terminals report key presses but not releases, so a flap key counts as
/// held for exactly the frame it arrived in. The mouse reports both.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Point,
    mouse_down: bool,
    /// Mouse went down at least once since the last frame.
    clicked: bool,
    pulse: bool,
    activated: bool,
    restart: bool,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &Event, viewport: &Viewport) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, viewport),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                self.pulse = true;
                self.activated = true;
            }
            KeyCode::Char('r') => self.restart = true,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, viewport: &Viewport) {
        self.pointer = viewport.cell_to_world(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.mouse_down = true;
                self.clicked = true;
                self.pulse = true;
                self.activated = true;
            }
            MouseEventKind::Up(MouseButton::Left) => self.mouse_down = false,
            MouseEventKind::Drag(MouseButton::Left) => self.mouse_down = true,
            _ => {}
        }
    }

    /// Snapshot for this tick and reset the one-frame flags.
    pub fn frame(&mut self) -> FrameInput {
        let snapshot = FrameInput {
            pointer: self.pointer,
            pressed: self.mouse_down || self.pulse,
            pointer_pressed: self.mouse_down || self.clicked,
            activated: self.activated,
            restart: self.restart,
            quit: self.quit,
        };
        self.pulse = false;
        self.clicked = false;
        self.activated = false;
        self.restart = false;
        snapshot
    }
}
