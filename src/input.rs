//! Keyboard handling.
//!
//! winit delivers key presses as events, but the frame loop wants to ask "is
//! this key down right now?" once per frame. [`KeyboardState`] folds the
//! events into a pressed-key set and [`Session::process_input`] level-checks it
//! at the start of every frame:
//!
//! - `Escape` requests the window to close
//! - `1` switches to the textured view
//! - `2` switches to the mip level visualization
//! - `Space` captures a screenshot (see [`ScreenshotTrigger`])

use std::collections::HashSet;

use winit::{event::ElementState, keyboard::KeyCode};

use crate::render::RenderMode;

/// When a held `Space` key produces screenshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScreenshotTrigger {
    /// Capture on every frame the key is held down.
    Level,
    /// Capture once per key press.
    #[default]
    Edge,
}

/// Keys currently held down, plus the ones that went down since the last frame.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    went_down: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single key event into the state. OS key repeats are ignored.
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => self.press(code),
            ElementState::Released => self.release(code),
        }
    }

    pub fn press(&mut self, code: KeyCode) {
        if self.held.insert(code) {
            self.went_down.insert(code);
        }
    }

    pub fn release(&mut self, code: KeyCode) {
        self.held.remove(&code);
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// True if `code` was pressed since the last [`end_frame`](Self::end_frame),
    /// even when it has been released again in the meantime.
    pub fn went_down(&self, code: KeyCode) -> bool {
        self.went_down.contains(&code)
    }

    pub fn end_frame(&mut self) {
        self.went_down.clear();
    }

    /// Forget every held key. Releases that happen while the window is
    /// unfocused are never delivered, so this runs when focus is lost.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

/// The state the input step mutates and the draw step reads.
#[derive(Debug)]
pub struct Session {
    mode: RenderMode,
    close_requested: bool,
    trigger: ScreenshotTrigger,
}

impl Session {
    pub fn new(trigger: ScreenshotTrigger) -> Self {
        Self {
            mode: RenderMode::default(),
            close_requested: false,
            trigger,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Checked at the top of every frame; once set, no further frame is drawn.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Apply this frame's key state. Returns whether a screenshot should be
    /// captured this frame.
    ///
    /// With `1` and `2` held at the same time the mip level view wins, since
    /// `2` is checked last.
    pub fn process_input(&mut self, keys: &KeyboardState) -> bool {
        if keys.is_down(KeyCode::Escape) {
            self.request_close();
        }
        if keys.is_down(KeyCode::Digit1) {
            self.mode = RenderMode::Textured;
        }
        if keys.is_down(KeyCode::Digit2) {
            self.mode = RenderMode::MipLevels;
        }
        match self.trigger {
            ScreenshotTrigger::Level => keys.is_down(KeyCode::Space),
            ScreenshotTrigger::Edge => keys.went_down(KeyCode::Space),
        }
    }
}

impl Session {
    /// Start a loop iteration: stop if a close was requested during the
    /// previous one, otherwise apply the keys and reset their edges.
    ///
    /// Returns `None` when the loop ends and no frame may be drawn, else
    /// whether this frame should be captured.
    pub fn begin_frame(&mut self, keys: &mut KeyboardState) -> Option<bool> {
        if self.should_close() {
            return None;
        }
        let capture = self.process_input(keys);
        keys.end_frame();
        Some(capture)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ScreenshotTrigger::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_frame_keeps_held_keys() {
        let mut keys = KeyboardState::new();
        keys.press(KeyCode::Digit1);
        keys.end_frame();
        assert!(keys.is_down(KeyCode::Digit1));
        assert!(!keys.went_down(KeyCode::Digit1));
    }

    #[test]
    fn release_all_unsticks_keys_but_keeps_taps() {
        let mut keys = KeyboardState::new();
        keys.press(KeyCode::Space);
        keys.release_all();
        assert!(!keys.is_down(KeyCode::Space));
        assert!(keys.went_down(KeyCode::Space));
    }

    #[test]
    fn escape_does_not_change_mode() {
        let mut session = Session::new(ScreenshotTrigger::Level);
        session.set_mode(RenderMode::MipLevels);
        let mut keys = KeyboardState::new();
        keys.press(KeyCode::Escape);
        assert!(!session.process_input(&keys));
        assert!(session.should_close());
        assert_eq!(session.mode(), RenderMode::MipLevels);
    }
}
