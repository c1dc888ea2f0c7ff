// ctsl-report - app/view.rs
//
// View State Controller for the raw-JSON view: a two-state visibility
// toggle with deterministic button labels. Owns no result data; the
// serialised text lives in PipelineOutput and is never mutated here.

use crate::util::constants::{HIDE_RAW_LABEL, SHOW_RAW_LABEL};

/// Raw-view visibility state. Starts hidden on every new result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawViewState {
    visible: bool,
}

impl RawViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips visibility. Returns the new state for convenience.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "Raw view toggled");
        self.visible
    }

    /// Toggle-button label for the current state.
    pub fn button_label(&self) -> &'static str {
        if self.visible {
            HIDE_RAW_LABEL
        } else {
            SHOW_RAW_LABEL
        }
    }

    /// Text for the copy-to-clipboard action: exactly the serialised raw
    /// JSON, independent of whether the view is currently visible.
    pub fn clipboard_text<'a>(&self, json_text: &'a str) -> &'a str {
        json_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycles_labels() {
        let mut view = RawViewState::new();
        assert!(!view.is_visible());
        assert_eq!(view.button_label(), "Show Raw JSON");

        assert!(view.toggle());
        assert_eq!(view.button_label(), "Hide Raw JSON");

        assert!(!view.toggle());
        assert_eq!(view.button_label(), "Show Raw JSON");
    }

    #[test]
    fn test_clipboard_text_ignores_visibility() {
        let mut view = RawViewState::new();
        let json = "[\n  {}\n]";
        assert_eq!(view.clipboard_text(json), json);
        view.toggle();
        assert_eq!(view.clipboard_text(json), json);
    }
}
