// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Color;

/// The colors a writer has selected, and which of them still have to be written to the
/// output. `None` means the surface default.
///
/// An `update_*` flag is raised only when the requested color differs from the stored
/// one, and lowered once the writer has emitted a directive and appended text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorState {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub update_fg: bool,
    pub update_bg: bool,
}

impl ColorState {
    pub fn set_fg(&mut self, color: Color) {
        if !Color::same_encoding_eq(self.fg, Some(color)) {
            self.fg = Some(color);
            self.update_fg = true;
        }
    }

    pub fn set_bg(&mut self, color: Color) {
        if !Color::same_encoding_eq(self.bg, Some(color)) {
            self.bg = Some(color);
            self.update_bg = true;
        }
    }

    /// Resets the selected sides to the surface default.
    ///
    /// A side is only touched when "has a color" and "needs an update" disagree. So a
    /// writer that never selected a color ignores the reset, and so does a side whose
    /// color was selected but not yet written.
    pub fn reset(&mut self, fg: bool, bg: bool) {
        if fg && (self.fg.is_some() != self.update_fg) {
            self.fg = None;
            self.update_fg = true;
        }
        if bg && (self.bg.is_some() != self.update_bg) {
            self.bg = None;
            self.update_bg = true;
        }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool { self.update_fg || self.update_bg }

    pub fn clear_dirty(&mut self) {
        self.update_fg = false;
        self.update_bg = false;
    }

    /// Forces the next write to re-assert both sides.
    pub fn mark_all_dirty(&mut self) {
        self.update_fg = true;
        self.update_bg = true;
    }
}
