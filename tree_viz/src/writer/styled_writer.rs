// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use crate::{Color, CommonResult};

/// Accumulates text and color changes, and hands the result to an output surface on
/// [`flush`](StyledWriter::flush).
///
/// Color changes are lazy. [`fg`](StyledWriter::fg), [`bg`](StyledWriter::bg) and
/// [`reset_color`](StyledWriter::reset_color) only record the requested state; the
/// directive that encodes it is written by the next [`push`](StyledWriter::push). Any
/// number of pushes without an intervening change cost at most one directive.
///
/// [`ColorWriter`](crate::ColorWriter) is the implementation used by the render entry
/// point. Pass your own implementation in
/// [`RenderOptions::writer`](crate::RenderOptions::writer) to take over output entirely.
pub trait StyledWriter: Debug {
    /// Appends `text` to the buffer, preceded by a color directive if the color state
    /// changed since the last push.
    fn push(&mut self, text: &str);

    fn fg(&mut self, color: Color);

    fn bg(&mut self, color: Color);

    /// Returns the selected sides to the surface default color. See
    /// [`ColorState::reset`](crate::ColorState::reset) for when this is a no-op.
    fn reset_color(&mut self, fg: bool, bg: bool);

    /// Sends the buffer to the output surface. The buffer itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns whatever error the output surface reports.
    fn flush(&mut self) -> CommonResult<()>;

    /// Empties the buffer. The selected colors are kept, and both sides are marked dirty
    /// so the next push re-asserts them.
    fn clear(&mut self);

    fn as_text(&self) -> &str;

    /// Style declarations paired positionally with the placeholders in
    /// [`as_text`](StyledWriter::as_text). Only script-console writers produce any.
    fn styles(&self) -> &[String] { &[] }
}
