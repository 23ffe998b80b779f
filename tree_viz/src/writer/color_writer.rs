// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Color, ColorState, ColorSupport, CommonResult, OutputSurface, Platform,
            SGR_RESET_STR, SgrParam, SgrSequence, StdoutSurface, StyledWriter,
            TransformColor, global_color_support};

/// Marks the spot in a script-console buffer where the next style declaration applies.
pub const SCRIPT_CONSOLE_PLACEHOLDER: &str = "%c";

/// How color directives are written into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Colors are tracked but never written.
    Plain,
    /// ANSI SGR escape sequences. RGB colors are degraded to fit the given support.
    Terminal(ColorSupport),
    /// `%c` placeholders in the text, with `color:` / `background:` declarations kept
    /// in a side list that is handed to the surface on flush. A `%` in pushed text is
    /// doubled, so the buffer reads as a console format string.
    ScriptConsole,
}

/// The one [`StyledWriter`] implementation: a [`ColorState`] diffing engine plus an
/// [`Encoding`] that decides what a directive looks like.
///
/// ```rust
/// use r3bl_tree_viz::{Color, ColorSupport, ColorWriter, Encoding, StyledWriter};
///
/// let mut writer = ColorWriter::new(Encoding::Terminal(ColorSupport::Truecolor));
/// writer.fg(Color::RED);
/// writer.push("a");
/// writer.push("b");
/// assert_eq!(writer.as_text(), "\x1b[91mab");
/// ```
#[derive(Debug)]
pub struct ColorWriter {
    encoding: Encoding,
    state: ColorState,
    buffer: String,
    styles: Vec<String>,
    surface: Box<dyn OutputSurface>,
}

impl ColorWriter {
    /// Creates a writer that flushes to stdout.
    #[must_use]
    pub fn new(encoding: Encoding) -> Self {
        Self::with_surface(encoding, Box::new(StdoutSurface))
    }

    #[must_use]
    pub fn with_surface(encoding: Encoding, surface: Box<dyn OutputSurface>) -> Self {
        Self {
            encoding,
            state: ColorState::default(),
            buffer: String::new(),
            styles: Vec::new(),
            surface,
        }
    }

    #[must_use]
    pub fn plain() -> Self { Self::new(Encoding::Plain) }

    /// Picks the encoding for `platform`. With `colors` disabled, or on a terminal that
    /// [`global_color_support::detect`] reports as colorless, the writer is plain.
    #[must_use]
    pub fn for_platform(platform: Platform, colors: bool) -> Self {
        Self::new(Self::encoding_for(platform, colors))
    }

    #[must_use]
    pub fn encoding_for(platform: Platform, colors: bool) -> Encoding {
        if !colors {
            return Encoding::Plain;
        }
        match platform {
            Platform::ScriptConsole => Encoding::ScriptConsole,
            Platform::Terminal => match global_color_support::detect() {
                ColorSupport::NoColor => Encoding::Plain,
                support => Encoding::Terminal(support),
            },
        }
    }

    #[must_use]
    pub fn encoding(&self) -> Encoding { self.encoding }

    #[must_use]
    pub fn state(&self) -> &ColorState { &self.state }

    pub fn set_surface(&mut self, surface: Box<dyn OutputSurface>) { self.surface = surface; }

    /// Appends one run of text that contains no line break.
    fn push_run(&mut self, text: &str) {
        if self.state.is_dirty() {
            self.push_directive();
        }
        match self.encoding {
            Encoding::ScriptConsole => self.buffer.push_str(&script_console::escape(text)),
            Encoding::Plain | Encoding::Terminal(_) => self.buffer.push_str(text),
        }
        self.state.clear_dirty();
    }

    fn push_directive(&mut self) {
        match self.encoding {
            Encoding::Plain => {}
            Encoding::Terminal(support) => {
                let sequence = terminal::sgr_sequence(&self.state, support);
                self.buffer.push_str(&sequence.to_string());
            }
            Encoding::ScriptConsole => {
                self.buffer.push_str(SCRIPT_CONSOLE_PLACEHOLDER);
                self.styles.push(script_console::style(&self.state));
            }
        }
    }

    /// A terminal carries the background across a line break, so a colored background
    /// is closed before the break and both sides are re-asserted on the next row.
    fn push_terminal_line_break(&mut self) {
        if self.state.bg.is_some() {
            self.buffer.push_str(SGR_RESET_STR);
            self.buffer.push('\n');
            self.state.mark_all_dirty();
        } else {
            self.buffer.push('\n');
        }
    }
}

impl StyledWriter for ColorWriter {
    fn push(&mut self, text: &str) {
        if !matches!(self.encoding, Encoding::Terminal(_)) {
            self.push_run(text);
            return;
        }
        let mut runs = text.split('\n');
        if let Some(first) = runs.next() {
            self.push_run(first);
        }
        for run in runs {
            self.push_terminal_line_break();
            self.push_run(run);
        }
    }

    fn fg(&mut self, color: Color) { self.state.set_fg(color); }

    fn bg(&mut self, color: Color) { self.state.set_bg(color); }

    fn reset_color(&mut self, fg: bool, bg: bool) { self.state.reset(fg, bg); }

    fn flush(&mut self) -> CommonResult<()> {
        tracing::trace!(
            message = "Flushing writer",
            encoding = ?self.encoding,
            bytes = self.buffer.len(),
            styles = self.styles.len()
        );
        match self.encoding {
            Encoding::Plain => self.surface.log(&self.buffer, &[]),
            Encoding::Terminal(_) => {
                let text = format!("{}{SGR_RESET_STR}", self.buffer);
                self.surface.log(&text, &[])
            }
            Encoding::ScriptConsole if self.styles.is_empty() => {
                let text = script_console::unescape(&self.buffer);
                self.surface.log(&text, &[])
            }
            Encoding::ScriptConsole => self.surface.log(&self.buffer, &self.styles),
        }
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.styles.clear();
        self.state.mark_all_dirty();
    }

    fn as_text(&self) -> &str { &self.buffer }

    fn styles(&self) -> &[String] { &self.styles }
}

mod terminal {
    use super::*;

    /// Encodes the dirty sides of `state` as one sequence. Both sides unset collapses to
    /// the plain reset; a single unset side uses its default-color code.
    pub fn sgr_sequence(state: &ColorState, support: ColorSupport) -> SgrSequence {
        let mut sequence = SgrSequence::default();
        if state.update_fg
            && let Some(color) = state.fg
        {
            sequence.push(sgr_param(color, support, Side::Foreground));
        }
        if state.update_bg
            && let Some(color) = state.bg
        {
            sequence.push(sgr_param(color, support, Side::Background));
        }
        if state.fg.is_none() && state.bg.is_none() {
            sequence.push(SgrParam::Reset);
        } else {
            if state.update_fg && state.fg.is_none() {
                sequence.push(SgrParam::DefaultForeground);
            }
            if state.update_bg && state.bg.is_none() {
                sequence.push(SgrParam::DefaultBackground);
            }
        }
        sequence
    }

    #[derive(Clone, Copy)]
    enum Side {
        Foreground,
        Background,
    }

    fn sgr_param(color: Color, support: ColorSupport, side: Side) -> SgrParam {
        let color = degrade(color, support);
        match (color, side) {
            (Color::Ansi16(it), _) => {
                let (three_bit, bright) = it.to_3bit();
                let base = if bright { 90 } else { 30 };
                match side {
                    Side::Foreground => SgrParam::ForegroundBasic(three_bit + base),
                    Side::Background => SgrParam::BackgroundBasic(three_bit + base + 10),
                }
            }
            (Color::Ansi256(it), Side::Foreground) => SgrParam::ForegroundAnsi256(it.index),
            (Color::Ansi256(it), Side::Background) => SgrParam::BackgroundAnsi256(it.index),
            (Color::Rgb(it), Side::Foreground) => {
                SgrParam::ForegroundRGB(it.red, it.green, it.blue)
            }
            (Color::Rgb(it), Side::Background) => {
                SgrParam::BackgroundRGB(it.red, it.green, it.blue)
            }
        }
    }

    /// 4-bit colors are understood everywhere and pass through unchanged.
    fn degrade(color: Color, support: ColorSupport) -> Color {
        match (color, support) {
            (Color::Rgb(it), ColorSupport::Ansi256) => it.as_ansi256().into(),
            (Color::Rgb(_) | Color::Ansi256(_), ColorSupport::Grayscale) => {
                color.as_grayscale().into()
            }
            _ => color,
        }
    }
}

mod script_console {
    use super::*;

    pub fn style(state: &ColorState) -> String {
        let mut declarations = Vec::with_capacity(2);
        if let Some(color) = state.fg {
            declarations.push(declaration("color", color));
        }
        if let Some(color) = state.bg {
            declarations.push(declaration("background", color));
        }
        declarations.join(";")
    }

    /// Keeps a literal `%c` in the text from being taken for a placeholder.
    pub fn escape(text: &str) -> String { text.replace('%', "%%") }

    /// Without placeholders the text is logged as is, so the doubling is undone.
    pub fn unescape(text: &str) -> String { text.replace("%%", "%") }

    fn declaration(property: &str, color: Color) -> String {
        let rgb = color.as_rgb();
        format!("{property}:rgb({},{},{})", rgb.red, rgb.green, rgb.blue)
    }
}
