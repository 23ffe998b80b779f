// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Formatter};

use crate::{ColorWriter, CommonResult, Line, OutputSurface, Platform, RenderStream,
            SegmentColor, Source, StyledWriter, Theme, ThemeOverride, TreeCursor,
            VisibilityFilter, global_platform, show_all};

/// Options for [`render`], [`render_to_string`] and [`render_lines`].
///
/// | Field             | Default                                              |
/// |:------------------|:-----------------------------------------------------|
/// | `colors`          | `true`                                               |
/// | `line_by_line`    | `false`: one flush for the whole tree                |
/// | `filter`          | [`show_all`]                                         |
/// | `writer`          | a [`ColorWriter`] chosen by platform and `colors`    |
/// | `theme`           | [`Theme::for_platform`]                              |
/// | `theme_overrides` | none                                                 |
/// | `platform`        | [`global_platform::detect`]                          |
/// | `surface`         | stdout, for the default writer only                  |
pub struct RenderOptions<'a> {
    pub colors: bool,
    /// Flush once per line instead of once per tree.
    pub line_by_line: bool,
    pub filter: Option<VisibilityFilter<'a>>,
    /// Replaces the default writer. `colors`, `platform` and `surface` then only affect
    /// theme selection.
    pub writer: Option<&'a mut dyn StyledWriter>,
    pub theme: Option<Theme>,
    pub theme_overrides: ThemeOverride,
    pub platform: Option<Platform>,
    pub surface: Option<Box<dyn OutputSurface>>,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self {
            colors: true,
            line_by_line: false,
            filter: None,
            writer: None,
            theme: None,
            theme_overrides: ThemeOverride::default(),
            platform: None,
            surface: None,
        }
    }
}

impl Debug for RenderOptions<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("colors", &self.colors)
            .field("line_by_line", &self.line_by_line)
            .field("filter", &self.filter.map(|_| "<fn>"))
            .field("writer", &self.writer)
            .field("theme", &self.theme)
            .field("theme_overrides", &self.theme_overrides)
            .field("platform", &self.platform)
            .field("surface", &self.surface)
            .finish()
    }
}

impl RenderOptions<'_> {
    /// The explicit theme or the platform's, with the overrides applied.
    #[must_use]
    pub fn resolve_theme(&self, platform: Platform) -> Theme {
        self.theme
            .unwrap_or_else(|| Theme::for_platform(platform))
            .with_overrides(self.theme_overrides)
    }

    #[must_use]
    pub fn resolve_platform(&self) -> Platform {
        self.platform.unwrap_or_else(global_platform::detect)
    }
}

/// Renders the tree under `cursor` and flushes it to the output surface.
///
/// # Errors
///
/// Returns the first error from the source, the cursor or the output surface. In joined
/// mode nothing is flushed when the walk fails. In line-by-line mode the lines before the
/// failure have already been flushed.
pub fn render<C, S>(cursor: &mut C, source: &S, options: RenderOptions<'_>) -> CommonResult<()>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    let platform = options.resolve_platform();
    let theme = options.resolve_theme(platform);
    let RenderOptions {
        colors,
        line_by_line,
        filter,
        writer,
        surface,
        ..
    } = options;

    let mut default_writer = None;
    let writer: &mut dyn StyledWriter = match writer {
        Some(it) => it,
        None => {
            let mut it = ColorWriter::for_platform(platform, colors);
            if let Some(surface) = surface {
                it.set_surface(surface);
            }
            default_writer.insert(it)
        }
    };

    tracing::debug!(
        message = "Rendering tree",
        ?platform,
        colors,
        line_by_line,
        root = cursor.node_name()
    );

    let stream = RenderStream::new(cursor, source, theme, filter.unwrap_or(&show_all));
    let line_count = if line_by_line {
        write_line_by_line(stream, writer, &theme)?
    } else {
        let line_count = write_joined(stream, writer, &theme)?;
        writer.flush()?;
        line_count
    };

    tracing::debug!(message = "Rendered tree", line_count);
    Ok(())
}

/// Renders the tree under `cursor` as plain text, without flushing anywhere. Colors,
/// the writer override and line-by-line mode are ignored.
///
/// ```rust
/// use r3bl_tree_viz::{RenderOptions, fixtures, render_to_string};
///
/// let tree = fixtures::class_declaration().unwrap();
/// let text = render_to_string(&mut tree.cursor(), tree.source(), RenderOptions::default())
///     .unwrap();
/// assert!(text.starts_with("Program:\n├╴class\n"));
/// ```
///
/// # Errors
///
/// Returns the first error from the source or the cursor.
pub fn render_to_string<C, S>(
    cursor: &mut C,
    source: &S,
    options: RenderOptions<'_>,
) -> CommonResult<String>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    let theme = options.resolve_theme(options.resolve_platform());
    let filter = options.filter.unwrap_or(&show_all);
    let mut writer = ColorWriter::plain();
    let stream = RenderStream::new(cursor, source, theme, filter);
    write_joined(stream, &mut writer, &theme)?;
    Ok(writer.as_text().to_string())
}

/// The lines [`render`] would write, for callers that want to handle output themselves.
/// Only `filter`, `theme`, `theme_overrides` and `platform` are used.
#[must_use]
pub fn render_lines<'a, 'o: 'a, C, S>(
    cursor: &'a mut C,
    source: &'a S,
    options: &RenderOptions<'o>,
) -> RenderStream<'a, C, S>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    let theme = options.resolve_theme(options.resolve_platform());
    let filter: VisibilityFilter<'a> = options.filter.unwrap_or(&show_all);
    RenderStream::new(cursor, source, theme, filter)
}

/// Pushes the segments of one line, applying each segment's color first.
pub fn write_line(writer: &mut dyn StyledWriter, line: &Line, theme: &Theme) {
    for segment in line {
        match segment.color {
            SegmentColor::Keep => {}
            SegmentColor::Color(color) => writer.fg(color),
            SegmentColor::Ellipsis => writer.fg(theme.ellipsis),
            SegmentColor::ResetBackground => writer.reset_color(false, true),
        }
        writer.push(&segment.text);
    }
}

/// Writes every line, separated by an uncolored line break. Returns the line count.
fn write_joined<C, S>(
    stream: RenderStream<'_, C, S>,
    writer: &mut dyn StyledWriter,
    theme: &Theme,
) -> CommonResult<usize>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    let mut line_count = 0;
    for line in stream {
        let line = line?;
        if line_count > 0 {
            writer.push("\n");
        }
        write_line(writer, &line, theme);
        line_count += 1;
    }
    Ok(line_count)
}

/// Flushes and clears the writer after every line. Each line starts on the default
/// background, since a console starts every call afresh.
fn write_line_by_line<C, S>(
    stream: RenderStream<'_, C, S>,
    writer: &mut dyn StyledWriter,
    theme: &Theme,
) -> CommonResult<usize>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    let mut line_count = 0;
    for line in stream {
        let line = line?;
        writer.reset_color(false, true);
        write_line(writer, &line, theme);
        writer.flush()?;
        writer.clear();
        line_count += 1;
    }
    Ok(line_count)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Color, ColorSupport, Encoding, NameFilter, NodeInfo, RecordingSurface,
                Segment, fixtures};

    const EXPECTED: &str = "Program:\n├╴class\n├╴Identifier: Greeter\n└╴Body:\n  ├╴{\n  \
                            ├╴Comment: '''\n  │   a⮐\n  │   b\n  │   '''\n  └╴}";

    #[test]
    fn render_to_string_is_plain_even_with_colors() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let options = RenderOptions {
            colors: true,
            platform: Some(Platform::Terminal),
            ..Default::default()
        };
        let text = render_to_string(&mut cursor, tree.source(), options).unwrap();
        assert_eq!(text, EXPECTED);
        assert!(!text.contains('\x1b'));
        assert_eq!(cursor.node_name(), "Program");
    }

    #[test]
    fn colorless_render_matches_render_to_string() {
        let tree = fixtures::class_declaration().unwrap();
        let recorder = RecordingSurface::new();
        render(
            &mut tree.cursor(),
            tree.source(),
            RenderOptions {
                colors: false,
                surface: Some(Box::new(recorder.clone())),
                ..Default::default()
            },
        )
        .unwrap();
        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, EXPECTED);
        assert!(calls[0].styles.is_empty());
    }

    #[test]
    fn line_by_line_flushes_once_per_line() {
        let tree = fixtures::class_declaration().unwrap();
        let recorder = RecordingSurface::new();
        render(
            &mut tree.cursor(),
            tree.source(),
            RenderOptions {
                colors: false,
                line_by_line: true,
                surface: Some(Box::new(recorder.clone())),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(recorder.calls().len(), 10);
        assert_eq!(recorder.joined_text(), EXPECTED);
    }

    #[test]
    fn writer_override_receives_all_output() {
        let tree = fixtures::class_declaration().unwrap();
        let recorder = RecordingSurface::new();
        let mut writer = ColorWriter::with_surface(
            Encoding::Terminal(ColorSupport::Truecolor),
            Box::new(recorder.clone()),
        );
        let names = NameFilter::default().collapse_names(["Body"]);
        let filter = |node: &NodeInfo<'_>| names.decide(node);
        render(
            &mut tree.cursor(),
            tree.source(),
            RenderOptions {
                colors: false,
                filter: Some(&filter),
                writer: Some(&mut writer),
                platform: Some(Platform::Terminal),
                ..Default::default()
            },
        )
        .unwrap();
        let text = &recorder.calls()[0].text;
        assert!(text.starts_with("\x1b[96mProgram\x1b[37m:"));
        assert!(text.contains("\x1b[96mBody\x1b[37m: \x1b[90m…"));
        assert!(text.ends_with("\x1b[m"));
    }

    #[test]
    fn theme_overrides_reach_the_writer() {
        let tree = fixtures::class_declaration().unwrap();
        let mut writer = ColorWriter::new(Encoding::Terminal(ColorSupport::Truecolor));
        let names = NameFilter::default().collapse_names(["Program"]);
        let filter = |node: &NodeInfo<'_>| names.decide(node);
        let mut cursor = tree.cursor();
        let stream = render_lines(
            &mut cursor,
            tree.source(),
            &RenderOptions {
                filter: Some(&filter),
                platform: Some(Platform::Terminal),
                theme_overrides: ThemeOverride {
                    ellipsis: Some(Color::RED),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        let theme = Theme::terminal().with_overrides(ThemeOverride {
            ellipsis: Some(Color::RED),
            ..Default::default()
        });
        for line in stream {
            write_line(&mut writer, &line.unwrap(), &theme);
        }
        assert_eq!(writer.as_text(), "\x1b[96mProgram\x1b[37m: \x1b[91m…");
    }

    #[test]
    fn reset_background_segment_resets_only_background() {
        let mut writer = ColorWriter::new(Encoding::Terminal(ColorSupport::Truecolor));
        writer.fg(Color::RED);
        writer.bg(Color::DARK_BLUE);
        writer.push("a");
        let line = Line::from_iter([
            Segment::new("b", SegmentColor::ResetBackground),
            Segment::new("c", SegmentColor::Keep),
        ]);
        write_line(&mut writer, &line, &Theme::terminal());
        assert_eq!(writer.as_text(), "\x1b[91;44ma\x1b[49mbc");
    }

    #[test]
    fn terminal_line_by_line_starts_each_line_on_default_background() {
        let tree = fixtures::class_declaration().unwrap();
        let recorder = RecordingSurface::new();
        let mut writer = ColorWriter::with_surface(
            Encoding::Terminal(ColorSupport::Truecolor),
            Box::new(recorder.clone()),
        );
        writer.bg(Color::DARK_BLUE);
        writer.push(">");
        render(
            &mut tree.cursor(),
            tree.source(),
            RenderOptions {
                line_by_line: true,
                writer: Some(&mut writer),
                platform: Some(Platform::Terminal),
                ..Default::default()
            },
        )
        .unwrap();
        let calls = recorder.calls();
        assert_eq!(calls.len(), 10);
        assert_eq!(calls[0].text, "\x1b[44m>\x1b[96;49mProgram\x1b[37m:\x1b[m");
        assert_eq!(calls[1].text, "\x1b[90;49m├╴\x1b[33mclass\x1b[m");
        for call in &calls[1..] {
            assert!(call.text.starts_with("\x1b[90;49m"), "{:?}", call.text);
        }
    }

    #[test]
    fn script_console_line_by_line_pairs_styles_per_call() {
        let tree = crate::SyntaxTreeBuilder::new()
            .open("A")
            .token("b")
            .close()
            .build()
            .unwrap();
        let recorder = RecordingSurface::new();
        render(
            &mut tree.cursor(),
            tree.source(),
            RenderOptions {
                line_by_line: true,
                platform: Some(Platform::ScriptConsole),
                surface: Some(Box::new(recorder.clone())),
                ..Default::default()
            },
        )
        .unwrap();
        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].text, "%cA%c:");
        assert_eq!(
            calls[0].styles,
            vec!["color:rgb(41,184,219)", "color:rgb(229,229,229)"]
        );
        assert_eq!(calls[1].text, "%c└╴%cb");
        assert_eq!(
            calls[1].styles,
            vec!["color:rgb(102,102,102)", "color:rgb(229,229,16)"]
        );
    }
}
