// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The tree walker. [`RenderStream`] turns a [`TreeCursor`] into [`Line`]s of colored
//! [`Segment`]s, one line at a time, without building the whole output first.
//!
//! Nesting is drawn with box drawing connectors rather than a depth counter. Each line a
//! child produces is prefixed by one connector per enclosing level:
//!
//! ```text
//! Program:
//! ├╴class
//! ├╴Identifier: Greeter
//! └╴Body:
//!   ├╴{
//!   ├╴Comment: '''
//!   │   a⮐
//!   │   b
//!   │   '''
//!   └╴}
//! ```

use std::{collections::VecDeque,
          fmt::{Debug, Formatter}};

use smallstr::SmallString;
use smallvec::SmallVec;

use crate::{Color, CommonResult, Source, Theme, TreeCursor, TreeVizError, Visibility,
            VisibilityFilter};

pub mod glyphs {
    /// First line of a child that has visible siblings after it.
    pub const BRANCH: &str = "├╴";
    /// First line of the last visible child.
    pub const LAST_BRANCH: &str = "└╴";
    /// Following lines of a child that has visible siblings after it.
    pub const CONTINUE: &str = "│ ";
    /// Following lines of the last visible child.
    pub const BLANK: &str = "  ";
    pub const ELLIPSIS: &str = "…";
    pub const BLOCK_QUOTES: &str = "'''";
    pub const BLOCK_RETURN: &str = "⮐";
}

pub mod sizing {
    use super::*;

    /// Most segments are short names and connectors.
    pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;
    pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;

    /// A leaf line is `name`, `: `, `text`, plus one connector per level.
    pub const MAX_INLINE_SEGMENTS: usize = 8;
    pub type InlineVecSegments = SmallVec<[Segment; MAX_INLINE_SEGMENTS]>;
}
use sizing::{InlineString, InlineVecSegments};

/// How a segment changes the writer's color before its text is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentColor {
    /// Leave the current color alone.
    Keep,
    Color(Color),
    /// The theme's ellipsis color, resolved when the segment is written.
    Ellipsis,
    /// Return the background to the surface default.
    ResetBackground,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: InlineString,
    pub color: SegmentColor,
}

impl Segment {
    #[must_use]
    pub fn new(text: &str, color: SegmentColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    #[must_use]
    pub fn colored(text: &str, color: Color) -> Self {
        Self::new(text, SegmentColor::Color(color))
    }
}

/// One row of the rendered tree. Only multi-line source text puts line breaks inside a
/// line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub segments: InlineVecSegments,
}

impl Line {
    /// The text of every segment, without colors.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|it| it.text.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize { self.segments.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> { self.segments.iter() }
}

impl<'a> IntoIterator for &'a Line {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter { self.segments.iter() }
}

impl FromIterator<Segment> for Line {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// The connector drawn for the child a [`Level`] is currently rendering.
#[derive(Debug, Clone, Copy)]
struct Connector {
    is_last: bool,
    first_line_done: bool,
}

impl Connector {
    fn glyph(&self) -> &'static str {
        match (self.first_line_done, self.is_last) {
            (false, false) => glyphs::BRANCH,
            (false, true) => glyphs::LAST_BRANCH,
            (true, false) => glyphs::CONTINUE,
            (true, true) => glyphs::BLANK,
        }
    }
}

/// The children of one node being walked. Exists from a successful `first_child()` until
/// the matching `parent()`.
#[derive(Debug, Default)]
struct Level {
    /// `false` while the cursor sits on the first child and it hasn't been visited yet.
    entered: bool,
    connector: Option<Connector>,
    /// Decisions for the siblings following the current child, made while looking for
    /// the last visible child.
    lookahead: VecDeque<Visibility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Walking,
    Done,
}

/// A lazy, single pass sequence of [`Line`]s for the subtree under a cursor.
///
/// The cursor is moved while lines are pulled and is back on the node it started on once
/// the stream ends. Dropping the stream early also returns it there.
///
/// ```rust
/// use r3bl_tree_viz::{RenderStream, Theme, fixtures, show_all};
///
/// let tree = fixtures::class_declaration().unwrap();
/// let mut cursor = tree.cursor();
/// let mut stream = RenderStream::new(&mut cursor, tree.source(), Theme::terminal(), &show_all);
/// let first = stream.next().unwrap().unwrap();
/// assert_eq!(first.plain_text(), "Program:");
/// ```
pub struct RenderStream<'a, C, S>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    cursor: &'a mut C,
    source: &'a S,
    theme: Theme,
    filter: VisibilityFilter<'a>,
    phase: Phase,
    levels: Vec<Level>,
    pending: VecDeque<Line>,
}

impl<'a, C, S> RenderStream<'a, C, S>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    pub fn new(
        cursor: &'a mut C,
        source: &'a S,
        theme: Theme,
        filter: VisibilityFilter<'a>,
    ) -> Self {
        Self {
            cursor,
            source,
            theme,
            filter,
            phase: Phase::Start,
            levels: vec![],
            pending: VecDeque::new(),
        }
    }

    fn decide(&self) -> Visibility { (self.filter)(&self.cursor.node_info()) }

    fn start(&mut self) -> CommonResult<()> {
        self.phase = Phase::Walking;
        match self.decide() {
            Visibility::Hidden => {
                self.phase = Phase::Done;
                Ok(())
            }
            decision => self.render_node(decision),
        }
    }

    /// Moves to the next visible child of the innermost level and renders it, or closes
    /// the level when its children are exhausted.
    fn step(&mut self) -> CommonResult<()> {
        let Some(level) = self.levels.last_mut() else {
            self.phase = Phase::Done;
            return Ok(());
        };
        let moved = if level.entered {
            self.cursor.next_sibling()
        } else {
            level.entered = true;
            true
        };
        if !moved {
            return self.close_level();
        }

        let queued = level.lookahead.pop_front();
        let decision = match queued {
            Some(it) => it,
            None => self.decide(),
        };
        if decision == Visibility::Hidden {
            return Ok(());
        }

        let is_last = !self.visible_sibling_follows();
        if let Some(level) = self.levels.last_mut() {
            level.connector = Some(Connector {
                is_last,
                first_line_done: false,
            });
        }
        self.render_node(decision)
    }

    /// Looks past the current child for one that isn't hidden. Every decision made along
    /// the way is queued so that no node is decided twice.
    fn visible_sibling_follows(&mut self) -> bool {
        let Some(level) = self.levels.last_mut() else {
            return false;
        };
        if level.lookahead.iter().any(|it| *it != Visibility::Hidden) {
            return true;
        }
        if level.lookahead.is_empty() && !self.cursor.has_next_sibling() {
            return false;
        }
        let mut ahead = self.cursor.clone();
        for _ in 0..level.lookahead.len() {
            if !ahead.next_sibling() {
                return false;
            }
        }
        while ahead.next_sibling() {
            let decision = (self.filter)(&ahead.node_info());
            level.lookahead.push_back(decision);
            if decision != Visibility::Hidden {
                return true;
            }
        }
        false
    }

    fn close_level(&mut self) -> CommonResult<()> {
        self.levels.pop();
        if self.cursor.parent() {
            Ok(())
        } else {
            Err(TreeVizError::CursorContractViolation {
                node_name: self.cursor.node_name().to_string(),
            }
            .into())
        }
    }

    /// Queues the node's own lines. A shown node with children also opens a level,
    /// leaving the cursor on its first child.
    fn render_node(&mut self, decision: Visibility) -> CommonResult<()> {
        let theme = self.theme;
        let name = self.cursor.node_name().to_string();

        if decision == Visibility::Collapsed {
            self.emit(Line::from_iter([
                Segment::colored(&name, theme.name),
                Segment::colored(": ", theme.colon),
                Segment::new(glyphs::ELLIPSIS, SegmentColor::Ellipsis),
            ]));
            return Ok(());
        }

        if self.cursor.first_child() {
            self.emit(Line::from_iter([
                Segment::colored(&name, theme.name),
                Segment::colored(":", theme.colon),
            ]));
            self.levels.push(Level::default());
            return Ok(());
        }

        let source = self.source;
        let text = source.substring(self.cursor.from(), self.cursor.to())?;
        for line in leaf_lines(&theme, &name, &text) {
            self.emit(line);
        }
        Ok(())
    }

    /// Prefixes `line` with the connector of every open level and queues it.
    fn emit(&mut self, line: Line) {
        let tree_color = self.theme.tree;
        let mut segments = InlineVecSegments::new();
        for connector in self.levels.iter_mut().filter_map(|it| it.connector.as_mut()) {
            segments.push(Segment::colored(connector.glyph(), tree_color));
            connector.first_line_done = true;
        }
        segments.extend(line.segments);
        self.pending.push_back(Line { segments });
    }

    /// Walks the cursor back up to where the stream started.
    fn restore_cursor(&mut self) {
        while self.levels.pop().is_some() {
            self.cursor.parent();
        }
    }
}

/// The lines of a node without children.
fn leaf_lines(theme: &Theme, name: &str, text: &str) -> Vec<Line> {
    if text == name {
        return vec![Line::from_iter([Segment::colored(text, theme.source)])];
    }

    if !text.contains('\n') {
        return vec![Line::from_iter([
            Segment::colored(name, theme.name),
            Segment::colored(": ", theme.colon),
            Segment::colored(text, theme.source),
        ])];
    }

    let rows: Vec<&str> = text
        .split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
        .collect();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(Line::from_iter([
        Segment::colored(name, theme.name),
        Segment::colored(": ", theme.colon),
        Segment::colored(glyphs::BLOCK_QUOTES, theme.block_quotes),
    ]));
    let last_index = rows.len() - 1;
    for (index, row) in rows.iter().enumerate() {
        let indented = format!("{}{row}", glyphs::BLANK);
        let mut line = Line::from_iter([Segment::colored(&indented, theme.source)]);
        if index < last_index {
            line.segments
                .push(Segment::colored(glyphs::BLOCK_RETURN, theme.block_return));
        }
        lines.push(line);
    }
    lines.push(Line::from_iter([Segment::colored(
        &format!("{}{}", glyphs::BLANK, glyphs::BLOCK_QUOTES),
        theme.block_quotes,
    )]));
    lines
}

impl<C, S> Iterator for RenderStream<'_, C, S>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    type Item = CommonResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            let result = match self.phase {
                Phase::Done => return None,
                Phase::Start => self.start(),
                Phase::Walking => self.step(),
            };
            if let Err(error) = result {
                self.restore_cursor();
                self.phase = Phase::Done;
                return Some(Err(error));
            }
        }
    }
}

impl<C, S> Drop for RenderStream<'_, C, S>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    fn drop(&mut self) { self.restore_cursor(); }
}

impl<C, S> Debug for RenderStream<'_, C, S>
where
    C: TreeCursor,
    S: Source + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderStream")
            .field("node", &self.cursor.node_name())
            .field("theme", &self.theme)
            .field("phase", &self.phase)
            .field("depth", &self.levels.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::{Cell, RefCell},
              rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ArenaCursor, NameFilter, NodeInfo, fixtures, show_all};

    fn plain_lines<C: TreeCursor>(
        cursor: &mut C,
        source: &str,
        filter: VisibilityFilter<'_>,
    ) -> Vec<String> {
        RenderStream::new(cursor, source, Theme::terminal(), filter)
            .map(|line| line.unwrap().plain_text())
            .collect()
    }

    #[test]
    fn renders_full_tree_with_connectors() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        assert_eq!(
            plain_lines(&mut cursor, tree.source(), &show_all),
            vec![
                "Program:",
                "├╴class",
                "├╴Identifier: Greeter",
                "└╴Body:",
                "  ├╴{",
                "  ├╴Comment: '''",
                "  │   a⮐",
                "  │   b",
                "  │   '''",
                "  └╴}",
            ]
        );
        assert_eq!(cursor.node_name(), "Program");
    }

    #[test]
    fn hidden_last_child_moves_last_connector_and_decides_each_node_once() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let calls = RefCell::new(vec![]);
        let filter = |node: &NodeInfo<'_>| {
            calls.borrow_mut().push(node.name.to_string());
            if node.name == "}" {
                Visibility::Hidden
            } else {
                Visibility::Shown
            }
        };
        let lines = plain_lines(&mut cursor, tree.source(), &filter);
        assert_eq!(
            lines[4..].to_vec(),
            vec![
                "  ├╴{",
                "  └╴Comment: '''",
                "      a⮐",
                "      b",
                "      '''",
            ]
        );
        assert_eq!(
            *calls.borrow(),
            vec!["Program", "class", "Identifier", "Body", "{", "Comment", "}"]
        );
        assert_eq!(cursor.node_name(), "Program");
    }

    #[test]
    fn collapsed_node_is_one_line_and_never_descends() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let count = Cell::new(0);
        let names = NameFilter::default().collapse_names(["Body"]);
        let filter = |node: &NodeInfo<'_>| {
            count.set(count.get() + 1);
            names.decide(node)
        };
        let lines = plain_lines(&mut cursor, tree.source(), &filter);
        assert_eq!(
            lines,
            vec![
                "Program:",
                "├╴class",
                "├╴Identifier: Greeter",
                "└╴Body: …"
            ]
        );
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn hidden_root_renders_nothing() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let filter = |_: &NodeInfo<'_>| Visibility::Hidden;
        assert!(plain_lines(&mut cursor, tree.source(), &filter).is_empty());
    }

    #[test]
    fn hidden_middle_children_are_skipped() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let names = NameFilter::default().hide_names(["Identifier", "Body"]);
        let filter = |node: &NodeInfo<'_>| names.decide(node);
        assert_eq!(
            plain_lines(&mut cursor, tree.source(), &filter),
            vec!["Program:", "└╴class"]
        );
    }

    #[test]
    fn leaf_equal_to_its_name_is_one_segment() {
        let tree = crate::SyntaxTreeBuilder::new().token("return").build().unwrap();
        let mut cursor = tree.cursor();
        let lines: Vec<Line> =
            RenderStream::new(&mut cursor, tree.source(), Theme::terminal(), &show_all)
                .map(Result::unwrap)
                .collect();
        assert_eq!(
            lines,
            vec![Line::from_iter([Segment::colored(
                "return",
                Theme::terminal().source
            )])]
        );
    }

    #[test]
    fn segments_carry_theme_roles() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let theme = Theme::terminal();
        let lines: Vec<Line> =
            RenderStream::new(&mut cursor, tree.source(), theme, &show_all)
                .map(Result::unwrap)
                .collect();
        assert_eq!(
            lines[2],
            Line::from_iter([
                Segment::colored("├╴", theme.tree),
                Segment::colored("Identifier", theme.name),
                Segment::colored(": ", theme.colon),
                Segment::colored("Greeter", theme.source),
            ])
        );
        assert_eq!(
            lines[6],
            Line::from_iter([
                Segment::colored("  ", theme.tree),
                Segment::colored("│ ", theme.tree),
                Segment::colored("  a", theme.source),
                Segment::colored("⮐", theme.block_return),
            ])
        );
    }

    #[test]
    fn carriage_returns_are_dropped_from_rows() {
        let tree = crate::SyntaxTreeBuilder::new()
            .leaf("Text", "x\r\ny")
            .build()
            .unwrap();
        let mut cursor = tree.cursor();
        assert_eq!(
            plain_lines(&mut cursor, tree.source(), &show_all),
            vec!["Text: '''", "  x⮐", "  y", "  '''"]
        );
    }

    #[test]
    fn lines_are_produced_lazily() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let count = Cell::new(0);
        let filter = |_: &NodeInfo<'_>| {
            count.set(count.get() + 1);
            Visibility::Shown
        };
        let mut stream =
            RenderStream::new(&mut cursor, tree.source(), Theme::terminal(), &filter);
        assert_eq!(count.get(), 0);
        assert_eq!(stream.next().unwrap().unwrap().plain_text(), "Program:");
        assert_eq!(count.get(), 1);
        stream.next();
        assert!(count.get() < 7);
    }

    #[test]
    fn dropping_early_restores_cursor() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        {
            let mut stream =
                RenderStream::new(&mut cursor, tree.source(), Theme::terminal(), &show_all);
            for _ in 0..6 {
                stream.next();
            }
        }
        assert_eq!(cursor.node_name(), "Program");
    }

    #[test]
    fn out_of_range_leaf_surfaces_source_error() {
        let tree = fixtures::class_declaration().unwrap();
        let mut cursor = tree.cursor();
        let short_source = "class";
        let results: Vec<CommonResult<Line>> =
            RenderStream::new(&mut cursor, short_source, Theme::terminal(), &show_all)
                .collect();
        let error = results.last().unwrap().as_ref().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<TreeVizError>(),
            Some(TreeVizError::SourceRangeOutOfBounds { .. })
        ));
        assert_eq!(cursor.node_name(), "Program");
    }

    /// Counts how often the walker copies the cursor to look ahead.
    #[derive(Debug)]
    struct CountingCursor<'a> {
        inner: ArenaCursor<'a>,
        clones: Rc<Cell<usize>>,
    }

    impl Clone for CountingCursor<'_> {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                inner: self.inner,
                clones: Rc::clone(&self.clones),
            }
        }
    }

    impl TreeCursor for CountingCursor<'_> {
        fn node_name(&self) -> &str { self.inner.node_name() }

        fn from(&self) -> usize { self.inner.from() }

        fn to(&self) -> usize { self.inner.to() }

        fn first_child(&mut self) -> bool { self.inner.first_child() }

        fn next_sibling(&mut self) -> bool { self.inner.next_sibling() }

        fn parent(&mut self) -> bool { self.inner.parent() }

        fn has_next_sibling(&self) -> bool { self.inner.has_next_sibling() }
    }

    #[test]
    fn last_children_are_found_without_copying_the_cursor() {
        let tree = fixtures::class_declaration().unwrap();
        let clones = Rc::new(Cell::new(0));
        let mut cursor = CountingCursor {
            inner: tree.cursor(),
            clones: Rc::clone(&clones),
        };
        let lines = plain_lines(&mut cursor, tree.source(), &show_all);
        assert_eq!(lines.len(), 10);
        // Only "class", "Identifier", "{" and "Comment" have a following sibling.
        assert_eq!(clones.get(), 4);
    }
}
