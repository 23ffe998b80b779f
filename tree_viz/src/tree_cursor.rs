// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::borrow::Cow;

use crate::{CommonResult, NodeInfo, TreeVizError};

/// A positionable view over a syntax tree.
///
/// The navigation methods move the cursor and return `true`, or leave it where it is and
/// return `false` when there is no such node. Byte offsets are half open, `from..to`.
///
/// The renderer needs two things beyond plain navigation:
/// - `parent()` must succeed after any successful `first_child()` / `next_sibling()`
///   sequence, so it can return to the node it was given.
/// - `Clone` must produce an independent cursor at the same position. Clones are used to
///   look at following siblings without moving the original.
pub trait TreeCursor: Clone {
    fn node_name(&self) -> &str;

    fn from(&self) -> usize;

    fn to(&self) -> usize;

    fn first_child(&mut self) -> bool;

    fn next_sibling(&mut self) -> bool;

    fn parent(&mut self) -> bool;

    /// Peeks whether [`next_sibling`](TreeCursor::next_sibling) would succeed.
    fn has_next_sibling(&self) -> bool { self.clone().next_sibling() }

    fn node_info(&self) -> NodeInfo<'_> {
        NodeInfo {
            name: self.node_name(),
            from: self.from(),
            to: self.to(),
        }
    }
}

/// Random access to the text a tree was parsed from.
pub trait Source {
    /// # Errors
    ///
    /// Returns an error if `from..to` is not a valid range of the source.
    fn substring(&self, from: usize, to: usize) -> CommonResult<Cow<'_, str>>;
}

impl Source for str {
    fn substring(&self, from: usize, to: usize) -> CommonResult<Cow<'_, str>> {
        match self.get(from..to) {
            Some(it) => Ok(Cow::Borrowed(it)),
            None => Err(TreeVizError::SourceRangeOutOfBounds {
                from,
                to,
                len: self.len(),
            }
            .into()),
        }
    }
}

impl Source for String {
    fn substring(&self, from: usize, to: usize) -> CommonResult<Cow<'_, str>> {
        self.as_str().substring(from, to)
    }
}
