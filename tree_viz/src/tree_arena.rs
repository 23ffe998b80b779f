// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! An in-memory syntax tree that implements [`TreeCursor`], for callers that don't bring
//! their own parser tree.
//!
//! Nodes live in a flat arena and refer to each other by id, the same way the memory
//! arena tree in `r3bl_rs_utils` does. Ids are dense and assigned in insertion order, so a
//! tree built top down has its root at id `0`.
//!
//! More info:
//! 1. [Region based memory management](https://en.wikipedia.org/wiki/Region-based_memory_management)
//! 2. [Non binary trees in Rust](https://developerlife.com/2022/02/24/rust-non-binary-tree/)

use crate::{CommonResult, TreeCursor, TreeVizError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub id: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Position of this node in its parent's `children`.
    pub index_in_parent: usize,
    pub name: String,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTreeArena {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTreeArena {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Appends a node as the last child of `parent`, or as a detached node when `parent`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeVizError::UnknownNode`] if `parent` is not in the arena.
    pub fn add_new_node(
        &mut self,
        name: impl Into<String>,
        from: usize,
        to: usize,
        parent: Option<usize>,
    ) -> CommonResult<usize> {
        let id = self.nodes.len();
        let index_in_parent = match parent {
            Some(parent_id) => {
                let parent_node = self.get_node_mut(parent_id)?;
                parent_node.children.push(id);
                parent_node.children.len() - 1
            }
            None => 0,
        };
        self.nodes.push(SyntaxNode {
            id,
            parent,
            children: vec![],
            index_in_parent,
            name: name.into(),
            from,
            to,
        });
        Ok(id)
    }

    #[must_use]
    pub fn get_node(&self, id: usize) -> Option<&SyntaxNode> { self.nodes.get(id) }

    /// Node links are only written by [`add_new_node`](Self::add_new_node), so every id
    /// stored in the arena refers to a node in it.
    fn get_node_mut(&mut self, id: usize) -> CommonResult<&mut SyntaxNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TreeVizError::UnknownNode { id }.into())
    }

    #[must_use]
    pub fn node_exists(&self, id: usize) -> bool { id < self.nodes.len() }

    #[must_use]
    pub fn get_children_of(&self, id: usize) -> Option<&[usize]> {
        self.get_node(id).map(|node| node.children.as_slice())
    }

    #[must_use]
    pub fn get_parent_of(&self, id: usize) -> Option<usize> {
        self.get_node(id).and_then(|node| node.parent)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Pre-order ids of the subtree rooted at `id`, children in order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeVizError::UnknownNode`] if `id` (or any id reachable from it) is not
    /// in the arena.
    pub fn tree_walk_dfs(&self, id: usize) -> CommonResult<Vec<usize>> {
        let mut collected_nodes = vec![];
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let node = self
                .get_node(node_id)
                .ok_or(TreeVizError::UnknownNode { id: node_id })?;
            collected_nodes.push(node_id);
            stack.extend(node.children.iter().rev());
        }
        Ok(collected_nodes)
    }

    /// # Errors
    ///
    /// Returns [`TreeVizError::UnknownNode`] if `id` is not in the arena.
    pub fn cursor(&self, id: usize) -> CommonResult<ArenaCursor<'_>> {
        if self.node_exists(id) {
            Ok(ArenaCursor { arena: self, id })
        } else {
            Err(TreeVizError::UnknownNode { id }.into())
        }
    }
}

/// A [`TreeCursor`] over a [`SyntaxTreeArena`]. Cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct ArenaCursor<'a> {
    arena: &'a SyntaxTreeArena,
    id: usize,
}

impl<'a> ArenaCursor<'a> {
    #[must_use]
    pub fn id(&self) -> usize { self.id }

    /// Cursors are only made for ids in the arena, and the arena can't change while it is
    /// borrowed.
    fn node(&self) -> &'a SyntaxNode { &self.arena.nodes[self.id] }
}

impl TreeCursor for ArenaCursor<'_> {
    fn node_name(&self) -> &str { &self.node().name }

    fn from(&self) -> usize { self.node().from }

    fn to(&self) -> usize { self.node().to }

    fn first_child(&mut self) -> bool {
        match self.node().children.first() {
            Some(&child) => {
                self.id = child;
                true
            }
            None => false,
        }
    }

    fn next_sibling(&mut self) -> bool {
        let node = self.node();
        let sibling = node
            .parent
            .and_then(|parent| self.arena.get_children_of(parent))
            .and_then(|siblings| siblings.get(node.index_in_parent + 1));
        match sibling {
            Some(&sibling) => {
                self.id = sibling;
                true
            }
            None => false,
        }
    }

    fn parent(&mut self) -> bool {
        match self.node().parent {
            Some(parent) => {
                self.id = parent;
                true
            }
            None => false,
        }
    }

    fn has_next_sibling(&self) -> bool {
        let node = self.node();
        node.parent
            .and_then(|parent| self.arena.get_children_of(parent))
            .is_some_and(|siblings| node.index_in_parent + 1 < siblings.len())
    }
}

/// A finished tree together with the source text its offsets point into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    arena: SyntaxTreeArena,
    source: String,
    root: usize,
}

impl SyntaxTree {
    /// # Errors
    ///
    /// Returns [`TreeVizError::UnknownNode`] if `root` is not in `arena`.
    pub fn new(
        arena: SyntaxTreeArena,
        source: impl Into<String>,
        root: usize,
    ) -> CommonResult<Self> {
        if !arena.node_exists(root) {
            return Err(TreeVizError::UnknownNode { id: root }.into());
        }
        Ok(Self {
            arena,
            source: source.into(),
            root,
        })
    }

    #[must_use]
    pub fn arena(&self) -> &SyntaxTreeArena { &self.arena }

    #[must_use]
    pub fn source(&self) -> &str { &self.source }

    #[must_use]
    pub fn root(&self) -> usize { self.root }

    /// A cursor positioned on the root.
    #[must_use]
    pub fn cursor(&self) -> ArenaCursor<'_> {
        ArenaCursor {
            arena: &self.arena,
            id: self.root,
        }
    }
}

/// Builds a [`SyntaxTree`] and its source text at the same time. Each call appends text
/// to the source, and nodes span exactly the text appended while they were open.
///
/// ```rust
/// use r3bl_tree_viz::{SyntaxTreeBuilder, TreeCursor};
///
/// let tree = SyntaxTreeBuilder::new()
///     .open("Call")
///     .leaf("Ident", "print")
///     .token("(")
///     .token(")")
///     .close()
///     .build()
///     .unwrap();
/// assert_eq!(tree.source(), "print()");
/// assert_eq!(tree.cursor().node_name(), "Call");
/// ```
///
/// Mistakes (closing more nodes than were opened, starting a second root) are recorded
/// and reported by [`build`](SyntaxTreeBuilder::build).
#[derive(Debug, Default)]
pub struct SyntaxTreeBuilder {
    arena: SyntaxTreeArena,
    source: String,
    open_nodes: Vec<usize>,
    root: Option<usize>,
    error: Option<TreeVizError>,
}

impl SyntaxTreeBuilder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Starts a node that contains everything added until the matching
    /// [`close`](Self::close).
    #[must_use]
    pub fn open(mut self, name: &str) -> Self {
        let from = self.source.len();
        if let Some(id) = self.add_node(name, from, from) {
            self.open_nodes.push(id);
        }
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        match self.open_nodes.pop() {
            Some(id) => {
                let to = self.source.len();
                if let Ok(node) = self.arena.get_node_mut(id) {
                    node.to = to;
                }
            }
            None => self.record(TreeVizError::MalformedTree {
                reason: "close() without a matching open()",
            }),
        }
        self
    }

    /// Adds a childless node spanning `text`.
    #[must_use]
    pub fn leaf(mut self, name: &str, text: &str) -> Self {
        let from = self.source.len();
        self.source.push_str(text);
        let to = self.source.len();
        self.add_node(name, from, to);
        self
    }

    /// Adds a leaf named after its own text, like a keyword or punctuation token.
    #[must_use]
    pub fn token(self, text: &str) -> Self { self.leaf(text, text) }

    /// Adds source text, such as whitespace, that belongs to no node of its own.
    #[must_use]
    pub fn gap(mut self, text: &str) -> Self {
        self.source.push_str(text);
        self
    }

    /// # Errors
    ///
    /// Returns [`TreeVizError::MalformedTree`] if no node was added, a node is still
    /// open, or a mistake was recorded along the way.
    pub fn build(self) -> CommonResult<SyntaxTree> {
        if let Some(error) = self.error {
            return Err(error.into());
        }
        if !self.open_nodes.is_empty() {
            return Err(TreeVizError::MalformedTree {
                reason: "build() with nodes still open",
            }
            .into());
        }
        let Some(root) = self.root else {
            return Err(TreeVizError::MalformedTree {
                reason: "build() on an empty tree",
            }
            .into());
        };
        SyntaxTree::new(self.arena, self.source, root)
    }

    fn add_node(&mut self, name: &str, from: usize, to: usize) -> Option<usize> {
        let parent = self.open_nodes.last().copied();
        if parent.is_none() && self.root.is_some() {
            self.record(TreeVizError::MalformedTree {
                reason: "a tree can only have one root",
            });
            return None;
        }
        match self.arena.add_new_node(name, from, to, parent) {
            Ok(id) => {
                if parent.is_none() {
                    self.root = Some(id);
                }
                Some(id)
            }
            Err(_) => {
                self.record(TreeVizError::UnknownNode {
                    id: parent.unwrap_or_default(),
                });
                None
            }
        }
    }

    /// Keeps the first mistake only.
    fn record(&mut self, error: TreeVizError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// Small trees used by the `tviz` binary and by tests.
pub mod fixtures {
    use super::*;

    /// ```text
    /// class Greeter {a
    /// b}
    /// ```
    ///
    /// A `Program` holding a keyword token, an `Identifier` and a `Body`. The body holds
    /// two brace tokens around a two-line `Comment`.
    ///
    /// # Errors
    ///
    /// Never fails in practice. The signature matches [`SyntaxTreeBuilder::build`].
    pub fn class_declaration() -> CommonResult<SyntaxTree> {
        SyntaxTreeBuilder::new()
            .open("Program")
            .token("class")
            .gap(" ")
            .leaf("Identifier", "Greeter")
            .gap(" ")
            .open("Body")
            .token("{")
            .leaf("Comment", "a\nb")
            .token("}")
            .close()
            .close()
            .build()
    }
}
