// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`].
///
/// - Every fallible public function in this crate returns this.
/// - The typed errors are [`TreeVizError`] variants wrapped in a [`miette::Report`]; use
///   [`miette::Report::downcast_ref`] to inspect them.
pub type CommonResult<T> = miette::Result<T>;

/// Everything that can go wrong while rendering a tree.
///
/// | Variant                       | Cause                                                   |
/// |:------------------------------|:--------------------------------------------------------|
/// | [`InvalidAnsi16Index`]        | A 4-bit color was built from an index above 15          |
/// | [`SourceRangeOutOfBounds`]    | The source accessor was asked for a range it lacks      |
/// | [`CursorContractViolation`]   | The tree cursor failed to navigate back to a node       |
/// | [`MalformedTree`]             | The arena builder was driven in an invalid order        |
/// | [`UnknownNode`]               | An arena node id does not exist                         |
///
/// [`InvalidAnsi16Index`]: Self::InvalidAnsi16Index
/// [`SourceRangeOutOfBounds`]: Self::SourceRangeOutOfBounds
/// [`CursorContractViolation`]: Self::CursorContractViolation
/// [`MalformedTree`]: Self::MalformedTree
/// [`UnknownNode`]: Self::UnknownNode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum TreeVizError {
    #[error("🎨 4-bit color index {index} is out of range (expected 0..=15)")]
    #[diagnostic(
        code(r3bl_tree_viz::color::invalid_ansi16_index),
        help("Use `Color::ansi256()` for palette indices above 15.")
    )]
    InvalidAnsi16Index { index: u8 },

    #[error("📄 Source range {from}..{to} is out of bounds (source length is {len})")]
    #[diagnostic(
        code(r3bl_tree_viz::source::range_out_of_bounds),
        help("Byte offsets must lie inside the source and on UTF-8 char boundaries.")
    )]
    SourceRangeOutOfBounds { from: usize, to: usize, len: usize },

    #[error("🧭 Tree cursor could not navigate back from '{node_name}'")]
    #[diagnostic(
        code(r3bl_tree_viz::cursor::contract_violation),
        help(
            "A cursor must return to a node with `parent()` after visiting its children, \
             and must be able to revisit siblings it has already reported."
        )
    )]
    CursorContractViolation { node_name: String },

    #[error("🌳 Malformed tree: {reason}")]
    #[diagnostic(code(r3bl_tree_viz::arena::malformed_tree))]
    MalformedTree { reason: &'static str },

    #[error("🔍 Node {id} does not exist in the arena")]
    #[diagnostic(code(r3bl_tree_viz::arena::unknown_node))]
    UnknownNode { id: usize },
}
