// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_tree_viz
//!
//! Renders a syntax tree as readable, optionally colored, text. Point it at a
//! [`TreeCursor`] and the [`Source`] the tree was parsed from:
//!
//! ```rust
//! use r3bl_tree_viz::{RenderOptions, fixtures, render_to_string};
//!
//! let tree = fixtures::class_declaration().unwrap();
//! let text = render_to_string(&mut tree.cursor(), tree.source(), RenderOptions::default())
//!     .unwrap();
//! assert_eq!(
//!     text,
//!     "Program:\n├╴class\n├╴Identifier: Greeter\n└╴Body:\n  ├╴{\n  ├╴Comment: '''\n  \
//!      │   a⮐\n  │   b\n  │   '''\n  └╴}"
//! );
//! ```
//!
//! # Pieces
//!
//! 1. [`RenderStream`] walks the tree lazily and produces [`Line`]s of [`Segment`]s. A
//!    [`VisibilityFilter`] decides per node whether it is hidden, shown or collapsed.
//! 2. [`Theme`] maps the semantic roles (names, source text, connectors, ...) to colors.
//! 3. [`ColorWriter`] turns segments into text. It only writes a color directive when
//!    the color actually changed, using ANSI escape sequences for a terminal or `%c`
//!    placeholders with CSS declarations for a script console.
//! 4. [`render`] ties it together, flushing either once per tree or once per line to an
//!    [`OutputSurface`].
//!
//! # Colors
//!
//! [`Color`] has three encodings (4-bit, 256-color and RGB), and [`TransformColor`]
//! converts between them. On a terminal, [`global_color_support`] decides how much color
//! is available. RGB colors are degraded to the 256-color palette when needed, and
//! `NO_COLOR` turns colors off altogether.
//!
//! # Trees
//!
//! Any tree can be rendered by implementing [`TreeCursor`]. [`SyntaxTreeBuilder`] builds
//! an in-memory [`SyntaxTree`] for callers without one.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod ansi_escape_codes;
pub mod color;
pub mod color_state;
pub mod detect_color_support;
pub mod detect_platform;
pub mod error;
pub mod render;
pub mod render_stream;
pub mod theme;
pub mod transform_color;
pub mod tree_arena;
pub mod tree_cursor;
pub mod visibility;
pub mod writer;

// Re-export.
pub use ansi_escape_codes::*;
pub use color::*;
pub use color_state::*;
pub use detect_color_support::*;
pub use detect_platform::*;
pub use error::*;
pub use render::*;
pub use render_stream::*;
pub use theme::*;
pub use transform_color::*;
pub use tree_arena::*;
pub use tree_cursor::*;
pub use visibility::*;
pub use writer::*;
