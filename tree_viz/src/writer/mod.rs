// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod color_writer;
pub mod output_surface;
pub mod styled_writer;

// Re-export.
pub use color_writer::*;
pub use output_surface::*;
pub use styled_writer::*;
