// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Renders a built-in syntax tree, to try out colors, filters and output modes.
//!
//! ```text
//! tviz --collapse Body
//! tviz --platform script-console --line-by-line
//! NO_COLOR=1 tviz --hide Comment --log-level debug
//! ```

use clap::Parser;
use r3bl_tree_viz::{CommonResult, NameFilter, NodeInfo, Platform, RenderOptions, fixtures,
                    render};
use tracing_core::LevelFilter;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "tviz")]
#[command(about = "🌳 Render a syntax tree as box-drawn, colorized text")]
#[command(version)]
#[command(next_line_help = true)]
pub struct CLIArg {
    #[arg(long, help = "Print without color directives.")]
    pub no_colors: bool,

    #[arg(long, help = "Flush once per line instead of once per tree.")]
    pub line_by_line: bool,

    #[arg(
        long,
        value_name = "terminal|script-console",
        help = "Encode colors for this platform instead of detecting it."
    )]
    pub platform: Option<Platform>,

    #[arg(long, value_name = "NAME", help = "Leave out nodes with this name.")]
    pub hide: Vec<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Show nodes with this name on one line, without their children."
    )]
    pub collapse: Vec<String>,

    #[arg(
        long,
        default_value = "off",
        help = "Log to stderr at this level (off, error, warn, info, debug, trace)."
    )]
    pub log_level: LevelFilter,
}

fn main() -> CommonResult<()> {
    let cli_arg = CLIArg::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli_arg.log_level)
        .init();

    let names = NameFilter::default()
        .hide_names(cli_arg.hide)
        .collapse_names(cli_arg.collapse);
    let filter = |node: &NodeInfo<'_>| names.decide(node);

    let tree = fixtures::class_declaration()?;
    let mut cursor = tree.cursor();
    render(
        &mut cursor,
        tree.source(),
        RenderOptions {
            colors: !cli_arg.no_colors,
            line_by_line: cli_arg.line_by_line,
            filter: Some(&filter),
            platform: cli_arg.platform,
            ..Default::default()
        },
    )
}
