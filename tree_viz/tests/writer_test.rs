// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use pretty_assertions::assert_eq;
use r3bl_tree_viz::{Color, ColorSupport, ColorWriter, Encoding, RecordingSurface,
                    StyledWriter, TransformColor, vsc};
use test_case::test_case;

enum Step {
    Fg(Color),
    Bg(Color),
    Reset(bool, bool),
    Push(&'static str),
}

fn run(writer: &mut dyn StyledWriter, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Fg(color) => writer.fg(*color),
            Step::Bg(color) => writer.bg(*color),
            Step::Reset(fg, bg) => writer.reset_color(*fg, *bg),
            Step::Push(text) => writer.push(text),
        }
    }
}

fn script() -> Vec<Step> {
    vec![
        Step::Fg(Color::RED),
        Step::Push("a"),
        Step::Push("b"),
        Step::Fg(Color::RED),
        Step::Push("c"),
        Step::Bg(Color::DARK_BLUE),
        Step::Push("d"),
        Step::Fg(Color::rgb(255, 0, 0)),
        Step::Push("e"),
        Step::Reset(true, true),
        Step::Push("f"),
        Step::Push("g"),
    ]
}

#[test_case(Encoding::Terminal(ColorSupport::Truecolor), "\x1b[", 4)]
#[test_case(Encoding::ScriptConsole, "%c", 4)]
#[test_case(Encoding::Plain, "\x1b[", 0)]
fn directive_count_matches_color_changes(encoding: Encoding, marker: &str, expected: usize) {
    let mut writer = ColorWriter::new(encoding);
    run(&mut writer, &script());
    assert_eq!(writer.as_text().matches(marker).count(), expected);
    assert!(writer.as_text().ends_with("fg"));
}

#[test]
fn terminal_script_produces_expected_bytes() {
    let mut writer = ColorWriter::new(Encoding::Terminal(ColorSupport::Truecolor));
    run(&mut writer, &script());
    assert_eq!(
        writer.as_text(),
        "\x1b[91mabc\x1b[44md\x1b[38;2;255;0;0me\x1b[mfg"
    );
}

#[test]
fn script_console_script_produces_expected_styles() {
    let recorder = RecordingSurface::new();
    let mut writer =
        ColorWriter::with_surface(Encoding::ScriptConsole, Box::new(recorder.clone()));
    run(&mut writer, &script());
    writer.flush().unwrap();
    let calls = recorder.calls();
    assert_eq!(calls[0].text, "%cabc%cd%ce%cfg");
    assert_eq!(
        calls[0].styles,
        vec![
            "color:rgb(255,0,0)",
            "color:rgb(255,0,0);background:rgb(0,0,128)",
            "color:rgb(255,0,0);background:rgb(0,0,128)",
            "",
        ]
    );
}

#[test]
fn cleared_writer_can_be_reused() {
    let recorder = RecordingSurface::new();
    let mut writer = ColorWriter::with_surface(
        Encoding::Terminal(ColorSupport::Truecolor),
        Box::new(recorder.clone()),
    );
    writer.fg(Color::GREEN);
    writer.push("one");
    writer.flush().unwrap();
    writer.clear();
    writer.push("two");
    writer.flush().unwrap();
    assert_eq!(recorder.calls()[0].text, "\x1b[92mone\x1b[m");
    assert_eq!(recorder.calls()[1].text, "\x1b[92;49mtwo\x1b[m");
}

#[test]
fn vsc_palette_is_rgb_everywhere() {
    for color in [vsc::BRIGHT_CYAN, vsc::DARK_YELLOW, vsc::DARK_GRAY, vsc::LIGHT_GRAY] {
        assert!(matches!(color, Color::Rgb(_)));
        assert_eq!(Color::from(color.as_rgb()), color);
    }
}
