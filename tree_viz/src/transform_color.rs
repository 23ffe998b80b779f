// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Conversions between the three color encodings.
//!
//! The 256-color palette is decoded with evenly spaced channel levels: the 6×6×6 cube
//! uses [`SHADE_6`] (`round(i * 255 / 5)`) and the grayscale ramp uses [`SHADE_24`]
//! (`round(i * 255 / 23)`).

use crate::{Ansi16Color, Ansi256Color, Color, RgbColor};

pub trait TransformColor {
    /// Returns a [`RgbColor`] representation of the `self` color.
    fn as_rgb(&self) -> RgbColor;

    /// Returns the index of a color in 256-color ANSI palette approximating the `self`
    /// color.
    fn as_ansi256(&self) -> Ansi256Color;

    /// Returns the index of a color in the grayscale ramp of the 256-color ANSI palette
    /// approximating the `self` color.
    fn as_grayscale(&self) -> Ansi256Color {
        let RgbColor { red, green, blue } = self.as_rgb();
        let average = (u16::from(red) + u16::from(green) + u16::from(blue)) / 3;
        let (gray_index, _) = nearest_level(&SHADE_24, average);
        Ansi256Color {
            index: GRAYSCALE_START + gray_index,
        }
    }
}

pub mod palette {
    use super::RgbColor;

    /// The 16 colors of the 4-bit palette: 8 dark followed by 8 bright.
    pub const PALETTE_4BIT: [RgbColor; 16] = [
        // Dark.
        RgbColor::new(0, 0, 0),
        RgbColor::new(128, 0, 0),
        RgbColor::new(0, 128, 0),
        RgbColor::new(128, 128, 0),
        RgbColor::new(0, 0, 128),
        RgbColor::new(128, 0, 128),
        RgbColor::new(0, 128, 128),
        RgbColor::new(192, 192, 192),
        // Bright.
        RgbColor::new(128, 128, 128),
        RgbColor::new(255, 0, 0),
        RgbColor::new(0, 255, 0),
        RgbColor::new(255, 255, 0),
        RgbColor::new(0, 0, 255),
        RgbColor::new(255, 0, 255),
        RgbColor::new(0, 255, 255),
        RgbColor::new(255, 255, 255),
    ];
}
pub use palette::PALETTE_4BIT;

/// Channel levels of the 6×6×6 color cube.
pub const SHADE_6: [u8; 6] = shade_table::<6>();

/// Levels of the 24 step grayscale ramp.
pub const SHADE_24: [u8; 24] = shade_table::<24>();

const CUBE_START: u8 = 16;
const GRAYSCALE_START: u8 = 232;

/// `table[i] = round(i * 255 / (N - 1))`, rounding halves up.
#[allow(clippy::cast_possible_truncation)]
const fn shade_table<const N: usize>() -> [u8; N] {
    let mut table = [0_u8; N];
    let steps = (N - 1) as u32;
    let mut i = 0;
    while i < N {
        table[i] = ((2 * i as u32 * 255 + steps) / (2 * steps)) as u8;
        i += 1;
    }
    table
}

/// Returns `(index, level)` of the entry in `levels` closest to `value`.
#[allow(clippy::cast_possible_truncation)]
fn nearest_level(levels: &[u8], value: u16) -> (u8, u8) {
    let mut best = (0_u8, levels[0]);
    for (index, level) in levels.iter().enumerate() {
        if u16::from(*level).abs_diff(value) < u16::from(best.1).abs_diff(value) {
            best = (index as u8, *level);
        }
    }
    best
}

fn distance_squared(lhs: RgbColor, rhs: RgbColor) -> u32 {
    let channel = |a: u8, b: u8| u32::from(a.abs_diff(b)).pow(2);
    channel(lhs.red, rhs.red) + channel(lhs.green, rhs.green) + channel(lhs.blue, rhs.blue)
}

/// Finds the closest entry of the 256-color palette for an RGB color, choosing between
/// the color cube and the grayscale ramp. Ties go to the cube.
#[must_use]
pub fn convert_rgb_into_ansi256(rgb: RgbColor) -> Ansi256Color {
    let (red_index, red) = nearest_level(&SHADE_6, u16::from(rgb.red));
    let (green_index, green) = nearest_level(&SHADE_6, u16::from(rgb.green));
    let (blue_index, blue) = nearest_level(&SHADE_6, u16::from(rgb.blue));
    let cube = Ansi256Color {
        index: CUBE_START + 36 * red_index + 6 * green_index + blue_index,
    };
    let cube_distance = distance_squared(rgb, RgbColor::new(red, green, blue));

    let gray = rgb.as_grayscale();
    let gray_distance = distance_squared(rgb, gray.as_rgb());

    if gray_distance < cube_distance { gray } else { cube }
}

impl TransformColor for RgbColor {
    fn as_rgb(&self) -> RgbColor { *self }

    fn as_ansi256(&self) -> Ansi256Color { convert_rgb_into_ansi256(*self) }
}

impl TransformColor for Ansi16Color {
    fn as_rgb(&self) -> RgbColor { PALETTE_4BIT[usize::from(self.index())] }

    fn as_ansi256(&self) -> Ansi256Color {
        Ansi256Color {
            index: self.index(),
        }
    }
}

impl TransformColor for Ansi256Color {
    fn as_rgb(&self) -> RgbColor {
        match self.index {
            index if index < CUBE_START => PALETTE_4BIT[usize::from(index)],
            index if index >= GRAYSCALE_START => {
                let shade = SHADE_24[usize::from(index - GRAYSCALE_START)];
                RgbColor::new(shade, shade, shade)
            }
            index => {
                let offset = usize::from(index - CUBE_START);
                RgbColor::new(
                    SHADE_6[offset / 36],
                    SHADE_6[(offset / 6) % 6],
                    SHADE_6[offset % 6],
                )
            }
        }
    }

    fn as_ansi256(&self) -> Ansi256Color { *self }
}

impl TransformColor for Color {
    fn as_rgb(&self) -> RgbColor {
        match self {
            Color::Ansi16(it) => it.as_rgb(),
            Color::Ansi256(it) => it.as_rgb(),
            Color::Rgb(it) => it.as_rgb(),
        }
    }

    fn as_ansi256(&self) -> Ansi256Color {
        match self {
            Color::Ansi16(it) => it.as_ansi256(),
            Color::Ansi256(it) => it.as_ansi256(),
            Color::Rgb(it) => it.as_ansi256(),
        }
    }
}
