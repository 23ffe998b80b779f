// Copyright (c) 2023-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! More info:
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code#3-bit_and_4-bit>
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code#8-bit>
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code#24-bit>
//! - <https://commons.wikimedia.org/wiki/File:Xterm_256color_chart.svg>

use crate::{CommonResult, TreeVizError};

/// A color in one of three encodings.
///
/// Equality is structural and never crosses encodings: `Color::WHITE` (4-bit index 15)
/// is not equal to `Color::Rgb((255, 255, 255).into())`, even though both draw the same
/// pixels. The writer relies on this to decide whether a color actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Ansi16(Ansi16Color),
    Ansi256(Ansi256Color),
    Rgb(RgbColor),
}

/// A 4-bit terminal palette index, always in `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ansi16Color(u8);

/// An index into the 256-color palette: `0..16` reuse the 4-bit palette, `16..232` are a
/// 6×6×6 cube, and `232..=255` are a 24 step grayscale ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ansi256Color {
    pub index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

mod ansi16_color_impl {
    use super::*;

    impl Ansi16Color {
        /// # Errors
        ///
        /// Returns [`TreeVizError::InvalidAnsi16Index`] if `index` is above 15.
        pub fn try_new(index: u8) -> CommonResult<Self> { Ok(Self::try_from(index)?) }

        #[must_use]
        pub const fn index(self) -> u8 { self.0 }

        /// Splits the color into its 3-bit value and the bright bit.
        /// - <https://en.wikipedia.org/wiki/ANSI_escape_code#3-bit_and_4-bit>
        #[must_use]
        pub const fn to_3bit(self) -> (u8, bool) { (self.0 % 8, self.0 >= 8) }
    }

    impl TryFrom<u8> for Ansi16Color {
        type Error = TreeVizError;

        fn try_from(index: u8) -> Result<Self, Self::Error> {
            if index < 16 {
                Ok(Self(index))
            } else {
                Err(TreeVizError::InvalidAnsi16Index { index })
            }
        }
    }
}

mod rgb_color_impl {
    use super::*;

    impl RgbColor {
        #[must_use]
        pub const fn new(red: u8, green: u8, blue: u8) -> Self { Self { red, green, blue } }
    }

    impl From<(u8, u8, u8)> for RgbColor {
        fn from((red, green, blue): (u8, u8, u8)) -> Self { Self::new(red, green, blue) }
    }
}

mod color_impl {
    use super::*;

    impl Color {
        pub const BLACK: Color = Color::Ansi16(Ansi16Color(0));
        pub const DARK_RED: Color = Color::Ansi16(Ansi16Color(1));
        pub const DARK_GREEN: Color = Color::Ansi16(Ansi16Color(2));
        pub const DARK_YELLOW: Color = Color::Ansi16(Ansi16Color(3));
        pub const DARK_BLUE: Color = Color::Ansi16(Ansi16Color(4));
        pub const DARK_MAGENTA: Color = Color::Ansi16(Ansi16Color(5));
        pub const DARK_CYAN: Color = Color::Ansi16(Ansi16Color(6));
        pub const LIGHT_GRAY: Color = Color::Ansi16(Ansi16Color(7));
        pub const DARK_GRAY: Color = Color::Ansi16(Ansi16Color(8));
        pub const RED: Color = Color::Ansi16(Ansi16Color(9));
        pub const GREEN: Color = Color::Ansi16(Ansi16Color(10));
        pub const YELLOW: Color = Color::Ansi16(Ansi16Color(11));
        pub const BLUE: Color = Color::Ansi16(Ansi16Color(12));
        pub const MAGENTA: Color = Color::Ansi16(Ansi16Color(13));
        pub const BRIGHT_CYAN: Color = Color::Ansi16(Ansi16Color(14));
        pub const WHITE: Color = Color::Ansi16(Ansi16Color(15));

        /// # Errors
        ///
        /// Returns [`TreeVizError::InvalidAnsi16Index`] if `index` is above 15.
        pub fn ansi16(index: u8) -> CommonResult<Self> {
            Ansi16Color::try_new(index).map(Color::Ansi16)
        }

        #[must_use]
        pub const fn ansi256(index: u8) -> Self { Color::Ansi256(Ansi256Color { index }) }

        #[must_use]
        pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
            Color::Rgb(RgbColor::new(red, green, blue))
        }

        /// Compares two optional colors the way the writer does when deciding whether a
        /// side changed. `None` (surface default) only equals `None`, and colors of
        /// different encodings are never equal.
        #[must_use]
        pub fn same_encoding_eq(lhs: Option<Color>, rhs: Option<Color>) -> bool {
            match (lhs, rhs) {
                (None, None) => true,
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => false,
            }
        }
    }

    impl From<Ansi16Color> for Color {
        fn from(it: Ansi16Color) -> Self { Color::Ansi16(it) }
    }

    impl From<Ansi256Color> for Color {
        fn from(it: Ansi256Color) -> Self { Color::Ansi256(it) }
    }

    impl From<RgbColor> for Color {
        fn from(it: RgbColor) -> Self { Color::Rgb(it) }
    }
}

/// The Visual Studio Code integrated console palette. Script consoles style text with
/// CSS, so these are RGB values rather than palette indices.
pub mod vsc {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const DARK_RED: Color = Color::rgb(205, 49, 49);
    pub const DARK_GREEN: Color = Color::rgb(13, 188, 121);
    pub const DARK_YELLOW: Color = Color::rgb(229, 229, 16);
    pub const DARK_BLUE: Color = Color::rgb(36, 114, 200);
    pub const DARK_MAGENTA: Color = Color::rgb(188, 63, 188);
    pub const DARK_CYAN: Color = Color::rgb(17, 168, 205);
    pub const LIGHT_GRAY: Color = Color::rgb(229, 229, 229);
    pub const DARK_GRAY: Color = Color::rgb(102, 102, 102);
    pub const RED: Color = Color::rgb(241, 76, 76);
    pub const GREEN: Color = Color::rgb(35, 209, 139);
    pub const YELLOW: Color = Color::rgb(245, 245, 67);
    pub const BLUE: Color = Color::rgb(59, 142, 234);
    pub const MAGENTA: Color = Color::rgb(214, 112, 214);
    pub const BRIGHT_CYAN: Color = Color::rgb(41, 184, 219);
    pub const WHITE: Color = Color::rgb(229, 229, 229);
}
