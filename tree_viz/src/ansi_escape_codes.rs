// Copyright (c) 2023-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! More info:
//! - <https://doc.rust-lang.org/reference/tokens.html#ascii-escapes>
//! - <https://notes.burke.libbey.me/ansi-escape-codes/>
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code#SGR_(Select_Graphic_Rendition)_parameters>

use std::fmt::{Display, Formatter, Result};

use smallvec::SmallVec;

pub const CSI: &str = "\x1b[";
pub const SGR: &str = "m";

/// Resets every attribute. This is the empty parameter form, `ESC[m`.
pub const SGR_RESET_STR: &str = "\x1b[m";

/// One parameter of an SGR (select graphic rendition) sequence. Several parameters are
/// combined into a single [`SgrSequence`] so that a change to both foreground and
/// background costs one escape sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SgrParam {
    /// Empty parameter, equivalent to `0`.
    Reset,
    /// `30..=37` or `90..=97`.
    ForegroundBasic(u8),
    /// `40..=47` or `100..=107`.
    BackgroundBasic(u8),
    ForegroundAnsi256(u8),
    BackgroundAnsi256(u8),
    ForegroundRGB(u8, u8, u8),
    BackgroundRGB(u8, u8, u8),
    /// `39`.
    DefaultForeground,
    /// `49`.
    DefaultBackground,
}

/// Maximum number of parameters the writer ever puts in one sequence: one per color side.
pub const MAX_SGR_PARAMS: usize = 2;

pub type InlineVecSgrParams = SmallVec<[SgrParam; MAX_SGR_PARAMS]>;

/// A complete `ESC[<params>m` sequence with its parameters joined by `;`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SgrSequence {
    pub params: InlineVecSgrParams,
}

mod sgr_param_impl {
    use super::*;

    impl Display for SgrParam {
        #[rustfmt::skip]
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match *self {
                SgrParam::Reset                    => Ok(()),
                SgrParam::ForegroundBasic(code)    => write!(f, "{code}"),
                SgrParam::BackgroundBasic(code)    => write!(f, "{code}"),
                SgrParam::ForegroundAnsi256(index) => write!(f, "38;5;{index}"),
                SgrParam::BackgroundAnsi256(index) => write!(f, "48;5;{index}"),
                SgrParam::ForegroundRGB(r, g, b)   => write!(f, "38;2;{r};{g};{b}"),
                SgrParam::BackgroundRGB(r, g, b)   => write!(f, "48;2;{r};{g};{b}"),
                SgrParam::DefaultForeground        => write!(f, "39"),
                SgrParam::DefaultBackground        => write!(f, "49"),
            }
        }
    }
}

mod sgr_sequence_impl {
    use super::*;

    impl SgrSequence {
        pub fn push(&mut self, param: SgrParam) { self.params.push(param); }

        #[must_use]
        pub fn is_empty(&self) -> bool { self.params.is_empty() }
    }

    impl Display for SgrSequence {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            write!(f, "{CSI}")?;
            for (index, param) in self.params.iter().enumerate() {
                if index > 0 {
                    write!(f, ";")?;
                }
                write!(f, "{param}")?;
            }
            write!(f, "{SGR}")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use super::*;

    fn sequence(params: InlineVecSgrParams) -> String { SgrSequence { params }.to_string() }

    #[test]
    fn reset() {
        assert_eq!(sequence(smallvec![SgrParam::Reset]), SGR_RESET_STR);
    }

    #[test]
    fn fg_basic() {
        assert_eq!(sequence(smallvec![SgrParam::ForegroundBasic(91)]), "\x1b[91m");
    }

    #[test]
    fn fg_and_bg_basic_share_one_sequence() {
        assert_eq!(
            sequence(smallvec![
                SgrParam::ForegroundBasic(96),
                SgrParam::BackgroundBasic(44)
            ]),
            "\x1b[96;44m"
        );
    }

    #[test]
    fn fg_color_ansi256() {
        assert_eq!(
            sequence(smallvec![SgrParam::ForegroundAnsi256(150)]),
            "\x1b[38;5;150m"
        );
    }

    #[test]
    fn bg_color_ansi256() {
        assert_eq!(
            sequence(smallvec![SgrParam::BackgroundAnsi256(150)]),
            "\x1b[48;5;150m"
        );
    }

    #[test]
    fn fg_color_rgb() {
        assert_eq!(
            sequence(smallvec![SgrParam::ForegroundRGB(175, 215, 135)]),
            "\x1b[38;2;175;215;135m"
        );
    }

    #[test]
    fn bg_color_rgb() {
        assert_eq!(
            sequence(smallvec![SgrParam::BackgroundRGB(175, 215, 135)]),
            "\x1b[48;2;175;215;135m"
        );
    }

    #[test]
    fn default_sides() {
        assert_eq!(
            sequence(smallvec![
                SgrParam::DefaultForeground,
                SgrParam::DefaultBackground
            ]),
            "\x1b[39;49m"
        );
    }
}
