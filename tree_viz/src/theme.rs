// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Color, Platform, vsc};

/// The color of each semantic role in a rendered tree. Resolved once per render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Node names.
    pub name: Color,
    /// Text taken from the source.
    pub source: Color,
    /// Box drawing connectors.
    pub tree: Color,
    /// The `'''` around multi-line text.
    pub block_quotes: Color,
    /// The `⮐` at the end of each multi-line row but the last.
    pub block_return: Color,
    pub colon: Color,
    /// The `…` standing in for a collapsed subtree.
    pub ellipsis: Color,
}

/// A partial [`Theme`]. Every role that is `Some` replaces the base theme's color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeOverride {
    pub name: Option<Color>,
    pub source: Option<Color>,
    pub tree: Option<Color>,
    pub block_quotes: Option<Color>,
    pub block_return: Option<Color>,
    pub colon: Option<Color>,
    pub ellipsis: Option<Color>,
}

impl Theme {
    /// 4-bit palette colors, which every color capable terminal supports.
    #[must_use]
    pub const fn terminal() -> Self {
        Self {
            name: Color::BRIGHT_CYAN,
            source: Color::DARK_YELLOW,
            tree: Color::DARK_GRAY,
            block_quotes: Color::LIGHT_GRAY,
            block_return: Color::DARK_GRAY,
            colon: Color::LIGHT_GRAY,
            ellipsis: Color::DARK_GRAY,
        }
    }

    /// The same roles in the RGB palette of the VS Code console.
    #[must_use]
    pub const fn script_console() -> Self {
        Self {
            name: vsc::BRIGHT_CYAN,
            source: vsc::DARK_YELLOW,
            tree: vsc::DARK_GRAY,
            block_quotes: vsc::LIGHT_GRAY,
            block_return: vsc::DARK_GRAY,
            colon: vsc::LIGHT_GRAY,
            ellipsis: vsc::DARK_GRAY,
        }
    }

    #[must_use]
    pub const fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Terminal => Self::terminal(),
            Platform::ScriptConsole => Self::script_console(),
        }
    }

    #[must_use]
    pub fn with_overrides(self, overrides: ThemeOverride) -> Self {
        Self {
            name: overrides.name.unwrap_or(self.name),
            source: overrides.source.unwrap_or(self.source),
            tree: overrides.tree.unwrap_or(self.tree),
            block_quotes: overrides.block_quotes.unwrap_or(self.block_quotes),
            block_return: overrides.block_return.unwrap_or(self.block_return),
            colon: overrides.colon.unwrap_or(self.colon),
            ellipsis: overrides.ellipsis.unwrap_or(self.ellipsis),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::terminal() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn platform_picks_matching_palette() {
        assert_eq!(Theme::for_platform(Platform::Terminal), Theme::terminal());
        assert_eq!(
            Theme::for_platform(Platform::ScriptConsole).name,
            vsc::BRIGHT_CYAN
        );
    }

    #[test]
    fn overrides_replace_only_given_roles() {
        let theme = Theme::terminal().with_overrides(ThemeOverride {
            name: Some(Color::MAGENTA),
            ellipsis: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        });
        assert_eq!(
            theme,
            Theme {
                name: Color::MAGENTA,
                ellipsis: Color::rgb(1, 2, 3),
                ..Theme::terminal()
            }
        );
    }

    #[test]
    fn empty_override_is_identity() {
        assert_eq!(
            Theme::script_console().with_overrides(ThemeOverride::default()),
            Theme::script_console()
        );
    }
}
