// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::atomic::{AtomicI8, Ordering};

use strum_macros::{Display, EnumString};

/// The surface that rendered output is flushed to. It decides which color encoding the
/// default writer uses and which built-in theme applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Platform {
    /// A text terminal that understands ANSI escape sequences.
    #[default]
    Terminal,
    /// A script console (eg: browser devtools) that styles `%c` placeholders with CSS.
    ScriptConsole,
}

/// Resolves the [`Platform`] once per render call: an explicit override wins, otherwise
/// `wasm` targets run inside a script console and everything else is a terminal.
pub mod global_platform {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    static PLATFORM_GLOBAL: AtomicI8 = AtomicI8::new(NOT_SET_VALUE);
    const NOT_SET_VALUE: i8 = -1;

    #[must_use]
    pub fn detect() -> Platform {
        match try_get_override() {
            Ok(it) => it,
            Err(()) => from_target(),
        }
    }

    /// Use the `#[serial]` attribute in any test that calls this.
    pub fn set_override(value: Platform) {
        PLATFORM_GLOBAL.store(i8::from(value), Ordering::Release);
    }

    pub fn clear_override() { PLATFORM_GLOBAL.store(NOT_SET_VALUE, Ordering::Release); }

    /// # Errors
    ///
    /// Returns `Err(())` if no override value has been set.
    #[allow(clippy::result_unit_err)]
    pub fn try_get_override() -> Result<Platform, ()> {
        Platform::try_from(PLATFORM_GLOBAL.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn from_target() -> Platform {
        if cfg!(target_family = "wasm") {
            Platform::ScriptConsole
        } else {
            Platform::Terminal
        }
    }
}

mod convert_between_platform_and_i8 {
    use super::Platform;

    impl TryFrom<i8> for Platform {
        type Error = ();

        fn try_from(value: i8) -> Result<Self, Self::Error> {
            match value {
                1 => Ok(Platform::Terminal),
                2 => Ok(Platform::ScriptConsole),
                _ => Err(()),
            }
        }
    }

    impl From<Platform> for i8 {
        fn from(value: Platform) -> Self {
            match value {
                Platform::Terminal => 1,
                Platform::ScriptConsole => 2,
            }
        }
    }
}
