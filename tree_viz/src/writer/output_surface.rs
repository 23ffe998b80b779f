// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{cell::RefCell,
          fmt::Debug,
          io::{Write, stdout},
          rc::Rc};

use miette::IntoDiagnostic;

use crate::{CommonResult, SCRIPT_CONSOLE_PLACEHOLDER};

/// Where a writer's buffer ends up on flush. One call to [`OutputSurface::log`] is one
/// console call: the text, plus the style declarations for its `%c` placeholders.
///
/// When `styles` is not empty the text is a console format string: each `%c` takes the
/// next style and `%%` stands for a literal `%`. Otherwise the text is literal.
pub trait OutputSurface: Debug {
    /// # Errors
    ///
    /// Returns an error if the text can't be written.
    fn log(&mut self, text: &str, styles: &[String]) -> CommonResult<()>;
}

/// Prints each call as one line on stdout. Style placeholders are dropped since a plain
/// stream has no way to apply them.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSurface;

impl OutputSurface for StdoutSurface {
    fn log(&mut self, text: &str, styles: &[String]) -> CommonResult<()> {
        let text = if styles.is_empty() {
            text.to_string()
        } else {
            strip_style_placeholders(text)
        };
        let mut handle = stdout().lock();
        writeln!(handle, "{text}").into_diagnostic()?;
        handle.flush().into_diagnostic()
    }
}

/// Turns a console format string into the text a console would show, with the `%c`
/// placeholders dropped and `%%` read back as `%`.
///
/// ```rust
/// use r3bl_tree_viz::strip_style_placeholders;
///
/// assert_eq!(strip_style_placeholders("%cfmt: %%c%c!"), "fmt: %c!");
/// ```
#[must_use]
pub fn strip_style_placeholders(text: &str) -> String {
    let mut acc = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(index) = rest.find('%') {
        acc.push_str(&rest[..index]);
        let tail = &rest[index..];
        rest = if let Some(after) = tail.strip_prefix(SCRIPT_CONSOLE_PLACEHOLDER) {
            after
        } else if let Some(after) = tail.strip_prefix("%%") {
            acc.push('%');
            after
        } else {
            acc.push('%');
            &tail[1..]
        };
    }
    acc.push_str(rest);
    acc
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsoleCall {
    pub text: String,
    pub styles: Vec<String>,
}

/// Keeps every call in memory. Clones share the same log, so keep one handle and give
/// the other to the writer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Rc<RefCell<Vec<ConsoleCall>>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn calls(&self) -> Vec<ConsoleCall> { self.calls.borrow().clone() }

    /// The text of every call, one per line.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputSurface for RecordingSurface {
    fn log(&mut self, text: &str, styles: &[String]) -> CommonResult<()> {
        self.calls.borrow_mut().push(ConsoleCall {
            text: text.to_string(),
            styles: styles.to_vec(),
        });
        Ok(())
    }
}
