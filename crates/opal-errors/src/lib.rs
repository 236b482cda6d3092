//! Diagnostic data model.
//!
//! A [`Diagnostic`] has no position of its own; it travels with the syntax
//! node it was attached to. Pairing it with an absolute range happens in a
//! single aggregation pass over a positioned tree, which yields
//! [`SpannedDiagnostic`]s ready for rendering.

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Self::Warning => Level::Warning,
            Self::Error => Level::Error,
        }
    }
}

/// A position-free diagnostic, suitable for storing inside immutable,
/// structurally shared tree nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A diagnostic paired with the absolute source range of the node that
/// carried it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpannedDiagnostic {
    diagnostic: Diagnostic,
    range: TextRange,
}

impl SpannedDiagnostic {
    pub fn new(diagnostic: Diagnostic, range: TextRange) -> Self {
        Self { diagnostic, range }
    }

    pub fn severity(&self) -> Severity {
        self.diagnostic.severity()
    }

    pub fn message(&self) -> &str {
        self.diagnostic.message()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity().level();
        let message = level.title(self.message()).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}
