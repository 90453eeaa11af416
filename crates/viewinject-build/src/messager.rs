use viewinject_core::host::{Diagnostic, Level, Messager};

///
/// TracingMessager
///
/// Forwards diagnostics to `tracing` at the matching level and keeps them
/// for the build report.
///

#[derive(Debug, Default)]
pub struct TracingMessager {
    diagnostics: Vec<Diagnostic>,
}

impl TracingMessager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Messager for TracingMessager {
    fn print_message(&mut self, diagnostic: Diagnostic) {
        let subject = diagnostic.subject.as_deref().unwrap_or_default();

        match diagnostic.level {
            Level::Note => tracing::info!(subject, "{diagnostic}"),
            Level::Warning => tracing::warn!(subject, "{diagnostic}"),
            Level::Error => tracing::error!(subject, "{diagnostic}"),
        }

        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_level() {
        let mut messager = TracingMessager::new();

        messager.print_message(Diagnostic::note("round 1"));
        messager.print_message(Diagnostic::error("bad"));
        messager.print_message(Diagnostic::error("worse"));

        assert_eq!(messager.count(Level::Error), 2);
        assert_eq!(messager.count(Level::Warning), 0);
        assert_eq!(messager.into_diagnostics().len(), 3);
    }
}
