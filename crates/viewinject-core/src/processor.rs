use crate::{
    collect::{CollectStats, collect},
    config::{ConfigError, GeneratorConfig},
    emit::{Emitter, GeneratedSource},
    host::{Diagnostic, Filer, Messager, ProcessingEnvironment, RoundEnvironment, SourceVersion},
    marker::MarkerKind,
    registry::ProxyRegistry,
};
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// InitError
///

#[derive(Debug, ThisError)]
pub enum InitError {
    #[error("host did not provide a filer")]
    MissingFiler,

    #[error("host did not provide a messager")]
    MissingMessager,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

///
/// RoundOutcome
///
/// What one call to [`ViewInjectProcessor::process`] did.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub round: usize,
    pub collected: CollectStats,
    pub generated: Vec<GeneratedSource>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl RoundOutcome {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.collected.rejected == 0 && self.skipped.is_empty() && self.failed.is_empty()
    }
}

///
/// ViewInjectProcessor
///
/// Round entry point. Owns the host's filer and messager for its lifetime
/// and a registry that is only populated while a round is running.
///

#[derive(Debug)]
pub struct ViewInjectProcessor<F, M> {
    filer: F,
    messager: M,
    emitter: Emitter,
    registry: ProxyRegistry,
    rounds: usize,
}

impl<F, M> ViewInjectProcessor<F, M>
where
    F: Filer,
    M: Messager,
{
    /// Take the host's facilities. Failing to obtain either is fatal.
    pub fn init<E>(env: &mut E, config: GeneratorConfig) -> Result<Self, InitError>
    where
        E: ProcessingEnvironment<Filer = F, Messager = M> + ?Sized,
    {
        config.validate()?;

        let filer = env.filer().ok_or(InitError::MissingFiler)?;
        let messager = env.messager().ok_or(InitError::MissingMessager)?;
        let source_version = env.latest_source_version();

        tracing::debug!(%source_version, suffix = %config.class_suffix, "processor initialised");

        Ok(Self {
            filer,
            messager,
            emitter: Emitter::new(config, source_version),
            registry: ProxyRegistry::new(),
            rounds: 0,
        })
    }

    #[must_use]
    pub const fn supported_markers() -> [MarkerKind; 2] {
        MarkerKind::ALL
    }

    #[must_use]
    pub const fn supported_source_version(&self) -> SourceVersion {
        self.emitter.source_version()
    }

    /// Run one round: collect everything, then emit one file per model.
    /// Failures are reported per element or per model; the round always
    /// completes and leaves the registry empty.
    pub fn process<R: RoundEnvironment + ?Sized>(&mut self, round: &R) -> RoundOutcome {
        self.registry.clear();
        self.rounds += 1;

        let mut outcome = RoundOutcome {
            round: self.rounds,
            ..RoundOutcome::default()
        };

        self.messager.print_message(Diagnostic::note(format!(
            "viewinject round {}{}",
            self.rounds,
            if round.processing_over() { " (final)" } else { "" }
        )));

        outcome.collected = collect(round, &mut self.registry, &mut self.messager);

        for model in self.registry.drain() {
            if model.has_conflicts() {
                for conflict in model.conflicts() {
                    self.messager
                        .print_message(Diagnostic::error(conflict.to_string()).on_class(model.owner()));
                }
                outcome.skipped.push(model.owner_name().to_string());
                continue;
            }

            match self.emitter.emit(&model, &mut self.filer) {
                Ok(generated) => outcome.generated.push(generated),
                Err(err) => {
                    tracing::debug!(owner = model.owner_name(), %err, "emission failed");
                    self.messager
                        .print_message(Diagnostic::error(err.to_string()).on_class(model.owner()));
                    outcome.failed.push(model.owner_name().to_string());
                }
            }
        }

        tracing::debug!(
            round = outcome.round,
            generated = outcome.generated.len(),
            skipped = outcome.skipped.len(),
            failed = outcome.failed.len(),
            "round complete"
        );

        outcome
    }

    #[must_use]
    pub const fn registry(&self) -> &ProxyRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn filer(&self) -> &F {
        &self.filer
    }

    #[must_use]
    pub const fn messager(&self) -> &M {
        &self.messager
    }

    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Give the host facilities back.
    pub fn into_parts(self) -> (F, M) {
        (self.filer, self.messager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{
        Level,
        memory::{MemoryEnvironment, MemoryFiler, MemoryMessager, MemoryRound},
    };

    #[test]
    fn init_fails_without_facilities() {
        let no_filer = ViewInjectProcessor::init(
            &mut MemoryEnvironment::without_filer(),
            GeneratorConfig::default(),
        );
        assert!(matches!(no_filer, Err(InitError::MissingFiler)));

        let no_messager = ViewInjectProcessor::init(
            &mut MemoryEnvironment::without_messager(),
            GeneratorConfig::default(),
        );
        assert!(matches!(no_messager, Err(InitError::MissingMessager)));
    }

    #[test]
    fn init_rejects_invalid_config() {
        let config = GeneratorConfig {
            indent: 0,
            ..GeneratorConfig::default()
        };

        let result = ViewInjectProcessor::init(&mut MemoryEnvironment::new(), config);
        assert!(matches!(result, Err(InitError::Config(_))));
    }

    #[test]
    fn every_round_starts_with_a_note() {
        let mut processor =
            ViewInjectProcessor::init(&mut MemoryEnvironment::new(), GeneratorConfig::default())
                .expect("init should succeed");

        processor.process(&MemoryRound::default());
        let outcome = processor.process(&MemoryRound::final_round());

        assert_eq!(outcome.round, 2);
        assert!(outcome.is_clean());
        let notes: Vec<_> = processor
            .messager()
            .at_level(Level::Note)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(notes, ["viewinject round 1", "viewinject round 2 (final)"]);
    }

    #[test]
    fn supported_version_follows_host() {
        let mut env = MemoryEnvironment::new().with_source_version(SourceVersion::RELEASE_7);
        let processor = ViewInjectProcessor::init(&mut env, GeneratorConfig::default())
            .expect("init should succeed");

        assert_eq!(processor.supported_source_version(), SourceVersion::RELEASE_7);
        assert_eq!(
            ViewInjectProcessor::<MemoryFiler, MemoryMessager>::supported_markers(),
            [MarkerKind::BindView, MarkerKind::OnClick]
        );
    }
}
