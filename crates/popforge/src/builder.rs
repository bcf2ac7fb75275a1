//! Wires configuration into generator construction.

use popforge_config::PopForgeConfig;
use popforge_core::{PopForgeError, Projection, Result};
use popforge_ranking::{ExhaustiveAssignmentGenerator, GeneratorOptions};
use tracing::{debug, warn};

/// Builds an exhaustive generator for `projection` as `config` describes.
///
/// The projection is copied and normalized with the configured tolerance
/// before enumeration; the caller's projection is left untouched.
///
/// # Errors
///
/// Returns [`PopForgeError::Config`] when `config` fails validation, and any
/// construction error of [`ExhaustiveAssignmentGenerator`].
pub fn build_generator(
    projection: &Projection,
    config: &PopForgeConfig,
) -> Result<ExhaustiveAssignmentGenerator> {
    config
        .validate()
        .map_err(|err| PopForgeError::Config(err.to_string()))?;

    let mut normalized = projection.clone();
    let report = normalized.normalize(
        config.normalization.tolerance,
        config.normalization.sort_candidates,
    );
    if report.is_clean() {
        debug!(
            event = "normalized",
            projection = normalized.name(),
            lists = report.lists,
        );
    } else {
        warn!(
            event = "normalized",
            projection = normalized.name(),
            lists = report.lists,
            rescaled = report.rescaled,
            uniform_fallbacks = report.uniform_fallbacks,
            "Projection probabilities were adjusted"
        );
    }

    let options = GeneratorOptions {
        limit: config.exhaustive.trial_limit,
        prefetch: config.exhaustive.prefetch,
    };
    ExhaustiveAssignmentGenerator::with_options(&normalized, options)
}
