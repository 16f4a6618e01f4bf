use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use melif_dataset::{Feature, FeatureDataSet};
use rand::{Rng, SeedableRng as _};
use rand_distr::Normal;
use rand_pcg::Pcg64;

use crate::util::Output;

/// Gap between the class means of an informative feature, in noise units.
const SIGNAL: f64 = 3.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateDatasetArg {
    /// Number of features
    #[arg(long, default_value_t = 100)]
    features: usize,
    /// Number of labeled samples
    #[arg(long, default_value_t = 200)]
    samples: usize,
    /// How many of the features depend on the label
    #[arg(long, default_value_t = 10)]
    informative: usize,
    /// Standard deviation of the per-value noise
    #[arg(long, default_value_t = 1.0)]
    noise: f64,
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Dataset name
    #[arg(long, default_value = "synthetic")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateDatasetArg) -> anyhow::Result<()> {
    let GenerateDatasetArg {
        features,
        samples,
        informative,
        noise,
        seed,
        name,
        output,
    } = arg;
    ensure!(
        informative <= features,
        "cannot make {informative} of {features} features informative"
    );

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg64::seed_from_u64(seed);
    let dataset = generate(name, *features, *samples, *informative, *noise, &mut rng)?;
    Output::save_json(&dataset, output.clone())?;

    log::info!(
        "Generated dataset '{name}' with seed {seed}: {features} features ({informative} informative), {samples} samples"
    );
    if let Some(path) = output {
        log::info!("Dataset saved to {}", path.display());
    }
    Ok(())
}

/// Draws a two-class dataset.
///
/// Informative features come first and are shifted by [`SIGNAL`] for class 1;
/// the rest are pure noise.
#[expect(clippy::cast_possible_truncation)]
fn generate<R>(
    name: &str,
    features: usize,
    samples: usize,
    informative: usize,
    noise: f64,
    rng: &mut R,
) -> anyhow::Result<FeatureDataSet>
where
    R: Rng,
{
    ensure!(
        noise.is_finite() && noise >= 0.0,
        "noise level must be a finite non-negative number, got {noise}"
    );
    let normal = Normal::new(0.0, noise).context("Invalid noise level")?;
    let classes = (0..samples)
        .map(|_| i32::from(rng.random_bool(0.5)))
        .collect::<Vec<_>>();

    let features = (0..features)
        .map(|i| {
            let shift = if i < informative { SIGNAL * noise } else { 0.0 };
            let values = classes
                .iter()
                .map(|&class| (f64::from(class) * shift + rng.sample(normal)).round() as i32)
                .collect();
            let feature_name = if i < informative {
                format!("informative-{i}")
            } else {
                format!("noise-{}", i - informative)
            };
            Feature::new(feature_name, values)
        })
        .collect();

    Ok(FeatureDataSet::new(features, classes, name)?)
}
