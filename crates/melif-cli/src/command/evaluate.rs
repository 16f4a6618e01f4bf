use std::path::PathBuf;

use chrono::Utc;
use melif_dataset::Point;
use melif_evaluator::{
    evaluator::DataSetEvaluator,
    filter::{DataSetFilter as _, FilterKind},
    measure::MeasureKind,
    normalization::NormalizationMode,
};

use crate::{
    schema::report::{EvaluationReport, FilterReport, RankedFeature},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Dataset JSON file
    #[arg(long)]
    dataset: PathBuf,
    /// Comma-separated relevance measures
    #[arg(long, value_delimiter = ',', default_values = ["spearman", "vdm"])]
    measures: Vec<MeasureKind>,
    /// Comma-separated weights, one per measure
    #[arg(long, value_delimiter = ',', required = true)]
    weights: Vec<f64>,
    /// Score normalization: none, valuebased or measurebased
    #[arg(long, default_value = "valuebased")]
    normalization: NormalizationMode,
    /// Feature filter: percent:N, preferred-size:N or wyrd
    #[arg(long)]
    filter: Option<FilterKind>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        dataset,
        measures: measure_kinds,
        weights,
        normalization,
        filter,
        output,
    } = arg;

    let dataset = util::read_dataset_file(dataset)?;
    let measures = util::build_measures(measure_kinds);
    let weights = Point::new(weights.clone());
    let evaluator = DataSetEvaluator::new(*normalization);

    let ranking = evaluator
        .evaluate_features(&dataset, &weights, &measures)?
        .into_iter()
        .map(|f| RankedFeature {
            index: f.index,
            name: f.feature.name().to_owned(),
            score: f.score,
        })
        .collect::<Vec<_>>();

    let filter = match filter {
        Some(kind) => {
            let filtered = kind
                .build(evaluator)?
                .filter_data_set(&dataset, &weights, &measures)?;
            log::info!(
                "{kind:?} kept {} of {} features",
                filtered.feature_count(),
                dataset.feature_count()
            );
            Some(FilterReport {
                kind: *kind,
                selected: filtered
                    .features()
                    .iter()
                    .map(|f| f.name().to_owned())
                    .collect(),
            })
        }
        None => None,
    };

    let report = EvaluationReport {
        dataset: dataset.name().to_owned(),
        generated_at: Utc::now(),
        measures: measure_kinds.clone(),
        weights,
        normalization: *normalization,
        ranking,
        filter,
    };
    Output::save_json(&report, output.clone())?;

    if let Some(path) = output {
        log::info!("Evaluation report saved to {}", path.display());
    }
    Ok(())
}
