use std::{collections::BTreeSet, num::NonZeroUsize, path::PathBuf};

use anyhow::ensure;
use chrono::Utc;
use melif_dataset::FeatureDataSet;
use melif_evaluator::{
    evaluator::DataSetEvaluator, measure::MeasureKind, normalization::NormalizationMode,
};
use melif_sweep::{
    front::Front,
    geometry::{self, Line},
    path::WeightPath,
    sweeper::WeightSpaceSweeper,
};

use crate::{
    schema::report::{ChartPoint, Crossing, SweepReport},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum PathKind {
    /// Straight edge of the weight simplex, from `(0, 1)` to `(1, 0)`
    #[default]
    Simplex,
    /// Unit semicircle, from `(-1, 0)` through `(0, 1)` to `(1, 0)`
    Semicircle,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SweepArg {
    /// Dataset JSON file
    #[arg(long)]
    dataset: PathBuf,
    /// Comma-separated relevance measures; a sweep spans exactly two
    #[arg(long, value_delimiter = ',', default_values = ["spearman", "vdm"])]
    measures: Vec<MeasureKind>,
    /// Score normalization: none, valuebased or measurebased
    #[arg(long, default_value = "valuebased")]
    normalization: NormalizationMode,
    /// Weight path: simplex or semicircle
    #[arg(long, default_value = "simplex")]
    path: PathKind,
    /// Number of steps along the path
    #[arg(long, default_value_t = 1000)]
    samples: usize,
    /// Number of top features kept at every point
    #[arg(long, default_value_t = 50)]
    cut_size: usize,
    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    threads: Option<NonZeroUsize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SweepArg) -> anyhow::Result<()> {
    let SweepArg {
        dataset,
        measures: measure_kinds,
        normalization,
        path,
        samples,
        cut_size,
        threads,
        output,
    } = arg;
    ensure!(
        measure_kinds.len() == 2,
        "a weight path spans exactly two measures, got {}",
        measure_kinds.len()
    );

    let dataset = util::read_dataset_file(dataset)?;
    let measures = util::build_measures(measure_kinds);
    let path = match path {
        PathKind::Simplex => WeightPath::SimplexEdge { samples: *samples },
        PathKind::Semicircle => WeightPath::Semicircle { samples: *samples },
    };

    let mut sweeper = WeightSpaceSweeper::new(DataSetEvaluator::new(*normalization));
    if let Some(threads) = threads {
        sweeper = sweeper.with_threads(*threads);
    }
    let sweep = sweeper.sweep(&path.points(), &dataset, &measures, *cut_size)?;
    let front = Front::from_sweep(&sweep);

    let lines = front
        .need_to_process()
        .iter()
        .filter_map(|&i| {
            Line::from_trajectory(feature_name(&dataset, i), &sweep.feature_trajectory(i))
        })
        .collect::<Vec<_>>();
    let crossings = geometry::pairwise_intersections(&lines)
        .into_iter()
        .map(|c| Crossing {
            first: lines[c.first].name.clone(),
            second: lines[c.second].name.clone(),
            x: c.point.x,
            y: c.point.y,
        })
        .collect();

    let bottom_front = front
        .bottom_front()
        .iter()
        .map(|p| {
            let (x, y) = path.project_front(p.position, p.score);
            ChartPoint {
                position: p.position,
                weights: p.weights.clone(),
                feature: feature_name(&dataset, p.feature),
                x,
                y,
            }
        })
        .collect();

    let names = |set: &BTreeSet<usize>| {
        set.iter()
            .map(|&i| feature_name(&dataset, i))
            .collect::<Vec<_>>()
    };
    let report = SweepReport {
        dataset: dataset.name().to_owned(),
        generated_at: Utc::now(),
        measures: measure_kinds.clone(),
        normalization: *normalization,
        path,
        cut_size: *cut_size,
        summary: front.summary(),
        always_in_cut: names(front.always_in_cut()),
        sometimes_in_cut: names(front.sometimes_in_cut()),
        need_to_process: names(front.need_to_process()),
        cutting_line: sweep.cutting_line(),
        bottom_front,
        crossings,
    };
    Output::save_json(&report, output.clone())?;

    if let Some(path) = output {
        log::info!("Sweep report saved to {}", path.display());
    }
    Ok(())
}

fn feature_name(dataset: &FeatureDataSet, index: usize) -> String {
    dataset.features()[index].name().to_owned()
}
