use chrono::{DateTime, Utc};
use melif_dataset::Point;
use melif_evaluator::{filter::FilterKind, measure::MeasureKind, normalization::NormalizationMode};
use melif_sweep::{front::FrontSummary, path::WeightPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub dataset: String,
    pub generated_at: DateTime<Utc>,
    pub measures: Vec<MeasureKind>,
    pub weights: Point,
    pub normalization: NormalizationMode,
    /// Every feature, lowest ensemble score first.
    pub ranking: Vec<RankedFeature>,
    pub filter: Option<FilterReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedFeature {
    pub index: usize,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterReport {
    pub kind: FilterKind,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub dataset: String,
    pub generated_at: DateTime<Utc>,
    pub measures: Vec<MeasureKind>,
    pub normalization: NormalizationMode,
    pub path: WeightPath,
    pub cut_size: usize,
    pub summary: FrontSummary,
    pub always_in_cut: Vec<String>,
    pub sometimes_in_cut: Vec<String>,
    pub need_to_process: Vec<String>,
    /// Score of the marginal feature at every path position.
    pub cutting_line: Vec<Option<f64>>,
    /// Bottom front in chart coordinates.
    pub bottom_front: Vec<ChartPoint>,
    /// Rank swaps between features that need processing.
    pub crossings: Vec<Crossing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub position: usize,
    pub weights: Point,
    pub feature: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crossing {
    pub first: String,
    pub second: String,
    pub x: f64,
    pub y: f64,
}
