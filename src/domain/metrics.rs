//! Derived-metric names and the ordered map the wizard carries them in.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Names of the composite health metrics the engine can derive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MetricName {
    Bmi,
    IdealWeight,
    Bmr,
    BodyFatPercent,
    SkeletalMusclePercent,
    BodyAge,
}

impl MetricName {
    /// User-facing label for review screens.
    pub const fn label(self) -> &'static str {
        match self {
            MetricName::Bmi => "BMI",
            MetricName::IdealWeight => "Ideal weight (kg)",
            MetricName::Bmr => "BMR (kcal/day)",
            MetricName::BodyFatPercent => "Body fat %",
            MetricName::SkeletalMusclePercent => "Skeletal muscle %",
            MetricName::BodyAge => "Body age",
        }
    }
}

impl Display for MetricName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map of derived metrics keyed by name.
///
/// Backed by a `BTreeMap` so iteration and serialization order are fixed:
/// recomputing from identical inputs yields a byte-identical encoding.
/// Metrics that could not be derived are simply absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComputedMetrics(BTreeMap<MetricName, f64>);

impl ComputedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a metric, replacing any previous value under the same name.
    pub fn insert(&mut self, name: MetricName, value: f64) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: MetricName) -> Option<f64> {
        self.0.get(&name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates metrics in fixed name order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, f64)> + '_ {
        self.0.iter().map(|(name, value)| (*name, *value))
    }
}

impl FromIterator<(MetricName, f64)> for ComputedMetrics {
    fn from_iter<I: IntoIterator<Item = (MetricName, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
