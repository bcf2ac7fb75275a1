//! Parameter instances and their candidate assignments.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::ParameterInstanceId;

/// A candidate value matrix for one parameter instance.
///
/// The deviation is a noise coefficient applied by the projection
/// arithmetic; it plays no part in ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterAssignment {
    name: String,
    probability: f64,
    deviation: f64,
    values: Vec<Vec<f64>>,
}

impl ParameterAssignment {
    /// Creates an assignment with an empty value matrix and no deviation.
    pub fn new(name: impl Into<String>, probability: f64) -> Self {
        Self {
            name: name.into(),
            probability,
            deviation: 0.0,
            values: Vec::new(),
        }
    }

    pub fn with_deviation(mut self, deviation: f64) -> Self {
        self.deviation = deviation;
        self
    }

    pub fn with_values(mut self, values: Vec<Vec<f64>>) -> Self {
        self.values = values;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn set_probability(&mut self, probability: f64) {
        self.probability = probability;
    }

    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    /// The value matrix, row-major.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }
}

/// A demographic input slot of a projection.
#[derive(Debug, Clone)]
pub struct ParameterInstance {
    id: ParameterInstanceId,
    name: String,
    assignments: Vec<Arc<ParameterAssignment>>,
}

impl ParameterInstance {
    pub fn new(
        id: ParameterInstanceId,
        name: impl Into<String>,
        assignments: Vec<Arc<ParameterAssignment>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            assignments,
        }
    }

    pub fn id(&self) -> ParameterInstanceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The instance's own candidate assignments.
    pub fn assignments(&self) -> &[Arc<ParameterAssignment>] {
        &self.assignments
    }

    pub(crate) fn assignments_mut(&mut self) -> &mut Vec<Arc<ParameterAssignment>> {
        &mut self.assignments
    }
}

/// One resolved choice of assignment per parameter instance.
pub type AssignmentMap = BTreeMap<ParameterInstanceId, Arc<ParameterAssignment>>;
