use std::fmt;

use serde::{Deserialize, Serialize};

/// Scoring dimension recognised by the criteria model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Seniority,
    AgeGap,
    SameDepartment,
    WorkloadPenalty,
}

impl Dimension {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Seniority,
            Self::AgeGap,
            Self::SameDepartment,
            Self::WorkloadPenalty,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Seniority => "seniority",
            Self::AgeGap => "age gap",
            Self::SameDepartment => "same department",
            Self::WorkloadPenalty => "workload",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weighted criteria used to score a mentor against a mentee.
///
/// Weights are raw point allocations. They are normalised on validation so that a pair earning
/// every point available scores exactly 100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaConfig {
    pub seniority: SeniorityCriterion,
    pub age_gap: AgeGapCriterion,
    pub same_department: DepartmentCriterion,
    pub workload_penalty: WorkloadCriterion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeniorityCriterion {
    pub weight: f64,
    /// Hard gate: mentors below this tenure are never eligible.
    pub min_required: f64,
    /// Optional floor: mentor-minus-mentee tenure gaps below it earn no seniority credit.
    pub min_acceptable_difference: Option<f64>,
    /// Optional ceiling: mentor tenure beyond `mentee + max_acceptable_difference` is not
    /// counted.
    pub max_acceptable_difference: Option<f64>,
}

impl Default for SeniorityCriterion {
    fn default() -> Self {
        Self {
            weight: 10.0,
            min_required: 2.0,
            min_acceptable_difference: None,
            max_acceptable_difference: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeGapCriterion {
    pub weight: f64,
    pub ideal_min: u32,
    pub ideal_max: u32,
    pub hard_max: u32,
}

impl Default for AgeGapCriterion {
    fn default() -> Self {
        Self {
            weight: 30.0,
            ideal_min: 5,
            ideal_max: 10,
            hard_max: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentCriterion {
    pub weight: f64,
}

impl Default for DepartmentCriterion {
    fn default() -> Self {
        Self { weight: 20.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadCriterion {
    pub weight: f64,
    pub max_concurrent_mentees: u32,
}

impl Default for WorkloadCriterion {
    fn default() -> Self {
        Self {
            weight: 10.0,
            max_concurrent_mentees: 3,
        }
    }
}

impl CriteriaConfig {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Seniority => self.seniority.weight,
            Dimension::AgeGap => self.age_gap.weight,
            Dimension::SameDepartment => self.same_department.weight,
            Dimension::WorkloadPenalty => self.workload_penalty.weight,
        }
    }

    /// Validate the configuration and fix the normalisation total.
    pub fn normalize(&self) -> Result<NormalizedCriteria, CriteriaError> {
        for dimension in Dimension::ordered() {
            let weight = self.weight(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(CriteriaError::InvalidWeight { dimension, weight });
            }
        }

        let total_weight: f64 = Dimension::ordered()
            .into_iter()
            .map(|dimension| self.weight(dimension))
            .sum();
        if total_weight <= 0.0 {
            return Err(CriteriaError::ZeroTotalWeight);
        }

        let seniority = &self.seniority;
        let bounds = [
            Some(seniority.min_required),
            seniority.min_acceptable_difference,
            seniority.max_acceptable_difference,
        ];
        if bounds
            .iter()
            .flatten()
            .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(CriteriaError::InvalidSeniorityBounds {
                reason: "values must be finite and non-negative",
            });
        }
        if let (Some(min), Some(max)) = (
            seniority.min_acceptable_difference,
            seniority.max_acceptable_difference,
        ) {
            if min > max {
                return Err(CriteriaError::InvalidSeniorityBounds {
                    reason: "minimum difference exceeds maximum difference",
                });
            }
        }

        let age_gap = &self.age_gap;
        if age_gap.ideal_min > age_gap.ideal_max {
            return Err(CriteriaError::InvertedAgeBand {
                ideal_min: age_gap.ideal_min,
                ideal_max: age_gap.ideal_max,
            });
        }
        if age_gap.hard_max < age_gap.ideal_max {
            return Err(CriteriaError::HardMaxBelowIdeal {
                ideal_max: age_gap.ideal_max,
                hard_max: age_gap.hard_max,
            });
        }

        if self.workload_penalty.max_concurrent_mentees == 0 {
            return Err(CriteriaError::ZeroMentorCapacity);
        }

        Ok(NormalizedCriteria {
            config: self.clone(),
            total_weight,
        })
    }

    /// Produce a new validated configuration with the update overlaid on this one.
    pub fn apply(&self, update: &CriteriaUpdate) -> Result<CriteriaConfig, CriteriaError> {
        let mut next = self.clone();

        if let Some(seniority) = &update.seniority {
            overlay(&mut next.seniority.weight, seniority.weight);
            overlay(&mut next.seniority.min_required, seniority.min_required);
            if seniority.min_acceptable_difference.is_some() {
                next.seniority.min_acceptable_difference = seniority.min_acceptable_difference;
            }
            if seniority.max_acceptable_difference.is_some() {
                next.seniority.max_acceptable_difference = seniority.max_acceptable_difference;
            }
        }
        if let Some(age_gap) = &update.age_gap {
            overlay(&mut next.age_gap.weight, age_gap.weight);
            overlay(&mut next.age_gap.ideal_min, age_gap.ideal_min);
            overlay(&mut next.age_gap.ideal_max, age_gap.ideal_max);
            overlay(&mut next.age_gap.hard_max, age_gap.hard_max);
        }
        if let Some(department) = &update.same_department {
            overlay(&mut next.same_department.weight, department.weight);
        }
        if let Some(workload) = &update.workload_penalty {
            overlay(&mut next.workload_penalty.weight, workload.weight);
            overlay(
                &mut next.workload_penalty.max_concurrent_mentees,
                workload.max_concurrent_mentees,
            );
        }

        next.normalize()?;
        Ok(next)
    }
}

fn overlay<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Validated criteria with a known, non-zero weight total.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCriteria {
    config: CriteriaConfig,
    total_weight: f64,
}

impl NormalizedCriteria {
    pub fn config(&self) -> &CriteriaConfig {
        &self.config
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Maximum raw points a dimension can contribute.
    pub fn max_points(&self, dimension: Dimension) -> f64 {
        self.config.weight(dimension)
    }

    /// Fraction of the final score a dimension controls; fractions sum to 1.0.
    pub fn normalized_weight(&self, dimension: Dimension) -> f64 {
        self.config.weight(dimension) / self.total_weight
    }

    pub fn normalized_weights(&self) -> Vec<(Dimension, f64)> {
        Dimension::ordered()
            .into_iter()
            .map(|dimension| (dimension, self.normalized_weight(dimension)))
            .collect()
    }

    pub fn max_concurrent_mentees(&self) -> u32 {
        self.config.workload_penalty.max_concurrent_mentees
    }
}

/// Partial overlay applied with [`CriteriaConfig::apply`]; absent fields keep their value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaUpdate {
    pub seniority: Option<SeniorityUpdate>,
    pub age_gap: Option<AgeGapUpdate>,
    pub same_department: Option<DepartmentUpdate>,
    pub workload_penalty: Option<WorkloadUpdate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeniorityUpdate {
    pub weight: Option<f64>,
    pub min_required: Option<f64>,
    pub min_acceptable_difference: Option<f64>,
    pub max_acceptable_difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeGapUpdate {
    pub weight: Option<f64>,
    pub ideal_min: Option<u32>,
    pub ideal_max: Option<u32>,
    pub hard_max: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentUpdate {
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadUpdate {
    pub weight: Option<f64>,
    pub max_concurrent_mentees: Option<u32>,
}

/// Malformed criteria; fatal to the call that supplied them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CriteriaError {
    #[error("{dimension} weight must be a non-negative number (got {weight})")]
    InvalidWeight { dimension: Dimension, weight: f64 },
    #[error("at least one criteria weight must be positive")]
    ZeroTotalWeight,
    #[error("invalid seniority bounds: {reason}")]
    InvalidSeniorityBounds { reason: &'static str },
    #[error("ideal age band is inverted ({ideal_min} > {ideal_max})")]
    InvertedAgeBand { ideal_min: u32, ideal_max: u32 },
    #[error("hard age gap limit {hard_max} is below the ideal maximum {ideal_max}")]
    HardMaxBelowIdeal { ideal_max: u32, hard_max: u32 },
    #[error("mentors must accept at least one concurrent mentee")]
    ZeroMentorCapacity,
}
