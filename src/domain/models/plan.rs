//! Strategic plans produced by the slow planner.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lower bound on [`StrategyDescriptor::depth_limit`].
pub const MIN_DEPTH_LIMIT: usize = 5;

/// How the executor should search under this plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    /// Search approach label.
    pub approach: String,

    /// Maximum search depth. Never below [`MIN_DEPTH_LIMIT`].
    pub depth_limit: usize,

    /// Candidates expanded per search node.
    pub branching_factor: usize,

    /// Share of effort spent exploring rather than exploiting.
    pub exploration_ratio: f64,
}

impl StrategyDescriptor {
    /// Build the descriptor for a context vector of `context_len` entries.
    pub fn for_context(context_len: usize) -> Self {
        Self {
            approach: "hierarchical_search".to_string(),
            depth_limit: (context_len / 50).max(MIN_DEPTH_LIMIT),
            branching_factor: 3,
            exploration_ratio: 0.3,
        }
    }
}

impl Default for StrategyDescriptor {
    fn default() -> Self {
        Self::for_context(0)
    }
}

/// A resource or quality constraint the executor is scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Constraint {
    /// An upper bound on a resource.
    Limit {
        #[serde(rename = "type")]
        kind: String,
        limit: f64,
    },
    /// A minimum acceptable level of a metric.
    Threshold {
        #[serde(rename = "type")]
        kind: String,
        threshold: f64,
    },
}

impl Constraint {
    pub fn limit(kind: impl Into<String>, limit: f64) -> Self {
        Self::Limit {
            kind: kind.into(),
            limit,
        }
    }

    pub fn threshold(kind: impl Into<String>, threshold: f64) -> Self {
        Self::Threshold {
            kind: kind.into(),
            threshold,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Limit { kind, .. } | Self::Threshold { kind, .. } => kind,
        }
    }

    /// Constraints used when the problem does not declare its own.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::limit("resource", 1000.0),
            Self::limit("time", 100.0),
            Self::threshold("quality", 0.95),
        ]
    }
}

/// Default priority areas, in order.
pub fn default_priority_areas() -> Vec<String> {
    ["optimization", "constraint_satisfaction", "exploration"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Default success criteria keyed by metric name.
pub fn default_success_criteria() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("accuracy".to_string(), 0.95),
        ("efficiency".to_string(), 0.90),
        ("completeness".to_string(), 0.98),
    ])
}

/// One strategic plan. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// 1-based position of this plan in the planner's output.
    pub sequence: u64,
    pub strategy: StrategyDescriptor,
    /// Strategic context vector, at most the planner's state dimension long.
    pub context: Vec<f64>,
    pub priority_areas: Vec<String>,
    pub constraints: Vec<Constraint>,
    pub success_criteria: BTreeMap<String, f64>,
    pub created_at: DateTime<Utc>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            sequence: 0,
            strategy: StrategyDescriptor::default(),
            context: Vec::new(),
            priority_areas: default_priority_areas(),
            constraints: Constraint::defaults(),
            success_criteria: default_success_criteria(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_depth_limit_floor() {
        assert_eq!(StrategyDescriptor::for_context(0).depth_limit, 5);
        assert_eq!(StrategyDescriptor::for_context(249).depth_limit, 5);
        assert_eq!(StrategyDescriptor::for_context(300).depth_limit, 6);
        assert_eq!(StrategyDescriptor::for_context(512).depth_limit, 10);
    }

    #[test]
    fn test_constraint_wire_shape() {
        let c = Constraint::limit("resource", 1000.0);
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({"type": "resource", "limit": 1000.0})
        );
        let t: Constraint =
            serde_json::from_value(json!({"type": "quality", "threshold": 0.95})).unwrap();
        assert_eq!(t, Constraint::threshold("quality", 0.95));
    }

    #[test]
    fn test_default_plan_contents() {
        let plan = Plan::default();
        assert_eq!(plan.constraints.len(), 3);
        assert_eq!(plan.priority_areas[0], "optimization");
        assert!((plan.success_criteria["completeness"] - 0.98).abs() < f64::EPSILON);
        assert!(plan.context.is_empty());
    }
}
