//! Presentation rules that turn interpreted results into display-ready values.

use serde::Serialize;

use crate::analysis::interpreter::{HardFilterRisk, Improvement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    /// `> 80` strong, `70..=80` moderate, everything else weak.
    pub fn from_score(score: i64) -> Self {
        if score > 80 {
            ScoreBand::Strong
        } else if score >= 70 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreView {
    pub value: i64,
    pub band: ScoreBand,
}

impl From<i64> for ScoreView {
    fn from(value: i64) -> Self {
        Self {
            value,
            band: ScoreBand::from_score(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    fn classify(level: &str) -> Self {
        let level = level.to_lowercase();
        if level.contains("high") {
            RiskLevel::High
        } else if level.contains("medium") {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub level: RiskLevel,
    pub message: String,
}

impl From<&HardFilterRisk> for RiskView {
    fn from(risk: &HardFilterRisk) -> Self {
        match risk {
            HardFilterRisk::Text(text) => Self {
                level: RiskLevel::classify(text),
                message: text.clone(),
            },
            HardFilterRisk::Detailed { level, reasoning } => Self {
                level: RiskLevel::classify(level),
                message: format!("{} - {reasoning}", level.to_uppercase()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementView {
    pub section: String,
    pub comment: String,
}

impl From<&Improvement> for ImprovementView {
    fn from(improvement: &Improvement) -> Self {
        match improvement {
            Improvement::Text(text) => Self {
                section: "General".to_string(),
                comment: text.clone(),
            },
            Improvement::Sectioned { section, comment } => Self {
                section: section.clone(),
                comment: comment.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_score(81), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(69), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Weak);
    }

    #[test]
    fn test_detailed_risk_renders_upper_level_and_reasoning() {
        let risk = HardFilterRisk::Detailed {
            level: "High".to_string(),
            reasoning: "Requires security clearance".to_string(),
        };
        assert_eq!(
            RiskView::from(&risk),
            RiskView {
                level: RiskLevel::High,
                message: "HIGH - Requires security clearance".to_string()
            }
        );
    }

    #[test]
    fn test_text_risk_is_classified_by_substring() {
        let view = RiskView::from(&HardFilterRisk::Text("Medium-high risk".to_string()));
        assert_eq!(view.level, RiskLevel::High);
        assert_eq!(view.message, "Medium-high risk");

        let view = RiskView::from(&HardFilterRisk::Text("MEDIUM".to_string()));
        assert_eq!(view.level, RiskLevel::Medium);

        let view = RiskView::from(&HardFilterRisk::default());
        assert_eq!(view.level, RiskLevel::Low);
        assert_eq!(view.message, "low");
    }

    #[test]
    fn test_text_improvement_falls_under_general() {
        let view = ImprovementView::from(&Improvement::Text("Add a summary".to_string()));
        assert_eq!(view.section, "General");
        assert_eq!(view.comment, "Add a summary");
    }
}
