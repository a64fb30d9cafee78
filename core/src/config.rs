use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Names listed in the "schedule one-to-ones" line.
    pub meeting_names:   usize,
    /// Names listed in the "give referrals" line.
    pub referral_names:     usize,
    /// Names listed in the "build stronger relationships" line.
    pub relationship_names: usize,
    pub follow_up_text:     String,
    pub attendance_text:    String,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            meeting_names:      3,
            referral_names:     2,
            relationship_names: 2,
            follow_up_text:
                "Follow up on previous referrals to track success and build stronger connections"
                    .into(),
            attendance_text:    "Increase chapter event attendance to boost visibility".into(),
        }
    }
}

/// Weights for the per-member activity score (0–100 with defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub oto_weight:               f64,
    pub referral_given_weight:    f64,
    pub referral_received_weight: f64,
    pub referral_scale_floor:     u32,
    pub referral_scale_headroom:  u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            oto_weight:               30.0,
            referral_given_weight:    35.0,
            referral_received_weight: 35.0,
            referral_scale_floor:     20,
            referral_scale_headroom:  10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Count same-day repeats of a slip as quality issues.
    pub flag_duplicates: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self { flag_duplicates: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub recommendations: RecommendationConfig,
    pub performance:     PerformanceConfig,
    pub quality:         QualityConfig,
}

impl AnalyticsConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: AnalyticsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let p = &self.performance;
        for (name, weight) in [
            ("oto_weight", p.oto_weight),
            ("referral_given_weight", p.referral_given_weight),
            ("referral_received_weight", p.referral_received_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                anyhow::bail!("performance.{name} must be a non-negative number, got {weight}");
            }
        }
        if p.referral_scale_floor == 0 {
            anyhow::bail!("performance.referral_scale_floor must be at least 1");
        }
        Ok(())
    }
}
