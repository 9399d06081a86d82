//! Externally computed invoice risk analysis

use serde::{Deserialize, Serialize};

/// Qualitative risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// `PAID`, `UNPAID` or `RISKY`
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: String,
}

/// Keyword anomalies flagged in the invoice text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlpAnomaly {
    #[serde(default)]
    pub anomaly_detected: bool,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Analytics payload for one invoice. Never computed or mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    /// Probability (0-1) that the invoice will be paid late
    pub overdue_probability: f64,
    pub risk_analysis: RiskAnalysis,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub nlp_anomaly: Option<NlpAnomaly>,
}

impl AnalyticsResult {
    /// Keywords to display, empty unless an anomaly was detected
    pub fn anomaly_keywords(&self) -> &[String] {
        match &self.nlp_anomaly {
            Some(a) if a.anomaly_detected => &a.keywords,
            _ => &[],
        }
    }

    pub fn is_risky(&self) -> bool {
        self.risk_analysis.status.eq_ignore_ascii_case("RISKY")
    }
}
