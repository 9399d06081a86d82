//! AI risk analytics view
//!
//! Renders the backend's precomputed assessment for one invoice. No
//! scoring happens here.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::AnalyticsResult;
use crate::ports::AnalyticsApi;
use crate::services::logging::{record, LogEvent, LoggingService};

/// Invoice analysed when none is chosen
pub const DEFAULT_INVOICE_ID: i64 = 101;

pub const MSG_ANALYTICS_LOADING: &str = "Loading AI analytics...";
pub const MSG_ANALYTICS_FAILED: &str = "Failed to load AI analytics";

/// Badge color of the risk assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTone {
    Alert,
    Ok,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub invoice_id: i64,
    /// Overdue probability as a rounded percentage, 0 to 100
    pub overdue_percent: u8,
    pub on_time_percent: u8,
    pub risk_status: String,
    pub risk_tone: RiskTone,
    pub reason: String,
    pub recommendation: String,
    pub anomaly_keywords: Vec<String>,
}

impl AnalyticsView {
    pub fn from_result(invoice_id: i64, result: &AnalyticsResult) -> Self {
        let overdue = (result.overdue_probability * 100.0).round().clamp(0.0, 100.0) as u8;
        Self {
            invoice_id,
            overdue_percent: overdue,
            on_time_percent: 100 - overdue,
            risk_status: result.risk_analysis.status.clone(),
            risk_tone: if result.is_risky() {
                RiskTone::Alert
            } else {
                RiskTone::Ok
            },
            reason: result.risk_analysis.reason.clone(),
            recommendation: result.recommendation.clone(),
            anomaly_keywords: result.anomaly_keywords().to_vec(),
        }
    }
}

pub struct AnalyticsService {
    api: Arc<dyn AnalyticsApi>,
    logger: Option<Arc<LoggingService>>,
}

impl AnalyticsService {
    pub fn new(api: Arc<dyn AnalyticsApi>, logger: Option<Arc<LoggingService>>) -> Self {
        Self { api, logger }
    }

    /// Fetch and shape the assessment of one invoice
    pub async fn analyze(&self, invoice_id: i64) -> Result<AnalyticsView> {
        match self.api.fetch_analytics(invoice_id).await {
            Ok(result) => Ok(AnalyticsView::from_result(invoice_id, &result)),
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("analytics_load_failed")
                        .with_endpoint("GET /invoices/ai/{id}/analyze")
                        .with_error(e.to_string()),
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::result::Error;
    use crate::domain::{NlpAnomaly, RiskAnalysis};

    struct FakeAnalytics;

    #[async_trait]
    impl AnalyticsApi for FakeAnalytics {
        async fn fetch_analytics(&self, invoice_id: i64) -> Result<AnalyticsResult> {
            if invoice_id != DEFAULT_INVOICE_ID {
                return Err(Error::Api { status: 404, message: None });
            }
            Ok(AnalyticsResult {
                overdue_probability: 0.724,
                risk_analysis: RiskAnalysis {
                    status: "RISKY".to_string(),
                    reason: "Two late payments".to_string(),
                },
                recommendation: "Send a reminder".to_string(),
                nlp_anomaly: Some(NlpAnomaly {
                    anomaly_detected: true,
                    keywords: vec!["urgent".to_string()],
                }),
            })
        }
    }

    #[tokio::test]
    async fn test_analyze_builds_view() {
        let service = AnalyticsService::new(Arc::new(FakeAnalytics), None);
        let view = service.analyze(DEFAULT_INVOICE_ID).await.unwrap();

        assert_eq!(view.overdue_percent, 72);
        assert_eq!(view.on_time_percent, 28);
        assert_eq!(view.risk_tone, RiskTone::Alert);
        assert_eq!(view.anomaly_keywords, vec!["urgent".to_string()]);
    }

    #[tokio::test]
    async fn test_analyze_failure() {
        let service = AnalyticsService::new(Arc::new(FakeAnalytics), None);
        let err = service.analyze(7).await.unwrap_err();
        assert_eq!(err.user_message(MSG_ANALYTICS_FAILED), MSG_ANALYTICS_FAILED);
    }

    #[test]
    fn test_safe_status_and_clamping() {
        let result = AnalyticsResult {
            overdue_probability: 1.3,
            risk_analysis: RiskAnalysis {
                status: "SAFE".to_string(),
                reason: String::new(),
            },
            recommendation: String::new(),
            nlp_anomaly: None,
        };
        let view = AnalyticsView::from_result(5, &result);
        assert_eq!(view.overdue_percent, 100);
        assert_eq!(view.on_time_percent, 0);
        assert_eq!(view.risk_tone, RiskTone::Ok);
        assert!(view.anomaly_keywords.is_empty());
    }
}
