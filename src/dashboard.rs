use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ingest::parse_dataset;
use crate::insights::generate_insights;
use crate::metrics::summarize;
use crate::models::{Dataset, FieldRoleMap, Insight, MetricsSummary};
use crate::roles::resolve_roles;

/// Everything derived from one upload. Rebuilt whole on every load.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub upload_id: Uuid,
    pub dataset: Dataset,
    pub roles: FieldRoleMap,
    pub metrics: MetricsSummary,
}

impl DashboardContext {
    pub fn from_text(text: &str) -> Self {
        let dataset = parse_dataset(text);
        let roles = resolve_roles(&dataset.headers);
        let metrics = summarize(&dataset, &roles);
        Self {
            upload_id: Uuid::new_v4(),
            dataset,
            roles,
            metrics,
        }
    }

    pub fn insights(&self) -> Vec<Insight> {
        generate_insights(&self.dataset, &self.roles, &self.metrics)
    }
}

struct InsightTask {
    upload_id: Uuid,
    handle: JoinHandle<Vec<Insight>>,
}

/// Holds the current upload and at most one in-flight insight computation.
///
/// Loading a new file aborts whatever task the previous load started, so a
/// slow earlier upload can never overwrite a later one.
pub struct Dashboard {
    delay: Duration,
    context: Option<Arc<DashboardContext>>,
    pending: Option<InsightTask>,
    insights: Option<Vec<Insight>>,
}

impl Dashboard {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            context: None,
            pending: None,
            insights: None,
        }
    }

    pub fn context(&self) -> Option<&Arc<DashboardContext>> {
        self.context.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the current upload. Must be called inside a tokio runtime.
    pub fn load(&mut self, text: &str) -> Arc<DashboardContext> {
        if let Some(task) = self.pending.take() {
            task.handle.abort();
            debug!(upload_id = %task.upload_id, "cancelled pending insight task");
        }

        let context = Arc::new(DashboardContext::from_text(text));
        info!(
            upload_id = %context.upload_id,
            rows = context.metrics.total_count,
            columns = context.dataset.headers.len(),
            "loaded placement data"
        );

        let delay = self.delay;
        let task_context = Arc::clone(&context);
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            task_context.insights()
        });

        self.pending = Some(InsightTask {
            upload_id: context.upload_id,
            handle,
        });
        self.insights = None;
        self.context = Some(Arc::clone(&context));
        context
    }

    /// Waits for the current upload's insights, caching them once ready.
    pub async fn insights(&mut self) -> anyhow::Result<Vec<Insight>> {
        if let Some(task) = self.pending.take() {
            let insights = match task.handle.await {
                Ok(insights) => insights,
                Err(err) if err.is_cancelled() => Vec::new(),
                Err(err) => return Err(err).context("insight generation failed"),
            };
            info!(
                upload_id = %task.upload_id,
                count = insights.len(),
                "insights ready"
            );
            self.insights = Some(insights);
        }

        Ok(self.insights.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "Name,CGPA,Status\nA,8.5,Placed\nB,7.0,Not Placed\n";

    #[test]
    fn context_is_a_pure_function_of_the_text() {
        let first = DashboardContext::from_text(SHEET);
        let second = DashboardContext::from_text(SHEET);
        assert_ne!(first.upload_id, second.upload_id);
        assert_eq!(first.dataset, second.dataset);
        assert_eq!(first.roles, second.roles);
        assert_eq!(first.metrics, second.metrics);
    }

    #[tokio::test]
    async fn no_upload_means_no_insights() {
        let mut dashboard = Dashboard::new(Duration::ZERO);
        assert!(dashboard.context().is_none());
        assert!(dashboard.insights().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insights_arrive_after_the_delay() {
        let mut dashboard = Dashboard::new(Duration::from_millis(20));
        dashboard.load(SHEET);
        assert!(dashboard.is_loading());

        let insights = dashboard.insights().await.unwrap();
        assert!(!dashboard.is_loading());
        assert!(insights.iter().any(|insight| insight.id == "cgpa-impact"));

        let cached = dashboard.insights().await.unwrap();
        assert_eq!(insights, cached);
    }

    #[tokio::test]
    async fn reupload_replaces_state_and_cancels_prior_task() {
        let mut dashboard = Dashboard::new(Duration::from_millis(50));
        let first = dashboard.load(SHEET);
        let second = dashboard.load("Notes\nhello\n");

        assert_ne!(first.upload_id, second.upload_id);
        let current = dashboard.context().unwrap();
        assert_eq!(current.upload_id, second.upload_id);
        assert_eq!(current.metrics.total_count, 1);
        assert_eq!(current.roles, FieldRoleMap::default());

        assert!(dashboard.insights().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_upload_is_an_empty_state() {
        let mut dashboard = Dashboard::new(Duration::ZERO);
        let context = dashboard.load("");
        assert!(context.dataset.is_empty());
        assert_eq!(context.metrics.placement_rate, 0.0);
        assert!(dashboard.insights().await.unwrap().is_empty());
    }
}
