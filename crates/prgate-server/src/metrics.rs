use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prgate_core::{use_cases::pipeline::RunOutcome, PipelineError};
use prometheus::{IntCounter, IntCounterVec, Opts};

use crate::{Result, ServerError};

lazy_static! {
    pub static ref PIPELINE_RUNS_STARTED: IntCounter =
        IntCounter::new("pipeline_runs_started", "Pipeline runs started").unwrap();
    pub static ref PIPELINE_RUNS_SUCCEEDED: IntCounter =
        IntCounter::new("pipeline_runs_succeeded", "Pipeline runs succeeded").unwrap();
    pub static ref PIPELINE_RUNS_SKIPPED: IntCounter =
        IntCounter::new("pipeline_runs_skipped", "Pipeline runs skipped by action").unwrap();
    pub static ref PIPELINE_RUNS_REJECTED_VERIFICATION: IntCounter = IntCounter::new(
        "pipeline_runs_rejected_verification",
        "Pipeline runs rejected by the verification process"
    )
    .unwrap();
    pub static ref PIPELINE_RUNS_FAILED: IntCounterVec = IntCounterVec::new(
        Opts::new("pipeline_runs_failed", "Pipeline runs failed, by stage"),
        &["stage"]
    )
    .unwrap();
}

pub(crate) fn record_run_outcome(result: &prgate_core::Result<RunOutcome>) {
    match result {
        Ok(RunOutcome::Verified) => PIPELINE_RUNS_SUCCEEDED.inc(),
        Ok(RunOutcome::Skipped { .. }) => PIPELINE_RUNS_SKIPPED.inc(),
        Err(e) => record_run_failure(e),
    }
}

fn record_run_failure(error: &PipelineError) {
    if error.is_verification_result() {
        PIPELINE_RUNS_REJECTED_VERIFICATION.inc();
    } else {
        PIPELINE_RUNS_FAILED
            .with_label_values(&[error.stage().to_str()])
            .inc();
    }
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError { source: e })?;

    setup_process_metrics(&prometheus)?;

    let collectors: [Box<dyn prometheus::core::Collector>; 5] = [
        Box::new(PIPELINE_RUNS_STARTED.clone()),
        Box::new(PIPELINE_RUNS_SUCCEEDED.clone()),
        Box::new(PIPELINE_RUNS_SKIPPED.clone()),
        Box::new(PIPELINE_RUNS_REJECTED_VERIFICATION.clone()),
        Box::new(PIPELINE_RUNS_FAILED.clone()),
    ];
    for collector in collectors {
        prometheus
            .registry
            .register(collector)
            .map_err(|e| ServerError::MetricsError {
                source: Box::new(e),
            })?;
    }

    Ok(prometheus)
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .map_err(|e| ServerError::MetricsError {
            source: Box::new(e),
        })
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use prgate_core::PipelineStage;

    use super::*;

    #[test]
    fn outcomes_are_counted() {
        let rejected = PIPELINE_RUNS_REJECTED_VERIFICATION.get();
        let failed_fetch = PIPELINE_RUNS_FAILED.with_label_values(&["fetch"]).get();

        record_run_outcome(&Err(PipelineError::ProcessFailure { code: Some(1) }));
        record_run_outcome(&Err(PipelineError::Cancelled {
            stage: PipelineStage::Fetch,
        }));

        assert!(PIPELINE_RUNS_REJECTED_VERIFICATION.get() > rejected);
        assert!(PIPELINE_RUNS_FAILED.with_label_values(&["fetch"]).get() > failed_fetch);
    }

    #[test]
    fn handler_builds_twice() {
        build_metrics_handler().unwrap();
        build_metrics_handler().unwrap();
    }
}
