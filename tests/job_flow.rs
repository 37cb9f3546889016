//! End-to-end job lifecycle over mocked collaborators.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use comentaria::config::AnalysisConfig;
use comentaria::jobs::{
    AnalysisService, CollectorError, CommentCollector, GeneratorError, JobError, JobStatus,
    ReportGenerator,
};
use comentaria::pipeline::classification::{BatchClassifier, MockChatClient, RawComment};
use comentaria::pipeline::stats::{AnalysisReport, GeneratedReport};

/// Opt-in worker logs, `RUST_LOG=comentaria=debug cargo test`.
fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn sample_comments(n: usize) -> Vec<RawComment> {
    (0..n)
        .map(|i| RawComment {
            text: format!("comentário {i}"),
            author: format!("autor{i}"),
            like_count: i as u64,
        })
        .collect()
}

fn valid_reply(n: usize) -> String {
    let entries: Vec<String> = (1..=n)
        .map(|id| format!("{{\"id\": {id}, \"categoria\": \"alegria\"}}"))
        .collect();
    format!("{{\"classificacoes\": [{}]}}", entries.join(", "))
}

fn classifier_for(n: usize) -> Arc<BatchClassifier> {
    Arc::new(BatchClassifier::new(
        Arc::new(MockChatClient::new(&valid_reply(n))),
        AnalysisConfig::default().without_pacing(),
    ))
}

/// Collector that blocks until the test releases it, so intermediate job
/// states stay observable.
struct GatedCollector {
    gate: Mutex<Receiver<()>>,
    comments: Vec<RawComment>,
}

impl GatedCollector {
    fn new(comments: Vec<RawComment>) -> (Arc<Self>, Sender<()>) {
        let (tx, rx) = channel();
        (
            Arc::new(Self {
                gate: Mutex::new(rx),
                comments,
            }),
            tx,
        )
    }
}

impl CommentCollector for GatedCollector {
    fn collect(&self, _video_ref: &str) -> Result<Vec<RawComment>, CollectorError> {
        self.gate
            .lock()
            .expect("gate lock")
            .recv()
            .map_err(|_| CollectorError::Failed("gate closed".to_string()))?;
        Ok(self.comments.clone())
    }
}

struct InstantCollector(Vec<RawComment>);

impl CommentCollector for InstantCollector {
    fn collect(&self, _video_ref: &str) -> Result<Vec<RawComment>, CollectorError> {
        Ok(self.0.clone())
    }
}

struct FailingCollector;

impl CommentCollector for FailingCollector {
    fn collect(&self, _video_ref: &str) -> Result<Vec<RawComment>, CollectorError> {
        Err(CollectorError::Timeout)
    }
}

struct OkGenerator {
    last_report: Mutex<Option<AnalysisReport>>,
}

impl OkGenerator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            last_report: Mutex::new(None),
        })
    }
}

impl ReportGenerator for OkGenerator {
    fn generate(&self, report: &AnalysisReport) -> Result<GeneratedReport, GeneratorError> {
        *self.last_report.lock().expect("report lock") = Some(report.clone());
        Ok(GeneratedReport {
            report_id: "dash-0001".to_string(),
            size_kb: 35,
        })
    }
}

struct FailingGenerator;

impl ReportGenerator for FailingGenerator {
    fn generate(&self, _report: &AnalysisReport) -> Result<GeneratedReport, GeneratorError> {
        Err(GeneratorError::Failed("dashboard service offline".to_string()))
    }
}

const VIDEO: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn wait_for(service: &AnalysisService, id: &str, status: JobStatus) -> comentaria::jobs::Job {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let job = service.status(id).expect("job exists");
        if job.status == status {
            return job;
        }
        assert!(
            !job.status.is_terminal(),
            "job reached terminal {} while waiting for {status}",
            job.status
        );
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {status}, job is at {}",
            job.status
        );
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn happy_path_runs_to_completion() {
    init_tracing();
    let generator = OkGenerator::new();
    let service = AnalysisService::new(
        Arc::new(InstantCollector(sample_comments(5))),
        generator.clone(),
        classifier_for(5),
    );

    let id = service.submit(VIDEO).expect("submission accepted");
    assert_eq!(id.len(), 8);

    let job = wait_for(&service, &id, JobStatus::Completed);
    assert_eq!(job.progress, 100);
    assert_eq!(job.message, "Análise concluída!");
    assert!(job.error.is_none());
    let report_ref = job.report_ref.expect("report handle set");
    assert_eq!(report_ref.report_id, "dash-0001");
    assert_eq!(report_ref.size_kb, 35);

    // The generator saw a category-complete report for the submitted video.
    let report = generator
        .last_report
        .lock()
        .unwrap()
        .clone()
        .expect("report generated");
    assert_eq!(report.video_ref, VIDEO);
    assert_eq!(report.total_comments, 5);
    assert_eq!(report.categories.len(), 9);
    assert_eq!(report.summary.success_rate, 100.0);
}

#[test]
fn transitions_are_observable_not_atomic() {
    init_tracing();
    let (collector, release_collect) = GatedCollector::new(sample_comments(3));
    let service = AnalysisService::new(collector, OkGenerator::new(), classifier_for(3));

    let id = service.submit(VIDEO).expect("submission accepted");

    // Submission returns immediately; the job is at most in collecting.
    let job = service.status(&id).expect("job exists");
    assert!(
        matches!(job.status, JobStatus::Pending | JobStatus::Collecting),
        "unexpected early status {}",
        job.status
    );

    // While the collector is gated the job sits at collecting/20.
    let job = wait_for(&service, &id, JobStatus::Collecting);
    assert_eq!(job.progress, 20);
    assert_eq!(job.message, "Coletando comentários do YouTube...");

    release_collect.send(()).expect("worker alive");
    let job = wait_for(&service, &id, JobStatus::Completed);
    assert_eq!(job.progress, 100);
}

#[test]
fn collection_failure_fails_the_job_without_classification() {
    init_tracing();
    let service = AnalysisService::new(
        Arc::new(FailingCollector),
        OkGenerator::new(),
        classifier_for(0),
    );

    let id = service.submit(VIDEO).expect("submission accepted");
    let job = wait_for(&service, &id, JobStatus::Error);

    assert_eq!(job.progress, 0);
    assert_eq!(
        job.error.as_deref(),
        Some("Timeout - vídeo pode ter muitos comentários")
    );
}

#[test]
fn generator_failure_preserves_message_verbatim() {
    init_tracing();
    let service = AnalysisService::new(
        Arc::new(InstantCollector(sample_comments(2))),
        Arc::new(FailingGenerator),
        classifier_for(2),
    );

    let id = service.submit(VIDEO).expect("submission accepted");
    let job = wait_for(&service, &id, JobStatus::Error);

    assert_eq!(job.progress, 0);
    assert_eq!(
        job.error.as_deref(),
        Some("Erro no serviço de relatórios: dashboard service offline")
    );
}

#[test]
fn invalid_video_ref_rejected_before_job_creation() {
    init_tracing();
    let service = AnalysisService::new(
        Arc::new(InstantCollector(Vec::new())),
        OkGenerator::new(),
        classifier_for(0),
    );

    assert!(matches!(
        service.submit(""),
        Err(JobError::InvalidVideoRef(_))
    ));
    assert!(matches!(
        service.submit("https://vimeo.com/123"),
        Err(JobError::InvalidVideoRef(_))
    ));
    assert_eq!(service.active_jobs(), 0);
}

#[test]
fn unknown_job_id_is_not_found() {
    init_tracing();
    let service = AnalysisService::new(
        Arc::new(InstantCollector(Vec::new())),
        OkGenerator::new(),
        classifier_for(0),
    );

    assert!(matches!(
        service.status("00000000"),
        Err(JobError::NotFound(_))
    ));
}

#[test]
fn zero_comments_completes_with_empty_report() {
    init_tracing();
    let generator = OkGenerator::new();
    let service = AnalysisService::new(
        Arc::new(InstantCollector(Vec::new())),
        generator.clone(),
        classifier_for(0),
    );

    let id = service.submit(VIDEO).expect("submission accepted");
    wait_for(&service, &id, JobStatus::Completed);

    let report = generator
        .last_report
        .lock()
        .unwrap()
        .clone()
        .expect("report generated");
    assert_eq!(report.total_comments, 0);
    assert_eq!(report.categories.len(), 9);
    assert!(report.categories.iter().all(|c| c.percentage == 0.0));
    assert_eq!(
        report.summary.predominant_category.as_str(),
        "não identificáveis"
    );
}

#[test]
fn concurrent_jobs_are_independent() {
    init_tracing();
    let service = Arc::new(AnalysisService::new(
        Arc::new(InstantCollector(sample_comments(4))),
        OkGenerator::new(),
        classifier_for(4),
    ));

    let ids: Vec<String> = (0..4)
        .map(|_| service.submit(VIDEO).expect("submission accepted"))
        .collect();
    assert_eq!(service.active_jobs(), 4);

    for id in &ids {
        let job = wait_for(&service, id, JobStatus::Completed);
        assert_eq!(job.progress, 100);
    }
}
