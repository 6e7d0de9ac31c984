//! The pipeline orchestrator: run lifecycle, worker pool, publisher.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::pipeline::{collector, discovery, insights, synthesis, WorkerReport};
use crate::traits::{LanguageModelClient, SocialProfileSource, WebContentSource};
use crate::types::{
    Candidate, CompanyAnalysis, PipelineConfig, ResearchEvent, SearchConfig,
};
use crate::error::ConfigError;

/// Lifecycle phase of one run.
///
/// `Idle → Discovering → Collecting → Done`, with `Errored` reachable
/// only from `Discovering` (per-candidate failures never change the run's
/// phase). `Done` and `Errored` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Discovering,
    Collecting,
    Done,
    Errored,
}

impl RunPhase {
    /// True for `Done` and `Errored`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Errored)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Discovering => "discovering",
            Self::Collecting => "collecting",
            Self::Done => "done",
            Self::Errored => "errored",
        };
        f.write_str(s)
    }
}

/// The live output of one run.
///
/// An ordered stream of [`ResearchEvent`]s ending in exactly one terminal
/// event (`done` or `error`), unless the run is cancelled, in which case
/// the stream simply ends. Dropping the stream cancels the run.
pub struct ResearchStream {
    events: mpsc::Receiver<ResearchEvent>,
    cancel: CancellationToken,
    run_id: Uuid,
}

impl ResearchStream {
    /// Identifier of this run (also attached to its tracing span).
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Receive the next event, or `None` when the stream has ended.
    pub async fn recv(&mut self) -> Option<ResearchEvent> {
        self.events.recv().await
    }

    /// Cancel the run. No further events are emitted once the pipeline
    /// observes the cancellation; in-flight fetches run to their own
    /// timeouts.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Stream for ResearchStream {
    type Item = ResearchEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for ResearchStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The research orchestrator, generic over the three collaborator seams.
///
/// # Example
///
/// ```rust,ignore
/// use research::{ResearchPipeline, PipelineConfig};
/// use research::testing::{MockLanguageModel, MockWebSource, MockSocialSource};
///
/// let pipeline = ResearchPipeline::new(model, web, social);
/// let mut stream = pipeline.start(config)?;
/// while let Some(event) = stream.recv().await {
///     println!("{}", serde_json::to_string(&event)?);
/// }
/// ```
pub struct ResearchPipeline<M, W, S> {
    model: Arc<M>,
    web: Arc<W>,
    social: Arc<S>,
    config: PipelineConfig,
}

impl<M, W, S> ResearchPipeline<M, W, S>
where
    M: LanguageModelClient + 'static,
    W: WebContentSource + 'static,
    S: SocialProfileSource + 'static,
{
    /// Create a pipeline with default tuning.
    pub fn new(model: M, web: W, social: S) -> Self {
        Self::with_config(model, web, social, PipelineConfig::default())
    }

    /// Create a pipeline with explicit tuning.
    pub fn with_config(model: M, web: W, social: S, config: PipelineConfig) -> Self {
        Self {
            model: Arc::new(model),
            web: Arc::new(web),
            social: Arc::new(social),
            config,
        }
    }

    /// Get a reference to the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Start a run for the given search criteria.
    ///
    /// Validation failures are returned synchronously; nothing external
    /// is called and no stream is created. On success the run proceeds in
    /// the background and its events arrive on the returned stream.
    pub fn start(&self, search: SearchConfig) -> Result<ResearchStream, ConfigError> {
        let search = search.sanitized();
        search.validate()?;

        let run_id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);

        let driver = Driver {
            model: Arc::clone(&self.model),
            web: Arc::clone(&self.web),
            social: Arc::clone(&self.social),
            config: self.config.clone(),
            search,
            tx,
            cancel: cancel.clone(),
        };
        let span = info_span!("research_run", %run_id);
        tokio::spawn(driver.run().instrument(span));

        Ok(ResearchStream {
            events: rx,
            cancel,
            run_id,
        })
    }
}

/// Owns one run from discovery to the terminal event.
struct Driver<M, W, S> {
    model: Arc<M>,
    web: Arc<W>,
    social: Arc<S>,
    config: PipelineConfig,
    search: SearchConfig,
    tx: mpsc::Sender<ResearchEvent>,
    cancel: CancellationToken,
}

impl<M, W, S> Driver<M, W, S>
where
    M: LanguageModelClient + 'static,
    W: WebContentSource + 'static,
    S: SocialProfileSource + 'static,
{
    /// Emit an event unless the run has been cancelled.
    ///
    /// Returns false when emission is no longer possible (cancellation or
    /// a dropped receiver, which is treated the same way).
    async fn emit(&self, event: ResearchEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.tx.send(event).await.is_ok()
    }

    async fn run(self) {
        let mut phase = RunPhase::Idle;

        // Idle → Discovering
        phase = self.advance(phase, RunPhase::Discovering);
        self.emit(ResearchEvent::Status {
            message: "Starting deep company research...".to_string(),
        })
        .await;

        let candidates = match discovery::discover(
            &self.search,
            self.model.as_ref(),
            self.config.discovery_limit,
            self.config.model_timeout,
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(error = %e, "Discovery failed, run aborted");
                self.advance(phase, RunPhase::Errored);
                self.emit(ResearchEvent::Error {
                    message: e.to_string(),
                })
                .await;
                return;
            }
        };

        let total = candidates.len();
        info!(total, "Discovery complete");
        self.emit(ResearchEvent::Status {
            message: format!("Identified {} candidates. Collecting data...", total),
        })
        .await;

        // Discovering → Collecting (only with at least one candidate)
        phase = self.advance(phase, RunPhase::Collecting);

        let analyses = self.collect_all(candidates, total).await;

        if self.cancel.is_cancelled() {
            debug!("Run cancelled, exiting without terminal event");
            return;
        }

        if !self.config.skip_insights {
            if let Some(text) = insights::generate_insights(
                &analyses,
                self.model.as_ref(),
                self.config.model_timeout,
            )
            .await
            {
                self.emit(ResearchEvent::MarketInsights { insights: text })
                    .await;
            }
        }

        // Collecting → Done, terminal event exactly once, strictly last
        self.advance(phase, RunPhase::Done);
        self.emit(ResearchEvent::Status {
            message: "Research completed.".to_string(),
        })
        .await;
        self.emit(ResearchEvent::Done).await;
    }

    fn advance(&self, from: RunPhase, to: RunPhase) -> RunPhase {
        debug!(%from, %to, "Run phase transition");
        to
    }

    /// Fan out candidates to the bounded worker pool and wait for all of
    /// them. Returns the surviving analyses in completion order.
    async fn collect_all(&self, candidates: Vec<Candidate>, total: usize) -> Vec<CompanyAnalysis> {
        let (report_tx, report_rx) = mpsc::channel::<WorkerReport>(self.config.channel_capacity);

        let publisher = tokio::spawn(publish_reports(
            report_rx,
            self.tx.clone(),
            self.cancel.clone(),
            total,
        ));

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut workers = JoinSet::new();

        for candidate in candidates {
            // Stop dispatching new workers once cancelled; in-flight ones
            // run to their own timeouts.
            let permit = tokio::select! {
                _ = self.cancel.cancelled() => break,
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break, // semaphore closed, cannot happen in practice
                },
            };

            let worker = Worker {
                model: Arc::clone(&self.model),
                web: Arc::clone(&self.web),
                social: Arc::clone(&self.social),
                config: self.config.clone(),
                search: self.search.clone(),
                reports: report_tx.clone(),
                cancel: self.cancel.clone(),
            };
            workers.spawn(async move {
                worker.process(candidate).await;
                drop(permit);
            });
        }

        // Close our end so the publisher sees EOF once all workers finish.
        drop(report_tx);
        while workers.join_next().await.is_some() {}

        publisher.await.unwrap_or_default()
    }
}

/// One candidate's journey: collect, synthesize, report.
struct Worker<M, W, S> {
    model: Arc<M>,
    web: Arc<W>,
    social: Arc<S>,
    config: PipelineConfig,
    search: SearchConfig,
    reports: mpsc::Sender<WorkerReport>,
    cancel: CancellationToken,
}

impl<M, W, S> Worker<M, W, S>
where
    M: LanguageModelClient,
    W: WebContentSource,
    S: SocialProfileSource,
{
    async fn process(&self, candidate: Candidate) {
        debug!(
            company = %candidate.name,
            source = %candidate.source_label,
            "Processing candidate"
        );
        let raw = collector::collect(
            &candidate,
            self.web.as_ref(),
            self.social.as_ref(),
            &self.config,
            &self.reports,
        )
        .await;

        if raw.is_empty() {
            warn!(company = %candidate.name, "No data collected, dropping candidate");
            let _ = self
                .reports
                .send(WorkerReport::Dropped {
                    name: candidate.name,
                    reason: "no data collected".to_string(),
                })
                .await;
            return;
        }

        // Don't start a synthesis call for a cancelled run.
        if self.cancel.is_cancelled() {
            return;
        }

        match synthesis::synthesize(
            &candidate,
            &raw,
            &self.search,
            self.model.as_ref(),
            self.config.model_timeout,
        )
        .await
        {
            Ok(analysis) => {
                let _ = self
                    .reports
                    .send(WorkerReport::Completed(Box::new(analysis)))
                    .await;
            }
            Err(e) => {
                warn!(company = %candidate.name, error = %e, "Synthesis failed, dropping candidate");
                let _ = self
                    .reports
                    .send(WorkerReport::Dropped {
                        name: candidate.name,
                        reason: e.to_string(),
                    })
                    .await;
            }
        }
    }
}

/// The single publisher task: serializes all worker reports onto the
/// outward channel and owns the progress counters.
///
/// Workers may complete in any order, but each event leaves here as a
/// complete unit and `current` only ever grows. After cancellation the
/// channel is drained without emitting.
async fn publish_reports(
    mut reports: mpsc::Receiver<WorkerReport>,
    tx: mpsc::Sender<ResearchEvent>,
    cancel: CancellationToken,
    total: usize,
) -> Vec<CompanyAnalysis> {
    let mut completed = 0usize;
    let mut analyses = Vec::new();

    while let Some(report) = reports.recv().await {
        if cancel.is_cancelled() {
            continue; // drain silently
        }
        match report {
            WorkerReport::Source(source) => {
                let _ = tx.send(ResearchEvent::SourceResource { source }).await;
            }
            WorkerReport::Completed(analysis) => {
                completed += 1;
                analyses.push((*analysis).clone());
                let _ = tx
                    .send(ResearchEvent::CompanyResult { data: *analysis })
                    .await;
                let _ = tx
                    .send(ResearchEvent::Progress {
                        current: completed,
                        total,
                    })
                    .await;
            }
            WorkerReport::Dropped { name, reason } => {
                debug!(company = %name, reason = %reason, "Candidate dropped");
                completed += 1;
                let _ = tx
                    .send(ResearchEvent::Progress {
                        current: completed,
                        total,
                    })
                    .await;
            }
        }
    }

    analyses
}
