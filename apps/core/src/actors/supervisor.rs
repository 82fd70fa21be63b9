use crate::actors::enricher::KeywordEnricher;
use crate::actors::messages::{
    AppError, BriefMessage, BriefView, EnrichmentOutcome, EnrichmentSuggestion, EnrichmentTicket,
};
use crate::actors::traits::{LinguisticAnalyzer, SearchProvider};
use crate::brief::outline::generate_outline;
use crate::brief::store::BriefStore;
use crate::models::{BestPractice, FieldChange};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument, warn};

/// Timeout for local operations (derivation + snapshot write).
const LOCAL_OP_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for a full enrichment round trip, as seen by the caller.
const ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(180);

/// A handle to the `BriefActor`.
///
/// This is the primary entry point for the presentation layer. The actor is the single
/// writer of the brief: every mutation is serialized through its mailbox and followed by
/// a snapshot write.
#[derive(Clone)]
pub struct BriefActorHandle {
    sender: mpsc::Sender<BriefMessage>,
}

impl BriefActorHandle {
    /// Spawns the actor around an opened store and an enrichment pipeline.
    pub fn spawn<S, L>(store: BriefStore, enricher: KeywordEnricher<S, L>) -> Self
    where
        S: SearchProvider,
        L: LinguisticAnalyzer,
    {
        let (sender, receiver) = mpsc::channel(32);
        let runner = BriefRunner::new(receiver, sender.downgrade(), store, Arc::new(enricher));
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    /// Applies a single field change.
    pub async fn apply_change(&self, change: FieldChange) -> Result<BriefView, AppError> {
        self.apply_changes(vec![change]).await
    }

    /// Applies several field changes atomically (one derivation pass each, one write).
    #[instrument(skip(self))]
    pub async fn apply_changes(&self, changes: Vec<FieldChange>) -> Result<BriefView, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(BriefMessage::ApplyChanges {
            changes,
            responder: send,
        })
        .await?;
        timeout(LOCAL_OP_TIMEOUT, recv).await??
    }

    /// Toggles one best practice on or off.
    #[instrument(skip(self))]
    pub async fn toggle_practice(&self, practice: BestPractice) -> Result<BriefView, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(BriefMessage::TogglePractice {
            practice,
            responder: send,
        })
        .await?;
        timeout(LOCAL_OP_TIMEOUT, recv).await??
    }

    /// Replaces the outline with the local six-section template.
    #[instrument(skip(self))]
    pub async fn generate_outline(&self) -> Result<BriefView, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(BriefMessage::GenerateOutline { responder: send })
            .await?;
        timeout(LOCAL_OP_TIMEOUT, recv).await??
    }

    /// Runs keyword enrichment and waits for it to finish.
    ///
    /// Returns `AlreadyRunning` without doing anything when another enrichment is in
    /// flight. Enrichment failures are returned as errors and also recorded as the
    /// view's `last_error`.
    #[instrument(skip(self))]
    pub async fn analyze_keyword(&self) -> Result<EnrichmentOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(BriefMessage::AnalyzeKeyword { responder: send })
            .await?;
        timeout(ENRICHMENT_TIMEOUT, recv).await??
    }

    /// Current observable state.
    pub async fn snapshot(&self) -> Result<BriefView, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(BriefMessage::Snapshot { responder: send }).await?;
        Ok(timeout(LOCAL_OP_TIMEOUT, recv).await??)
    }

    /// Asks the actor to stop after the messages already queued.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.send(BriefMessage::Shutdown).await
    }

    async fn send(&self, msg: BriefMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(format!("Brief actor closed: {}", e)))
    }
}

/// The in-flight enrichment, if any.
struct PendingEnrichment {
    ticket: EnrichmentTicket,
    responder: oneshot::Sender<Result<EnrichmentOutcome, AppError>>,
}

// --- Actor Runner ---
struct BriefRunner<S, L>
where
    S: SearchProvider,
    L: LinguisticAnalyzer,
{
    receiver: mpsc::Receiver<BriefMessage>,
    /// Used to post enrichment completions back into our own mailbox without
    /// keeping the channel alive once every handle is dropped.
    mailbox: mpsc::WeakSender<BriefMessage>,
    store: BriefStore,
    enricher: Arc<KeywordEnricher<S, L>>,
    pending: Option<PendingEnrichment>,
    /// Bumped on every keyword change; completions from an older generation are stale.
    keyword_generation: u64,
    last_error: Option<String>,
}

impl<S, L> BriefRunner<S, L>
where
    S: SearchProvider,
    L: LinguisticAnalyzer,
{
    fn new(
        receiver: mpsc::Receiver<BriefMessage>,
        mailbox: mpsc::WeakSender<BriefMessage>,
        store: BriefStore,
        enricher: Arc<KeywordEnricher<S, L>>,
    ) -> Self {
        Self {
            receiver,
            mailbox,
            store,
            enricher,
            pending: None,
            keyword_generation: 0,
            last_error: None,
        }
    }

    async fn run(mut self) {
        info!("BriefActor started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, BriefMessage::Shutdown) {
                break;
            }
            self.handle_message(msg).await;
        }
        info!("BriefActor stopped");
    }

    fn view(&self) -> BriefView {
        BriefView::new(
            self.store.brief().clone(),
            self.pending.is_some(),
            self.last_error.clone(),
        )
    }

    async fn handle_message(&mut self, msg: BriefMessage) {
        match msg {
            BriefMessage::ApplyChanges { changes, responder } => {
                let result = self.apply_changes(changes).await;
                let _ = responder.send(result);
            }
            BriefMessage::TogglePractice {
                practice,
                responder,
            } => {
                let result = match self.store.toggle(practice).await {
                    Ok(_) => Ok(self.view()),
                    Err(e) => {
                        error!("Failed to persist practice toggle: {}", e);
                        Err(e)
                    }
                };
                let _ = responder.send(result);
            }
            BriefMessage::GenerateOutline { responder } => {
                let outline = generate_outline(self.store.brief());
                let result = self.apply_changes(vec![FieldChange::Outline(outline)]).await;
                let _ = responder.send(result);
            }
            BriefMessage::AnalyzeKeyword { responder } => {
                self.start_enrichment(responder);
            }
            BriefMessage::EnrichmentFinished { ticket, result } => {
                self.finish_enrichment(ticket, result).await;
            }
            BriefMessage::Snapshot { responder } => {
                let _ = responder.send(self.view());
            }
            BriefMessage::Shutdown => {}
        }
    }

    async fn apply_changes(&mut self, changes: Vec<FieldChange>) -> Result<BriefView, AppError> {
        let previous_keyword = self.store.brief().keyword.clone();
        match self.store.update(changes).await {
            Ok(update) => {
                if update.brief.keyword != previous_keyword {
                    self.keyword_generation += 1;
                }
                Ok(self.view())
            }
            Err(e) => {
                error!("Failed to persist brief update: {}", e);
                Err(e)
            }
        }
    }

    fn start_enrichment(&mut self, responder: oneshot::Sender<Result<EnrichmentOutcome, AppError>>) {
        if self.pending.is_some() {
            info!("Keyword analysis already in flight, ignoring trigger");
            let _ = responder.send(Ok(EnrichmentOutcome::AlreadyRunning));
            return;
        }

        let keyword = self.store.brief().keyword.trim().to_string();
        if keyword.is_empty() {
            let _ = responder.send(Err(AppError::Validation(
                "Enter a keyword before analyzing".to_string(),
            )));
            return;
        }

        let Some(mailbox) = self.mailbox.upgrade() else {
            let _ = responder.send(Err(AppError::Actor("Brief actor is shutting down".to_string())));
            return;
        };

        let ticket = EnrichmentTicket {
            keyword: keyword.clone(),
            generation: self.keyword_generation,
        };
        self.last_error = None;
        self.pending = Some(PendingEnrichment {
            ticket: ticket.clone(),
            responder,
        });

        info!(keyword = %keyword, generation = ticket.generation, "Starting keyword analysis");
        let enricher = Arc::clone(&self.enricher);
        tokio::spawn(async move {
            let result = enricher.enrich(&keyword).await;
            if mailbox
                .send(BriefMessage::EnrichmentFinished { ticket, result })
                .await
                .is_err()
            {
                warn!("Brief actor stopped before enrichment finished");
            }
        });
    }

    async fn finish_enrichment(
        &mut self,
        ticket: EnrichmentTicket,
        result: Result<EnrichmentSuggestion, AppError>,
    ) {
        let Some(pending) = self.pending.take() else {
            warn!("Received enrichment result with nothing in flight");
            return;
        };
        if pending.ticket != ticket {
            warn!("Enrichment ticket mismatch, discarding result");
        }

        let outcome = match result {
            Err(e) => {
                warn!("Keyword analysis failed: {}", e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
            Ok(_) if ticket.generation != self.keyword_generation || pending.ticket != ticket => {
                warn!(
                    keyword = %ticket.keyword,
                    "Keyword changed during analysis, discarding stale suggestion"
                );
                Ok(EnrichmentOutcome::Stale)
            }
            Ok(suggestion) => match self.store.update(suggestion.into_changes()).await {
                Ok(update) => {
                    info!(keyword = %ticket.keyword, "Merged keyword analysis into brief");
                    Ok(EnrichmentOutcome::Applied(update.brief))
                }
                Err(e) => {
                    error!("Failed to persist enrichment: {}", e);
                    self.last_error = Some(e.to_string());
                    Err(e)
                }
            },
        };

        let _ = pending.responder.send(outcome);
    }
}
