use super::executor::execute_batch;
use super::gate::GateDecision;
use super::policy::{Candidate, RetentionPolicy, scan_candidates};
use super::report;
use super::selection::parse_selection_expression;
use super::session::{Session, SessionManager};
use crate::catalog::MediaCatalog;
use crate::commands::Command;
use crate::error::{GateError, SelectionError};
use crate::storage;
use crate::transport::Channel;
use chrono::Utc;
use std::sync::Arc;

/// Headroom below the transport's hard payload limit, so markers and
/// formatting never push a report chunk over it.
const REPLY_MARGIN: usize = 296;

/// The cleanup session engine.
///
/// One instance serves every channel; state lives in per-channel
/// [`Session`]s handed out by the [`SessionManager`]. `handle` takes the
/// session lock for the entire command, including a full deletion batch,
/// which serializes all transitions within a channel.
pub struct CleanupEngine {
    catalog: Arc<dyn MediaCatalog>,
    notifier: Arc<dyn Channel>,
    sessions: SessionManager,
    policy: RetentionPolicy,
    capacity_gb: f64,
    server_label: String,
}

impl CleanupEngine {
    pub fn new(
        catalog: Arc<dyn MediaCatalog>,
        notifier: Arc<dyn Channel>,
        policy: RetentionPolicy,
        capacity_gb: f64,
        server_label: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            notifier,
            sessions: SessionManager::new(),
            policy,
            capacity_gb,
            server_label: server_label.into(),
        }
    }

    fn reply_budget(&self) -> usize {
        self.notifier
            .max_message_length()
            .saturating_sub(REPLY_MARGIN)
            .max(REPLY_MARGIN)
    }

    /// Process one operator command to completion.
    pub async fn handle(&self, chat_id: &str, command: Command) -> anyhow::Result<()> {
        let session = self.sessions.session(chat_id);
        let mut session = session.lock().await;

        match command {
            Command::Start | Command::Help => {
                self.notifier.send(report::help_text(), chat_id).await?;
            }
            Command::Status => {
                let text = report::status_text(
                    &self.server_label,
                    self.policy.max_view_count,
                    self.policy.min_days_since_last_view,
                );
                self.notifier.send(&text, chat_id).await?;
            }
            Command::Space => self.space(chat_id).await?,
            Command::Preview => self.preview(chat_id, &mut session).await?,
            Command::ShowSelection => {
                if self.require_candidates(chat_id, &session).await? {
                    self.send_selection_page(chat_id, &session).await?;
                }
            }
            Command::Toggle(number) => {
                if !self.require_candidates(chat_id, &session).await? {
                    return Ok(());
                }
                let result = if number == 0 {
                    Err(SelectionError::IndexOutOfRange {
                        index: 0,
                        len: session.selection.total(),
                    })
                } else {
                    session.selection.toggle(number - 1)
                };
                match result {
                    Ok(_) => self.send_selection_page(chat_id, &session).await?,
                    Err(e) => {
                        self.notifier.send(&format!("❌ {e}"), chat_id).await?;
                    }
                }
            }
            Command::Page(direction) => {
                if self.require_candidates(chat_id, &session).await? {
                    session.selection.turn_page(direction);
                    self.send_selection_page(chat_id, &session).await?;
                }
            }
            Command::SelectAll => {
                if self.require_candidates(chat_id, &session).await? {
                    session.selection.select_all();
                    self.send_selection_page(chat_id, &session).await?;
                }
            }
            Command::ClearAll => {
                if self.require_candidates(chat_id, &session).await? {
                    session.selection.clear_all();
                    self.send_selection_page(chat_id, &session).await?;
                }
            }
            Command::Arm => {
                if self.require_candidates(chat_id, &session).await? {
                    let snapshot = session.selected_candidates();
                    self.arm(chat_id, &mut session, snapshot).await?;
                }
            }
            Command::ArmExpression(expr) => {
                if !self.require_candidates(chat_id, &session).await? {
                    return Ok(());
                }
                match parse_selection_expression(&expr, session.candidates.len()) {
                    Ok(indices) => {
                        session.selection.set(indices);
                        let snapshot = session.selected_candidates();
                        self.arm(chat_id, &mut session, snapshot).await?;
                    }
                    Err(e) => {
                        let text = format!(
                            "❌ Invalid selection: {e}\n\nExamples:\n\
                             • /delete all\n• /delete 1,5,10\n• /delete 1-20\n• /delete 1-10,25,30-40"
                        );
                        self.notifier.send(&text, chat_id).await?;
                    }
                }
            }
            Command::Cancel => {
                if session.gate.is_armed() {
                    session.gate.disarm();
                    self.notifier.send("✅ Deletion cancelled.", chat_id).await?;
                } else {
                    self.notifier.send("Nothing to cancel.", chat_id).await?;
                }
            }
            Command::Unknown(raw) => {
                let text = format!("Unknown command: {raw}\nUse /help to see available commands.");
                self.notifier.send(&text, chat_id).await?;
            }
            Command::Text(input) => {
                if session.gate.is_armed() {
                    match session.gate.resolve(&input) {
                        GateDecision::Proceed(pending) => {
                            self.run_batch(chat_id, &mut session, pending).await?;
                        }
                        GateDecision::Cancelled => {
                            self.notifier.send("✅ Deletion cancelled.", chat_id).await?;
                        }
                        GateDecision::Reprompt => {
                            self.notifier.send(&report::reprompt(), chat_id).await?;
                        }
                    }
                } else {
                    self.notifier
                        .send("👋 Use /help to see available commands.", chat_id)
                        .await?;
                }
            }
        }

        Ok(())
    }

    /// Scan the catalog and install a fresh candidate list.
    ///
    /// A failed scan leaves the existing session exactly as it was.
    async fn preview(&self, chat_id: &str, session: &mut Session) -> anyhow::Result<()> {
        self.notifier
            .send("🔍 Scanning your media library...\nThis may take a moment...", chat_id)
            .await?;

        let candidates = match scan_candidates(self.catalog.as_ref(), &self.policy, Utc::now()).await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(error = %e, "preview scan failed");
                self.notifier.send(&format!("❌ Error: {e}"), chat_id).await?;
                return Ok(());
            }
        };

        if candidates.is_empty() {
            self.notifier
                .send("✅ No movies found matching criteria!", chat_id)
                .await?;
            return Ok(());
        }

        let messages = report::preview_messages(
            &candidates,
            self.policy.min_days_since_last_view,
            self.reply_budget(),
        );
        session.set_candidates(candidates);

        for message in messages {
            self.notifier.send(&message, chat_id).await?;
        }
        self.notifier.send(report::preview_hint(), chat_id).await?;
        Ok(())
    }

    async fn space(&self, chat_id: &str) -> anyhow::Result<()> {
        self.notifier
            .send("💾 Analyzing storage usage...\nThis may take a moment...", chat_id)
            .await?;

        match storage::analyze(self.catalog.as_ref()).await {
            Ok(stats) => {
                let text = storage::format_report(&stats, self.capacity_gb);
                self.notifier.send_chunked(&text, chat_id).await?;
            }
            Err(e) => {
                tracing::error!(error = %e, "storage analysis failed");
                self.notifier.send(&format!("❌ Error: {e}"), chat_id).await?;
            }
        }
        Ok(())
    }

    async fn require_candidates(
        &self,
        chat_id: &str,
        session: &Session,
    ) -> anyhow::Result<bool> {
        if session.has_candidates() {
            return Ok(true);
        }
        self.notifier
            .send("⚠️ No movies available.\n\nPlease run /preview first.", chat_id)
            .await?;
        Ok(false)
    }

    async fn send_selection_page(&self, chat_id: &str, session: &Session) -> anyhow::Result<()> {
        self.notifier
            .send(&report::selection_page(session), chat_id)
            .await
    }

    async fn arm(
        &self,
        chat_id: &str,
        session: &mut Session,
        snapshot: Vec<Candidate>,
    ) -> anyhow::Result<()> {
        let prompt = report::confirmation_prompt(&snapshot);
        match session.gate.arm(snapshot) {
            Ok(()) => self.notifier.send(&prompt, chat_id).await,
            Err(GateError::EmptySelection) => {
                self.notifier
                    .send("⚠️ No movies selected! Pick at least one with /toggle or /select.", chat_id)
                    .await
            }
        }
    }

    /// Run a confirmed deletion batch. Progress notifications are
    /// fire-and-forget; the final summary and the unconditional session
    /// reset happen regardless of per-item failures.
    async fn run_batch(
        &self,
        chat_id: &str,
        session: &mut Session,
        pending: Vec<Candidate>,
    ) -> anyhow::Result<()> {
        self.notifier
            .send(&report::deletion_started(pending.len()), chat_id)
            .await?;

        let summary = {
            let notifier = Arc::clone(&self.notifier);
            let chat = chat_id.to_string();
            execute_batch(self.catalog.as_ref(), &pending, move |processed, total| {
                let notifier = Arc::clone(&notifier);
                let chat = chat.clone();
                tokio::spawn(async move {
                    if let Err(e) = notifier.send(&report::progress_line(processed, total), &chat).await
                    {
                        tracing::warn!(error = %e, "progress notification failed");
                    }
                });
            })
            .await
        };

        session.clear();

        // One failure line per item: a large batch can outgrow the
        // transport limit, so the summary goes through the splitter.
        self.notifier
            .send_chunked(&report::summary_message(&summary), chat_id)
            .await?;
        Ok(())
    }
}
