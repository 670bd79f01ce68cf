//! Burn scheduler service: due-check/execute cycle, polling loop, config
//! operations.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use {
    async_trait::async_trait,
    tokio::{
        sync::{Mutex, Notify, RwLock},
        task::JoinHandle,
    },
    tracing::{debug, error, info, warn},
};

use {emberdash_store::KvStore, uuid::Uuid};

use crate::{
    error::{Error, Result},
    schedule::{is_due, ms_until_next, next_occurrence_ms},
    store::ScheduleStore,
    types::{
        BurnRecord, BurnSchedule, BurnSchedulePatch, BurnStatus, RecordStatus, TokenKind,
        clamp_percentage,
    },
};

/// How often the poller samples the due-check gate.
pub const POLL_INTERVAL_MS: u64 = 60_000;

/// Balance snapshot returned by the wallet registry.
#[derive(Debug, Clone)]
pub struct WalletBalance {
    /// Decimal-as-string, the registry's native representation.
    pub balance: String,
}

/// Capability: resolve a wallet id to its current balance.
#[async_trait]
pub trait WalletLookup: Send + Sync {
    async fn find_wallet(&self, id: &str) -> Result<Option<WalletBalance>>;
}

/// Capability: perform the on-chain transfer. Returns a transaction
/// reference on success; unsupported token kinds must fail explicitly.
#[async_trait]
pub trait BurnInvoker: Send + Sync {
    async fn invoke(&self, kind: TokenKind, amount: &str) -> Result<String>;
}

/// Injectable clock so schedule math is testable.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// The burn scheduler.
pub struct BurnService {
    store: ScheduleStore,
    wallets: Arc<dyn WalletLookup>,
    invoker: Arc<dyn BurnInvoker>,
    clock: Arc<dyn Clock>,
    /// Optional bound on the external invocation; `None` waits indefinitely.
    invoke_timeout: Option<Duration>,
    in_flight: AtomicBool,
    running: RwLock<bool>,
    wake_notify: Arc<Notify>,
    timer_handle: Mutex<Option<JoinHandle<()>>>,
}

impl BurnService {
    pub fn new(
        kv: Arc<dyn KvStore>,
        wallets: Arc<dyn WalletLookup>,
        invoker: Arc<dyn BurnInvoker>,
    ) -> Arc<Self> {
        Self::with_options(kv, wallets, invoker, Arc::new(SystemClock), None)
    }

    /// Full constructor: custom clock and optional invocation timeout.
    pub fn with_options(
        kv: Arc<dyn KvStore>,
        wallets: Arc<dyn WalletLookup>,
        invoker: Arc<dyn BurnInvoker>,
        clock: Arc<dyn Clock>,
        invoke_timeout: Option<Duration>,
    ) -> Arc<Self> {
        Arc::new(Self {
            store: ScheduleStore::new(kv),
            wallets,
            invoker,
            clock,
            invoke_timeout,
            in_flight: AtomicBool::new(false),
            running: RwLock::new(false),
            wake_notify: Arc::new(Notify::new()),
            timer_handle: Mutex::new(None),
        })
    }

    // ── Config & history ────────────────────────────────────────────────

    /// Current schedule, created with defaults on first access.
    pub async fn config(&self) -> Result<BurnSchedule> {
        self.store.load(self.clock.now_ms()).await
    }

    /// Apply a partial update. Percentage is clamped, the next occurrence is
    /// recomputed, and the result persisted.
    pub async fn save_config(&self, patch: BurnSchedulePatch) -> Result<BurnSchedule> {
        let now = self.clock.now_ms();
        let mut schedule = self.store.load(now).await?;

        if let Some(enabled) = patch.enabled {
            schedule.enabled = enabled;
        }
        if let Some(day_of_week) = patch.day_of_week {
            schedule.day_of_week = day_of_week;
        }
        if let Some(time_of_day) = patch.time_of_day {
            schedule.time_of_day = time_of_day;
        }
        if let Some(tz) = patch.tz {
            schedule.tz = if tz.is_empty() { None } else { Some(tz) };
        }
        if let Some(percentage) = patch.percentage {
            schedule.percentage = percentage;
        }
        if let Some(id) = patch.source_wallet_id {
            schedule.source_wallet_id = if id.is_empty() { None } else { Some(id) };
        }
        if let Some(kind) = patch.token_kind {
            schedule.token_kind = kind;
        }

        schedule.percentage = clamp_percentage(schedule.percentage);
        schedule.next_scheduled_ms = next_occurrence_ms(
            schedule.day_of_week,
            schedule.time_of_day,
            schedule.tz.as_deref(),
            now,
        )?;

        self.store.save(&schedule).await?;
        info!(
            enabled = schedule.enabled,
            next = schedule.next_scheduled_ms,
            "burn schedule updated"
        );
        Ok(schedule)
    }

    /// History entries, newest first.
    pub async fn history(&self, limit: usize) -> Result<Vec<BurnRecord>> {
        self.store.history(limit).await
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.store.clear_history().await
    }

    /// Scheduler summary.
    pub async fn status(&self) -> Result<BurnStatus> {
        let now = self.clock.now_ms();
        let schedule = self.store.load(now).await?;
        Ok(BurnStatus {
            running: *self.running.read().await,
            enabled: schedule.enabled,
            next_scheduled_ms: schedule.next_scheduled_ms,
            last_executed_ms: schedule.last_executed_ms,
            ms_until_next: ms_until_next(&schedule, now),
        })
    }

    // ── Due-check / execute ─────────────────────────────────────────────

    /// Perform one due-check/execute cycle. Returns whether a burn was
    /// executed. A cycle arriving while another is in flight is skipped
    /// outright, never queued.
    pub async fn run_due_check_once(&self) -> Result<bool> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("burn cycle already in flight, skipping tick");
            return Ok(false);
        }
        let result = self.due_check_cycle().await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn due_check_cycle(&self) -> Result<bool> {
        let now = self.clock.now_ms();
        let mut schedule = self.store.load(now).await?;
        if !is_due(&schedule, now) {
            return Ok(false);
        }

        let scheduled_for = schedule.next_scheduled_ms;
        info!(scheduled_for, "scheduled burn time reached");

        // Configuration preconditions record a failure but intentionally do
        // NOT advance the schedule: the occurrence stays due so a fix within
        // the execution window still fires.
        let Some(wallet_id) = schedule.source_wallet_id.clone() else {
            warn!("scheduled burn failed: no source wallet configured");
            self.record(
                &schedule,
                scheduled_for,
                "0",
                RecordStatus::Failed,
                None,
                Some(Error::MissingWallet.to_string()),
            )
            .await?;
            return Ok(false);
        };

        let wallet = match self.wallets.find_wallet(&wallet_id).await? {
            Some(wallet) => wallet,
            None => {
                warn!(id = %wallet_id, "scheduled burn failed: wallet not found");
                self.record(
                    &schedule,
                    scheduled_for,
                    "0",
                    RecordStatus::Failed,
                    None,
                    Some(Error::wallet_not_found(&wallet_id).to_string()),
                )
                .await?;
                return Ok(false);
            },
        };

        let balance: f64 = wallet.balance.parse().unwrap_or(0.0);
        let amount = format_amount(balance * schedule.percentage / 100.0);

        if balance <= 0.0 {
            // Skipped, not failed — and the schedule still advances so the
            // empty wallet doesn't re-trigger every tick of the window.
            warn!(id = %wallet_id, "scheduled burn skipped: insufficient balance");
            self.record(
                &schedule,
                scheduled_for,
                &amount,
                RecordStatus::Skipped,
                None,
                Some(Error::InsufficientBalance.to_string()),
            )
            .await?;
            self.advance(&mut schedule, true).await?;
            return Ok(false);
        }

        info!(amount = %amount, kind = %schedule.token_kind, "executing scheduled burn");
        match self.invoke(schedule.token_kind, &amount).await {
            Ok(tx_hash) => {
                info!(tx = %tx_hash, "scheduled burn executed");
                self.record(
                    &schedule,
                    scheduled_for,
                    &amount,
                    RecordStatus::Executed,
                    Some(tx_hash),
                    None,
                )
                .await?;
                self.advance(&mut schedule, true).await?;
                Ok(true)
            },
            Err(e) => {
                error!(error = %e, "scheduled burn failed");
                self.record(
                    &schedule,
                    scheduled_for,
                    "0",
                    RecordStatus::Failed,
                    None,
                    Some(e.to_string()),
                )
                .await?;
                // Advance anyway: a persistent failure retries next week,
                // not on every tick of the same window.
                self.advance(&mut schedule, false).await?;
                Ok(false)
            },
        }
    }

    async fn invoke(&self, kind: TokenKind, amount: &str) -> Result<String> {
        match self.invoke_timeout {
            Some(limit) => tokio::time::timeout(limit, self.invoker.invoke(kind, amount))
                .await
                .map_err(|_| {
                    Error::invocation(format!("timed out after {}s", limit.as_secs()))
                })?,
            None => self.invoker.invoke(kind, amount).await,
        }
    }

    async fn record(
        &self,
        schedule: &BurnSchedule,
        scheduled_for_ms: u64,
        amount: &str,
        status: RecordStatus,
        tx_hash: Option<String>,
        error_msg: Option<String>,
    ) -> Result<()> {
        self.store
            .append(BurnRecord {
                id: Uuid::new_v4().to_string(),
                created_at_ms: self.clock.now_ms(),
                scheduled_for_ms,
                amount: amount.to_string(),
                token_kind: schedule.token_kind,
                status,
                tx_hash,
                error: error_msg,
            })
            .await
    }

    /// Move the schedule past the occurrence that just fired. `executed`
    /// also stamps `last_executed_ms` (successful and skipped firings).
    async fn advance(&self, schedule: &mut BurnSchedule, executed: bool) -> Result<()> {
        let now = self.clock.now_ms();
        if executed {
            schedule.last_executed_ms = Some(now);
        }
        // A firing must never leave the same occurrence due: nudge the base
        // past the exact-match tie-break so the recomputed occurrence lands
        // a full week out even when the clock still reads the fired instant.
        let base = now.max(schedule.next_scheduled_ms + 1);
        schedule.next_scheduled_ms = next_occurrence_ms(
            schedule.day_of_week,
            schedule.time_of_day,
            schedule.tz.as_deref(),
            base,
        )?;
        self.store.save(schedule).await?;
        debug!(next = schedule.next_scheduled_ms, "burn schedule advanced");
        Ok(())
    }

    // ── Polling ─────────────────────────────────────────────────────────

    /// Start the poller: one cycle immediately, then every
    /// [`POLL_INTERVAL_MS`] until [`Self::stop`].
    pub async fn start(self: &Arc<Self>) -> Result<()> {
        let schedule = self.store.load(self.clock.now_ms()).await?;
        info!(
            enabled = schedule.enabled,
            next = schedule.next_scheduled_ms,
            "burn poller starting"
        );

        *self.running.write().await = true;

        let svc = Arc::clone(self);
        let handle = tokio::spawn(async move {
            svc.poll_loop().await;
        });
        *self.timer_handle.lock().await = Some(handle);
        Ok(())
    }

    /// Stop the poller.
    pub async fn stop(&self) {
        *self.running.write().await = false;
        self.wake_notify.notify_one();

        let mut handle = self.timer_handle.lock().await;
        if let Some(h) = handle.take() {
            h.abort();
        }
        info!("burn poller stopped");
    }

    async fn poll_loop(self: &Arc<Self>) {
        loop {
            if !*self.running.read().await {
                break;
            }

            // Cycle errors surface in logs and history, never kill the loop.
            if let Err(e) = self.run_due_check_once().await {
                error!(error = %e, "burn cycle failed");
            }

            let notify = Arc::clone(&self.wake_notify);
            tokio::select! {
                () = tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)) => {},
                () = notify.notified() => {
                    debug!("burn poller woken");
                },
            }
        }
    }
}

/// Fixed 6-fractional-digit decimal, the registry's amount encoding.
fn format_amount(amount: f64) -> String {
    format!("{amount:.6}")
}
