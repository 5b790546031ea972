//! Deferred mutation channel and the background settings worker.
//!
//! Producers on the render thread set request flags; the single worker
//! thread observes and clears them, performing the side effect. Each flag
//! is consumed with one atomic exchange, so an observe-then-clear race with
//! a concurrent re-set cannot lose a request: a flag set again after the
//! exchange is a fresh occurrence and will be processed on a later
//! iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::SettingsStore;
use crate::display::DisplayControl;
use crate::locale::StringTable;
use crate::scene::SceneLifecycle;
use crate::ui::DiagnosticLog;

/// Sleep interval when no flag is pending.
pub const WORKER_IDLE_POLL: Duration = Duration::from_millis(50);

/// Bound on waiting for the worker to finish at scene exit.
pub const WORKER_JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// The request flags of the deferred mutation channel.
///
/// Setting a flag that is already set is an idempotent no-op; the pending
/// request coalesces. For the brightness flag the applied value is whatever
/// the store holds when the worker gets to it, so a dragged slider results
/// in one hardware call with the latest level.
#[derive(Default)]
pub struct RequestFlags {
    save: AtomicBool,
    brightness: AtomicBool,
    string_reload: AtomicBool,
}

impl RequestFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_save(&self) {
        self.save.store(true, Ordering::SeqCst);
    }

    pub fn request_brightness_change(&self) {
        self.brightness.store(true, Ordering::SeqCst);
    }

    pub fn request_string_reload(&self) {
        self.string_reload.store(true, Ordering::SeqCst);
    }

    pub fn save_pending(&self) -> bool {
        self.save.load(Ordering::SeqCst)
    }

    pub fn brightness_pending(&self) -> bool {
        self.brightness.load(Ordering::SeqCst)
    }

    pub fn string_reload_pending(&self) -> bool {
        self.string_reload.load(Ordering::SeqCst)
    }

    // Consumer side: observe-and-clear as a single exchange.

    fn take_save(&self) -> bool {
        self.save.swap(false, Ordering::SeqCst)
    }

    fn take_brightness(&self) -> bool {
        self.brightness.swap(false, Ordering::SeqCst)
    }

    fn take_string_reload(&self) -> bool {
        self.string_reload.swap(false, Ordering::SeqCst)
    }
}

/// The background worker draining [`RequestFlags`] until the scene exits.
pub struct SettingsWorker {
    lifecycle: Arc<SceneLifecycle>,
    flags: Arc<RequestFlags>,
    store: SettingsStore,
    strings: StringTable,
    display: Arc<dyn DisplayControl>,
    log: DiagnosticLog,
}

impl SettingsWorker {
    pub fn new(
        lifecycle: Arc<SceneLifecycle>,
        flags: Arc<RequestFlags>,
        store: SettingsStore,
        strings: StringTable,
        display: Arc<dyn DisplayControl>,
        log: DiagnosticLog,
    ) -> Self {
        Self {
            lifecycle,
            flags,
            store,
            strings,
            display,
            log,
        }
    }

    /// Start the worker thread. The completion channel backs the bounded
    /// join in [`WorkerHandle::join_timeout`].
    pub fn spawn(self) -> std::io::Result<WorkerHandle> {
        let (done_tx, done_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("settings-worker".to_string())
            .spawn(move || {
                self.run();
                let _ = done_tx.send(());
            })?;
        Ok(WorkerHandle {
            thread: Some(thread),
            done_rx,
        })
    }

    /// Drain loop: at most one side effect per iteration, in fixed priority
    /// order save → brightness → string reload, so repeated brightness
    /// updates can never starve a save request. Failures are logged and the
    /// flag stays cleared; a stuck flag can never block the loop.
    fn run(self) {
        debug!(target: "settings/worker", "started");
        while !self.lifecycle.is_stopping() {
            if self.flags.take_save() {
                match self.store.save() {
                    Ok(()) => self.log.push("settings: saved"),
                    Err(err) => {
                        warn!(target: "settings/worker", %err, "save failed");
                        self.log.push(format!("settings: save failed: {err}"));
                    }
                }
            } else if self.flags.take_brightness() {
                let level = self.store.get().lcd_brightness;
                match self.display.set_brightness(true, true, level) {
                    Ok(()) => self.log.push(format!("settings: brightness {level}")),
                    Err(err) => {
                        warn!(target: "settings/worker", %err, "brightness change failed");
                        self.log.push(format!("settings: brightness failed: {err}"));
                    }
                }
            } else if self.flags.take_string_reload() {
                let language = self.store.get().ui_language;
                match self.strings.reload(language) {
                    Ok(()) => self
                        .log
                        .push(format!("settings: strings reloaded ({})", language.code())),
                    Err(err) => {
                        warn!(target: "settings/worker", %err, "string reload failed");
                        self.log.push(format!("settings: string reload failed: {err}"));
                    }
                }
            } else {
                thread::sleep(WORKER_IDLE_POLL);
            }
        }
        debug!(target: "settings/worker", "exit");
    }
}

/// Handle to a running worker; joining is bounded so a stuck worker cannot
/// hang scene shutdown.
pub struct WorkerHandle {
    thread: Option<JoinHandle<()>>,
    done_rx: mpsc::Receiver<()>,
}

impl WorkerHandle {
    /// Wait up to `timeout` for the worker to finish its loop, then join.
    /// Returns `false` on timeout; the thread is left detached in that case
    /// and the caller logs the anomaly.
    pub fn join_timeout(mut self, timeout: Duration) -> bool {
        match self.done_rx.recv_timeout(timeout) {
            // Disconnected means the thread ended without sending (panic);
            // the join below still reclaims it.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(thread) = self.thread.take() {
                    let _ = thread.join();
                }
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}
