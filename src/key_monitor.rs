use anyhow::anyhow;
use rdev::{listen, EventType, Key};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// How long the listener thread gets to report an installation failure
/// before it is considered running.
const STARTUP_GRACE: Duration = Duration::from_millis(250);

/// Keyboard activity shared between the listener thread and the tick.
///
/// Only plain atomic scalar writes happen here. Timestamps are milliseconds
/// since the activity was created.
#[derive(Debug)]
pub struct KeyActivity {
    epoch: Instant,
    words: AtomicU64,
    last_key_ms: AtomicU64,
}

impl Default for KeyActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyActivity {
    /// The last key time starts at the epoch, as if a key had just been
    /// pressed.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            words: AtomicU64::new(0),
            last_key_ms: AtomicU64::new(0),
        }
    }

    /// Time since the epoch.
    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    /// Record a key-down at the current time.
    pub fn record_key(&self, is_space: bool) {
        self.record_key_at(is_space, self.now());
    }

    pub fn record_key_at(&self, is_space: bool, at: Duration) {
        if is_space {
            self.words.fetch_add(1, Ordering::Relaxed);
        }
        self.last_key_ms
            .store(at.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn words(&self) -> u64 {
        self.words.load(Ordering::Relaxed)
    }

    pub fn reset_words(&self) {
        self.words.store(0, Ordering::Relaxed);
    }

    pub fn last_key(&self) -> Duration {
        Duration::from_millis(self.last_key_ms.load(Ordering::Relaxed))
    }
}

/// Feed one raw input event into `activity`. Only key presses count; every
/// press (auto-repeat included) refreshes the last key time and each space
/// adds a word.
pub fn handle_event(activity: &KeyActivity, event: &EventType) {
    if let EventType::KeyPress(key) = event {
        activity.record_key(*key == Key::Space);
    }
}

/// Handle to the global keyboard listener thread.
#[derive(Clone)]
pub struct KeyMonitor {
    failure: Arc<Mutex<Option<String>>>,
}

impl KeyMonitor {
    /// Install the system-wide listener. Fails when the OS refuses the hook
    /// within the startup grace period.
    pub fn start(activity: Arc<KeyActivity>) -> anyhow::Result<Self> {
        let failure = Arc::new(Mutex::new(None));
        let failure_slot = failure.clone();
        let (tx, rx) = mpsc::channel::<String>();

        tracing::debug!("starting keyboard listener");
        thread::Builder::new()
            .name("key-monitor".into())
            .spawn(move || {
                let result = listen(move |event| handle_event(&activity, &event.event_type));
                let message = match result {
                    Ok(()) => "keyboard listener exited unexpectedly".to_string(),
                    Err(e) => format!("failed to listen for keyboard events: {e:?}"),
                };
                tracing::error!("{message}");
                if let Ok(mut slot) = failure_slot.lock() {
                    *slot = Some(message.clone());
                }
                let _ = tx.send(message);
            })?;

        match rx.recv_timeout(STARTUP_GRACE) {
            Ok(message) => Err(anyhow!(message)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(anyhow!("keyboard listener thread stopped during startup"))
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::info!("keyboard listener installed");
                Ok(Self { failure })
            }
        }
    }

    /// Error reported by the listener thread after startup, if it died.
    pub fn failure(&self) -> Option<String> {
        self.failure.lock().ok().and_then(|slot| slot.clone())
    }
}
