use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(250);

/// A pending quiet-window wait for one raw value.
#[derive(Debug, Clone)]
pub struct DebounceTicket {
    pub generation: u64,
    pub quiet: Duration,
    token: CancellationToken,
}

impl DebounceTicket {
    /// Resolves with the ticket's generation once the quiet window elapses,
    /// or `None` as soon as the ticket is superseded or its session closes.
    pub async fn elapsed(self) -> Option<u64> {
        tokio::select! {
            _ = self.token.cancelled() => None,
            _ = tokio::time::sleep(self.quiet) => {
                if self.token.is_cancelled() {
                    None
                } else {
                    Some(self.generation)
                }
            }
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Raw text buffer that only promotes a value to the stable query after a
/// quiet window with no newer input.
#[derive(Debug)]
pub struct DebouncedInput {
    raw: String,
    stable: String,
    generation: u64,
    pending: Option<CancellationToken>,
    quiet: Duration,
}

impl DebouncedInput {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            raw: String::new(),
            stable: String::new(),
            generation: 0,
            pending: None,
            quiet,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn stable(&self) -> &str {
        &self.stable
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new raw value, cancelling whatever wait was in flight.
    /// The returned ticket's token is a child of `parent`.
    pub fn push(&mut self, raw: String, parent: &CancellationToken) -> DebounceTicket {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        self.generation += 1;
        self.raw = raw;

        let token = parent.child_token();
        self.pending = Some(token.clone());
        DebounceTicket {
            generation: self.generation,
            quiet: self.quiet,
            token,
        }
    }

    /// Promotes the raw value if `generation` is the latest pending one.
    pub fn settle(&mut self, generation: u64) -> Option<&str> {
        if generation != self.generation {
            return None;
        }
        let token = self.pending.take()?;
        if token.is_cancelled() {
            return None;
        }
        self.stable = self.raw.clone();
        Some(&self.stable)
    }

    /// Drops the buffered value and any pending wait without emitting.
    /// Generations keep counting so late tickets never match again.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.raw.clear();
        self.stable.clear();
    }
}
