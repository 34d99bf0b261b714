//! Latest-wins sequencing for overlapping fetches

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use log::warn;
use tokio_util::sync::CancellationToken;

use crate::error::Error;

/// Issues tickets for overlapping fetches so only the most recent one may
/// land its result.
///
/// Rapid re-filtering can put several requests in flight at once; without
/// discipline the last response to *resolve* wins, which is not necessarily
/// the last request *issued*. Each `begin` call supersedes all earlier
/// tickets: their cancellation tokens fire, and any result they still
/// produce is rejected at [`FetchTicket::accept`].
///
/// # Example
///
/// ```
/// use ironmonger_lib::api::FetchSequencer;
///
/// let sequencer = FetchSequencer::new();
/// let stale = sequencer.begin();
/// let fresh = sequencer.begin();
///
/// assert!(!stale.is_current());
/// assert!(stale.token().is_cancelled());
/// assert!(fresh.accept("rows").is_ok());
/// assert!(stale.accept("rows").is_err());
/// ```
#[derive(Debug, Default)]
pub struct FetchSequencer {
    issued: AtomicU64,
    latest: Arc<AtomicU64>,
    current_token: Mutex<CancellationToken>,
}

impl FetchSequencer {
    /// Creates a new sequencer with no outstanding tickets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new fetch, superseding all earlier ones.
    pub fn begin(&self) -> FetchTicket {
        let id = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.store(id, Ordering::SeqCst);

        let token = CancellationToken::new();
        let previous = {
            let mut guard = self
                .current_token
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(&mut *guard, token.clone())
        };
        previous.cancel();

        FetchTicket {
            id,
            latest: Arc::clone(&self.latest),
            token,
        }
    }
}

/// A ticket for one in-flight fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    id: u64,
    latest: Arc<AtomicU64>,
    token: CancellationToken,
}

impl FetchTicket {
    /// Returns this ticket's sequence number.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` if no newer fetch has been issued since this one.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }

    /// Returns the cancellation token fired when this ticket is superseded.
    ///
    /// Select against it to abandon the request early instead of letting a
    /// doomed response finish downloading.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Accepts a resolved result, or rejects it as stale.
    ///
    /// A stale result must not touch caller state; the error carries both
    /// sequence numbers for diagnostics.
    pub fn accept<T>(&self, result: T) -> Result<T, Error> {
        let latest = self.latest.load(Ordering::SeqCst);
        if latest == self.id {
            Ok(result)
        } else {
            warn!(
                "discarding stale fetch result: request {} superseded by {}",
                self.id, latest
            );
            Err(Error::Stale {
                ticket: self.id,
                latest,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_ticket_is_current() {
        let sequencer = FetchSequencer::new();
        let ticket = sequencer.begin();
        assert!(ticket.is_current());
        assert!(!ticket.token().is_cancelled());
        assert_eq!(ticket.accept(42).unwrap(), 42);
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let sequencer = FetchSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(first.token().is_cancelled());
        assert!(!second.token().is_cancelled());

        // The older response resolves late and is rejected.
        assert!(matches!(
            first.accept("old rows"),
            Err(Error::Stale { ticket: 1, latest: 2 })
        ));
        assert_eq!(second.accept("new rows").unwrap(), "new rows");
    }

    #[tokio::test]
    async fn test_cancellation_fires_for_superseded_ticket() {
        let sequencer = FetchSequencer::new();
        let first = sequencer.begin();
        let cancelled = first.token().clone();

        let _second = sequencer.begin();
        // Resolves immediately because begin() cancelled the old token.
        cancelled.cancelled().await;
    }
}
