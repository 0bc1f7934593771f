//! Partnership credit ledger.
//!
//! Maps a Discord user ID to the number of partnership announcements that user
//! may still make. A user with no entry has zero credits. Counts are unsigned,
//! so no entry can ever go negative. The ledger lives only as long as the
//! process; nothing is persisted.

use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Result of trying to spend one credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// One credit was spent; `remaining` is what is left afterwards.
    Allowed {
        /// Credits left after the decrement
        remaining: u64,
    },
    /// The user had no credits. Nothing changed.
    Denied,
}

/// Previous and new value of an overwritten entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditChange {
    /// Count before the overwrite (0 if the user had no entry)
    pub previous: u64,
    /// Count after the overwrite
    pub current: u64,
}

/// In-memory credit ledger, owned by the bot data and injected wherever needed.
#[derive(Debug, Default)]
pub struct CreditLedger {
    credits: Mutex<HashMap<u64, u64>>,
}

impl CreditLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored count for `user_id`, or 0 when there is no entry.
    pub async fn credits(&self, user_id: u64) -> u64 {
        self.credits
            .lock()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }

    /// Overwrites the count for `user_id` (it does not add to it).
    pub async fn set(&self, user_id: u64, count: u64) -> CreditChange {
        let previous = self
            .credits
            .lock()
            .await
            .insert(user_id, count)
            .unwrap_or(0);
        debug!(user_id, previous, count, "Partner credits overwritten");
        CreditChange {
            previous,
            current: count,
        }
    }

    /// Spends exactly one credit for `user_id` if it has any.
    ///
    /// The read and the decrement happen under one lock acquisition with no
    /// await point in between, so concurrent invocations for the same user
    /// can never spend the same credit twice.
    pub async fn try_consume(&self, user_id: u64) -> ConsumeOutcome {
        let mut credits = self.credits.lock().await;
        match credits.get_mut(&user_id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                debug!(user_id, remaining = *count, "Partner credit consumed");
                ConsumeOutcome::Allowed { remaining: *count }
            }
            _ => ConsumeOutcome::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unknown_user_is_denied_and_stays_absent() {
        let ledger = CreditLedger::new();

        assert_eq!(ledger.try_consume(7).await, ConsumeOutcome::Denied);
        assert_eq!(ledger.credits(7).await, 0);
        assert!(ledger.credits.lock().await.get(&7).is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_instead_of_accumulating() {
        let ledger = CreditLedger::new();

        assert_eq!(
            ledger.set(1, 5).await,
            CreditChange {
                previous: 0,
                current: 5
            }
        );
        assert_eq!(
            ledger.set(1, 2).await,
            CreditChange {
                previous: 5,
                current: 2
            }
        );
        assert_eq!(
            ledger.set(1, 9).await,
            CreditChange {
                previous: 2,
                current: 9
            }
        );
        assert_eq!(ledger.credits(1).await, 9);
    }

    #[tokio::test]
    async fn test_consume_counts_down_then_denies() {
        let ledger = CreditLedger::new();
        ledger.set(3, 3).await;

        assert_eq!(
            ledger.try_consume(3).await,
            ConsumeOutcome::Allowed { remaining: 2 }
        );
        assert_eq!(
            ledger.try_consume(3).await,
            ConsumeOutcome::Allowed { remaining: 1 }
        );
        assert_eq!(
            ledger.try_consume(3).await,
            ConsumeOutcome::Allowed { remaining: 0 }
        );
        assert_eq!(ledger.try_consume(3).await, ConsumeOutcome::Denied);
        assert_eq!(ledger.credits(3).await, 0);
    }

    #[tokio::test]
    async fn test_set_to_zero_blocks_consumption() {
        let ledger = CreditLedger::new();
        ledger.set(4, 1).await;
        ledger.set(4, 0).await;

        assert_eq!(ledger.try_consume(4).await, ConsumeOutcome::Denied);
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let ledger = CreditLedger::new();
        ledger.set(1, 1).await;

        assert_eq!(ledger.try_consume(2).await, ConsumeOutcome::Denied);
        assert_eq!(ledger.credits(1).await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_consumers_never_overspend() {
        let ledger = Arc::new(CreditLedger::new());
        ledger.set(42, 10).await;

        let mut handles = Vec::new();
        for _ in 0..25 {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move { ledger.try_consume(42).await }));
        }

        let mut allowed = 0;
        for handle in handles {
            if let ConsumeOutcome::Allowed { .. } = handle.await.unwrap() {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 10);
        assert_eq!(ledger.credits(42).await, 0);
    }
}
