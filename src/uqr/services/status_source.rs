use crate::ids::TransactionId;
use crate::models::TransactionStatus;
use crate::Result;

use std::collections::VecDeque;

use async_trait::async_trait;

use parking_lot::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Where the current payment status of a transaction comes from.
///
/// A real deployment would ask the payment gateway here.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn check(&self, tid: &TransactionId) -> Result<TransactionStatus>;
}

/// Mock gateway: every check draws Pending, Success or Failed with equal probability
#[derive(Debug)]
pub struct RandomStatusSource {
    rng: Mutex<StdRng>,
}

impl RandomStatusSource {
    pub fn new() -> Self {
        return Self {
            rng: Mutex::new(StdRng::from_entropy()),
        };
    }

    /// Reproducible sequence of outcomes
    pub fn seeded(seed: u64) -> Self {
        return Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        };
    }
}

impl Default for RandomStatusSource {
    fn default() -> Self {
        return Self::new();
    }
}

#[async_trait]
impl StatusSource for RandomStatusSource {
    async fn check(&self, tid: &TransactionId) -> Result<TransactionStatus> {
        let idx = self.rng.lock().gen_range(0..TransactionStatus::ALL.len());
        let status = TransactionStatus::ALL[idx];

        log::debug!("Mock status check for {tid}: {status}");

        return Ok(status);
    }
}

/// Replays a fixed list of outcomes, then keeps answering Pending
#[derive(Debug, Default)]
pub struct ScriptedStatusSource {
    script: Mutex<VecDeque<TransactionStatus>>,
    checks: Mutex<usize>,
}

impl ScriptedStatusSource {
    pub fn new(script: impl IntoIterator<Item = TransactionStatus>) -> Self {
        return Self {
            script: Mutex::new(script.into_iter().collect()),
            checks: Mutex::new(0),
        };
    }

    /// Number of checks answered so far
    pub fn checks(&self) -> usize {
        return *self.checks.lock();
    }
}

#[async_trait]
impl StatusSource for ScriptedStatusSource {
    async fn check(&self, _tid: &TransactionId) -> Result<TransactionStatus> {
        *self.checks.lock() += 1;

        let status = self
            .script
            .lock()
            .pop_front()
            .unwrap_or(TransactionStatus::Pending);

        return Ok(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    #[tokio::test]
    async fn random_outcomes_are_uniform() {
        const DRAWS: usize = 6000;

        let source = RandomStatusSource::seeded(7);
        let tid = TransactionId::generate();

        let mut counts: HashMap<TransactionStatus, usize> = HashMap::new();
        for _ in 0..DRAWS {
            *counts.entry(source.check(&tid).await.unwrap()).or_default() += 1;
        }

        for status in TransactionStatus::ALL {
            let share = counts[&status] as f64 / DRAWS as f64;
            assert!((0.28..0.39).contains(&share), "{status}: {share}");
        }
    }

    #[tokio::test]
    async fn seeded_is_reproducible() {
        let tid = TransactionId::generate();
        let a = RandomStatusSource::seeded(42);
        let b = RandomStatusSource::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.check(&tid).await.unwrap(), b.check(&tid).await.unwrap());
        }
    }

    #[tokio::test]
    async fn scripted_replays_then_pends() {
        let tid = TransactionId::generate();
        let source =
            ScriptedStatusSource::new([TransactionStatus::Pending, TransactionStatus::Failed]);

        assert_eq!(source.check(&tid).await.unwrap(), TransactionStatus::Pending);
        assert_eq!(source.check(&tid).await.unwrap(), TransactionStatus::Failed);
        assert_eq!(source.check(&tid).await.unwrap(), TransactionStatus::Pending);
        assert_eq!(source.checks(), 3);
    }
}
