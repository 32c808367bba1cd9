use async_trait::async_trait;
use rand::Rng;
use tokio::time::{sleep, Duration};

/// Hook awaited before every outgoing request.
#[async_trait]
pub trait Evasion: Send + Sync {
    async fn evade(&self);
}

/// Sleeps a random whole number of seconds in `[min_secs, max_secs]`, to look less
/// like a script hammering the API.
#[derive(Debug, Clone)]
pub struct RandomDelay {
    min_secs: u64,
    max_secs: u64,
}

impl RandomDelay {
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
        }
    }

    pub fn pick(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::new(2, 5)
    }
}

#[async_trait]
impl Evasion for RandomDelay {
    async fn evade(&self) {
        let delay = self.pick();
        tracing::debug!("Evasion delay {:?}", delay);
        sleep(delay).await;
    }
}

/// Does not wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Evasion for NoDelay {
    async fn evade(&self) {}
}
