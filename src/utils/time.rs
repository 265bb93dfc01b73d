use rand::Rng;
use std::time::Duration;

/// Courtesy delay of `base_ms` plus up to `jitter_ms` extra.
pub async fn sleep_with_jitter(base_ms: u64, jitter_ms: u64) {
    let jitter = rand::rng().random_range(0..=jitter_ms);
    let delay = Duration::from_millis(base_ms + jitter);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
