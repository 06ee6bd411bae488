use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{
  debug,
  info,
  warn
};

use crate::config::ProbeConfig;

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ProbeError {
  #[error(
    "host bridge did not appear after \
     {attempts} checks ({waited_ms} ms)"
  )]
  TimedOut { attempts: u32, waited_ms: u64 }
}

/// Waits until `probe` reports the host
/// bridge, sleeping a fixed interval
/// between checks. Returns the number of
/// checks made.
pub async fn await_bridge<P, S, F>(
  mut probe: P,
  mut sleep: S,
  config: &ProbeConfig
) -> Result<u32, ProbeError>
where
  P: FnMut() -> bool,
  S: FnMut(Duration) -> F,
  F: Future<Output = ()>
{
  let interval = Duration::from_millis(
    config.interval_ms
  );
  let mut attempts = 0_u32;
  let mut waited_ms = 0_u64;

  loop {
    attempts = attempts.saturating_add(1);
    if probe() {
      info!(
        attempts,
        waited_ms, "host bridge ready"
      );
      return Ok(attempts);
    }

    if config.timeout_ms > 0
      && waited_ms >= config.timeout_ms
    {
      warn!(
        attempts,
        waited_ms,
        "gave up waiting for host bridge"
      );
      return Err(ProbeError::TimedOut {
        attempts,
        waited_ms
      });
    }

    debug!(
      attempts,
      "host bridge not available yet"
    );
    sleep(interval).await;
    waited_ms = waited_ms
      .saturating_add(config.interval_ms);
  }
}
