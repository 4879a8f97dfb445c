//! Simulated playback clock.
//!
//! A spawned task advances a shared [`AudioGuidePlayer`] by one second per
//! period. The task ends when the player stops (reaching the duration or being
//! paused) or when its [`PlaybackHandle`] is stopped or dropped.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::audio::AudioGuidePlayer;

pub type SharedPlayer = Arc<Mutex<AudioGuidePlayer>>;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Shortest accepted tick period; a zero period would make the interval panic.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackClock;

impl PlaybackClock {
    /// Starts ticking `player` every `period`, raised to at least
    /// [`MIN_TICK_PERIOD`]. The first tick lands one full period after the
    /// call.
    pub fn start(player: SharedPlayer, period: Duration) -> PlaybackHandle {
        let period = period.max(MIN_TICK_PERIOD);
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => {
                        debug!("playback clock cancelled");
                        break;
                    }
                    _ = ticks.tick() => {
                        let (still_playing, current_time) = {
                            let mut guard = player.lock();
                            (guard.tick(), guard.current_time())
                        };
                        if !still_playing {
                            debug!(current_time, "playback clock finished");
                            break;
                        }
                    }
                }
            }
        });

        PlaybackHandle {
            token,
            task: Some(task),
        }
    }
}

/// Owner of a running clock. Dropping it cancels the clock.
#[derive(Debug)]
pub struct PlaybackHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PlaybackHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the clock task to exit without cancelling it.
    pub async fn finished(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::audio::DEFAULT_DURATION_SECS;

    fn playing() -> SharedPlayer {
        let mut player = AudioGuidePlayer::default();
        player.play();
        Arc::new(Mutex::new(player))
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_the_bound_then_stops() {
        let player = playing();
        let handle = PlaybackClock::start(player.clone(), TICK_PERIOD);
        handle.finished().await;

        let player = player.lock();
        assert!(!player.is_playing());
        assert_eq!(player.current_time(), DEFAULT_DURATION_SECS);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_current_time() {
        let player = playing();
        let handle = PlaybackClock::start(player.clone(), TICK_PERIOD);

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        handle.stop();
        let frozen = player.lock().current_time();
        assert_eq!(frozen, 10);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(player.lock().current_time(), frozen);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels() {
        let player = playing();
        let handle = PlaybackClock::start(player.clone(), TICK_PERIOD);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(player.lock().current_time(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pausing_ends_the_clock() {
        let player = playing();
        let handle = PlaybackClock::start(player.clone(), TICK_PERIOD);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        player.lock().pause();
        handle.finished().await;

        assert_eq!(player.lock().current_time(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_raised_to_the_minimum() {
        let player = playing();
        let handle = PlaybackClock::start(player.clone(), Duration::ZERO);

        tokio::time::sleep(Duration::from_micros(5_500)).await;
        assert_eq!(player.lock().current_time(), 5);

        handle.finished().await;
        assert_eq!(player.lock().current_time(), DEFAULT_DURATION_SECS);
    }
}
