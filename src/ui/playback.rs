//! Background frame-advance timer for crop window playback

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

/// Ticks once per frame interval on a helper thread until stopped.
///
/// The UI thread drains ticks with [`PlaybackTimer::pending_ticks`]; the
/// `wake` callback lets the event loop know a tick is waiting.
pub struct PlaybackTimer {
    running: Arc<AtomicBool>,
    ticks: Receiver<()>,
}

impl PlaybackTimer {
    pub fn start<F>(interval: Duration, wake: F) -> io::Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let (sender, ticks) = mpsc::channel();
        let flag = Arc::clone(&running);

        thread::Builder::new()
            .name("eightmb-playback".to_string())
            .spawn(move || {
                debug!("Playback timer started at {:?} per frame", interval);
                while flag.load(Ordering::Relaxed) {
                    thread::sleep(interval);
                    if !flag.load(Ordering::Relaxed) || sender.send(()).is_err() {
                        break;
                    }
                    wake();
                }
                debug!("Playback timer stopped");
            })?;

        Ok(Self { running, ticks })
    }

    /// Number of ticks delivered since the last call
    pub fn pending_ticks(&self) -> usize {
        self.ticks.try_iter().count()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

impl Drop for PlaybackTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
