//! A simple RAII-based timer for measuring runtimes

use instant::Instant;

pub struct Timer {
    start_t: Instant,
    is_running: bool,
    msg: &'static str,
}

impl Timer {
    pub fn new(msg: &'static str) -> Self {
        Self {
            start_t: Instant::now(),
            is_running: true,
            msg,
        }
    }

    /// Elapsed nanoseconds since the timer was started or last restarted.
    pub fn elapsed(&self) -> u128 {
        self.start_t.elapsed().as_nanos()
    }

    pub fn stop(&mut self) -> u128 {
        if !self.is_running {
            return 0;
        }
        let elapsed = self.elapsed();
        info!("{} finished in {}", self.msg, time_from(elapsed));
        self.is_running = false;
        elapsed
    }

    pub fn stop_silent(&mut self) -> u128 {
        let elapsed = self.elapsed();
        self.is_running = false;
        elapsed
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.is_running {
            self.stop();
        }
    }
}

/// Format nanoseconds as `secs:millis:micros:nanos`.
pub fn time_from(mut t: u128) -> String {
    let nanos = t % 1000;
    t /= 1000;
    let micros = t % 1000;
    t /= 1000;
    let millis = t % 1000;
    t /= 1000;
    let secs = t;
    format!("{}:{}:{}:{}", secs, millis, micros, nanos)
}
