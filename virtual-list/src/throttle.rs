/// A leading + trailing throttle driven by host timestamps.
///
/// The first value of a burst passes through immediately. Values arriving inside the window are
/// coalesced (the latest wins) and released by [`Throttle::poll`] once the window elapsed, or by
/// the next [`Throttle::call`] after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throttle<T> {
    wait_ms: u64,
    last_fire_ms: Option<u64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            last_fire_ms: None,
            pending: None,
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    pub fn set_wait_ms(&mut self, wait_ms: u64) {
        self.wait_ms = wait_ms;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn window_open(&self, now_ms: u64) -> bool {
        match self.last_fire_ms {
            Some(last) => now_ms.saturating_sub(last) < self.wait_ms,
            None => false,
        }
    }

    /// Offers a value; returns it back when it should be applied now.
    pub fn call(&mut self, value: T, now_ms: u64) -> Option<T> {
        if self.window_open(now_ms) {
            self.pending = Some(value);
            return None;
        }
        self.pending = None;
        self.last_fire_ms = Some(now_ms);
        Some(value)
    }

    /// Releases the coalesced trailing value once the window elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.is_none() || self.window_open(now_ms) {
            return None;
        }
        self.last_fire_ms = Some(now_ms);
        self.pending.take()
    }

    /// Drops any pending value and starts a fresh burst on the next call.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_fire_ms = None;
    }
}
