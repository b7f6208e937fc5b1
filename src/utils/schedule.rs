/// A scheduled task that can be called off before it fires.
pub trait CancelHandle {
    fn cancel(self);
}

impl CancelHandle for gloo_timers::callback::Timeout {
    fn cancel(self) {
        gloo_timers::callback::Timeout::cancel(self);
    }
}

/// Single-slot holder for the session auto-expiry task. Arming a new handle
/// always cancels the one already in the slot, so a re-login can never leave
/// a stale timer behind that would expire the newer session.
pub struct ExpirySchedule<H: CancelHandle> {
    pending: Option<H>,
}

impl<H: CancelHandle> ExpirySchedule<H> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn arm(&mut self, handle: H) {
        if let Some(prior) = self.pending.take() {
            prior.cancel();
        }
        self.pending = Some(handle);
    }

    pub fn disarm(&mut self) {
        if let Some(prior) = self.pending.take() {
            prior.cancel();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl<H: CancelHandle> Default for ExpirySchedule<H> {
    fn default() -> Self {
        Self::new()
    }
}
