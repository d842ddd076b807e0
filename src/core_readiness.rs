use std::sync::Mutex;

pub(crate) type ReadyCallback<C> = Box<dyn FnOnce(&C) + Send>;

struct ReadyInner<C> {
    fired: bool,
    queue: Vec<ReadyCallback<C>>,
}

/// One-shot readiness signal with a single FIFO dispatch queue.
/// Subscribers run in subscription order once the signal fires; a
/// subscription made after the fire joins the same queue, so it can never
/// overtake a callback that is queued but not yet drained. `reset` re-arms
/// the signal for the next engine generation.
pub(crate) struct ReadySignal<C> {
    inner: Mutex<ReadyInner<C>>,
}

impl<C> Default for ReadySignal<C> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(ReadyInner {
                fired: false,
                queue: Vec::new(),
            }),
        }
    }
}

impl<C> ReadySignal<C> {
    /// Queues `callback`. Returns true when the signal has already fired,
    /// in which case the caller must schedule a drain.
    pub(crate) fn subscribe<F>(&self, callback: F) -> bool
    where
        F: FnOnce(&C) + Send + 'static,
    {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        inner.queue.push(Box::new(callback));
        inner.fired
    }

    /// Marks the signal fired. True on the first fire only; that caller
    /// schedules the drain.
    pub(crate) fn fire(&self) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        if inner.fired {
            return false;
        }
        inner.fired = true;
        true
    }

    /// Takes the queued callbacks in subscription order. Empty until the
    /// signal fires; competing drains split the queue without reordering.
    pub(crate) fn drain(&self) -> Vec<ReadyCallback<C>> {
        let Ok(mut inner) = self.inner.lock() else {
            return Vec::new();
        };
        if !inner.fired {
            return Vec::new();
        }
        std::mem::take(&mut inner.queue)
    }

    pub(crate) fn has_fired(&self) -> bool {
        self.inner.lock().map(|inner| inner.fired).unwrap_or(false)
    }

    pub(crate) fn reset(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fired = false;
            inner.queue.clear();
        }
    }
}
