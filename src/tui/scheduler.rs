//! Repaint scheduling for the terminal host.
//!
//! The event loop's display tick plays the role of the repaint callback: on
//! every tick it takes the pending frame (if any) and hands it to whoever
//! requested it. Only one frame can be outstanding at a time.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::rain::{FrameHandle, FrameHost, ListenerHandle, Viewport};

#[derive(Debug)]
pub struct FrameScheduler {
    origin: Instant,
    next_id: u64,
    pending: Option<FrameHandle>,
    listeners: Vec<ListenerHandle>,
    viewport: Viewport,
}

impl FrameScheduler {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            origin: Instant::now(),
            next_id: 0,
            pending: None,
            listeners: Vec::new(),
            viewport,
        }
    }

    /// Host time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Hand out the pending frame for delivery. The frame is no longer
    /// pending afterwards; the receiver re-arms if it wants another.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_resize_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_id());
        if let Some(previous) = self.pending.replace(handle) {
            trace!(previous = previous.id(), "Superseding pending frame");
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerHandle {
        let handle = ListenerHandle::new(self.next_id());
        self.listeners.push(handle);
        handle
    }

    fn remove_resize_listener(&mut self, handle: ListenerHandle) {
        self.listeners.retain(|l| *l != handle);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pending_frame() {
        let mut scheduler = FrameScheduler::new(Viewport::new(80, 24));
        let first = scheduler.request_frame();
        let second = scheduler.request_frame();
        assert_ne!(first, second);
        assert_eq!(scheduler.take_frame(), Some(second));
        assert_eq!(scheduler.take_frame(), None);
    }

    #[test]
    fn test_cancel_only_matching_frame() {
        let mut scheduler = FrameScheduler::new(Viewport::new(80, 24));
        let stale = scheduler.request_frame();
        let live = scheduler.request_frame();
        scheduler.cancel_frame(stale);
        assert!(scheduler.has_pending_frame());
        scheduler.cancel_frame(live);
        assert!(!scheduler.has_pending_frame());
    }

    #[test]
    fn test_listeners_add_remove() {
        let mut scheduler = FrameScheduler::new(Viewport::new(80, 24));
        let a = scheduler.add_resize_listener();
        let b = scheduler.add_resize_listener();
        assert_eq!(scheduler.listener_count(), 2);
        scheduler.remove_resize_listener(a);
        scheduler.remove_resize_listener(a);
        assert_eq!(scheduler.listener_count(), 1);
        scheduler.remove_resize_listener(b);
        assert!(!scheduler.has_resize_listeners());
    }

    #[test]
    fn test_viewport_updates() {
        let mut scheduler = FrameScheduler::new(Viewport::new(80, 24));
        scheduler.set_viewport(Viewport::new(120, 40));
        assert_eq!(scheduler.viewport(), Viewport::new(120, 40));
    }
}
