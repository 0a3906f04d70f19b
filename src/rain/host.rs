use super::options::Viewport;

/// Token for one requested repaint callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Token for a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// The host's repaint and windowing primitives.
///
/// A host delivers each requested frame at most once, from its event loop, by
/// calling back into the layer with the handle it returned here.
pub trait FrameHost {
    /// Schedule one repaint callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Revoke a callback that has not been delivered yet.
    fn cancel_frame(&mut self, handle: FrameHandle);

    fn add_resize_listener(&mut self) -> ListenerHandle;

    fn remove_resize_listener(&mut self, handle: ListenerHandle);

    /// Current viewport size and pixel ratio.
    fn viewport(&self) -> Viewport;
}
