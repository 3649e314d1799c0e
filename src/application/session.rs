use crate::domain::ports::PointerCaptureRef;

/// Pointer capture held for the lifetime of one drag.
///
/// Attaches on creation and detaches on drop, so every way out of a drag
/// (release, a button decision mid-drag, engine teardown) gives the listeners back.
pub struct GestureSession {
    capture: PointerCaptureRef,
}

impl GestureSession {
    pub fn acquire(capture: PointerCaptureRef) -> Self {
        capture.attach();
        Self { capture }
    }
}

impl Drop for GestureSession {
    fn drop(&mut self) {
        self.capture.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::CountingPointerCapture;
    use std::sync::Arc;

    #[test]
    fn test_session_releases_on_drop() {
        let capture = Arc::new(CountingPointerCapture::new());

        let session = GestureSession::acquire(capture.clone());
        assert_eq!(capture.active(), 1);

        drop(session);
        assert_eq!(capture.active(), 0);
        assert_eq!(capture.total_attached(), 1);
    }
}
