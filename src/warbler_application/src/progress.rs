use std::sync::Mutex;

use warbler_core::{TransferProgress, UploadProgress};

type Emit = Box<dyn Fn(UploadProgress) + Send + Sync>;

#[derive(Default)]
struct GateState {
    last: Option<UploadProgress>,
    closed: bool,
}

/// Turns raw transfer reports into the caller-visible progress sequence.
///
/// Only values strictly above the last one emitted get through, so the
/// sequence is non-decreasing and repeated reports are coalesced. Once closed,
/// late reports from the store are ignored.
pub struct ProgressGate {
    state: Mutex<GateState>,
    emit: Emit,
}

impl ProgressGate {
    pub fn new(emit: impl Fn(UploadProgress) + Send + Sync + 'static) -> Self {
        Self {
            state: Mutex::new(GateState::default()),
            emit: Box::new(emit),
        }
    }

    pub fn report(&self, transfer: TransferProgress) {
        let progress = UploadProgress::from(transfer);
        let mut state = self.lock();
        if state.closed || matches!(state.last, Some(previous) if progress <= previous) {
            return;
        }
        state.last = Some(progress);
        // Emitted under the lock: reports arriving from several I/O contexts
        // must not overtake each other between the check and the send.
        (self.emit)(progress);
    }

    pub fn close(&self) {
        self.lock().closed = true;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GateState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
