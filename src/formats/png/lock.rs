use std::sync::{Mutex, MutexGuard, PoisonError};

static CODEC_LOCK: Mutex<()> = Mutex::new(());

/// Process-wide lock around PNG decoding and encoding.
///
/// At most one thread may be inside a codec pass at a time. A guard is acquired at the start of
/// every `read` and `write` (and by [`decode_png`](super::decode_png) /
/// [`encode_png`](super::encode_png)) and released when the pass returns, on success or error.
/// A `write` holds it across the final overwrite of the file, so two codecs bound to the same path
/// can never interleave their decode and overwrite steps. Passes never call each other, the lock
/// is not reentrant.
pub(crate) struct CodecLock {
    _guard: MutexGuard<'static, ()>,
}

impl CodecLock {
    pub(crate) fn acquire() -> CodecLock {
        // The lock protects no data, a panic in another pass leaves nothing inconsistent behind
        let guard = CODEC_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        CodecLock { _guard: guard }
    }
}
