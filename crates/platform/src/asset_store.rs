//! Voice fragment store abstraction
//!
//! Read-only access to the pre-recorded word fragments. Each fragment is raw
//! unsigned 8-bit PCM at 8 kHz, linked into flash and read in place.
//!
//! # Flash Layout
//!
//! ```text
//! .rodata  ┌──────────────────────┐
//!          │  Word index table    │   token → (offset, length)
//!          ├──────────────────────┤
//!          │  Fragment data       │   ~3–6 KB per word
//!          └──────────────────────┘
//! ```
//!
//! Fragments are produced offline; encoding is not this crate's concern.

/// Read-only store of voice fragments keyed by their token text.
///
/// On hardware, lookups return slices of the memory-mapped flash (zero-copy).
/// In tests, a mock implementation returns pre-loaded bytes.
pub trait WaveformStore {
    /// Return the fragment for `token`, or `None` if the word is not recorded.
    ///
    /// Callers treat `None` like an empty fragment: the word is skipped and
    /// the rest of the phrase still plays.
    fn lookup(&self, token: &str) -> Option<&[u8]>;

    /// Return `true` if `token` has a recorded fragment.
    fn contains(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }
}

impl<T: WaveformStore + ?Sized> WaveformStore for &T {
    fn lookup(&self, token: &str) -> Option<&[u8]> {
        (**self).lookup(token)
    }
}
