//! Stack growth for the recursive parts of the front end.
//!
//! The expression parser, the binding pass and the type checker all
//! recurse once per nesting level of the source. Wrapping those recursive
//! entry points in [`ensure_sufficient_stack`] lets a pathological input
//! such as ten thousand nested parentheses finish instead of aborting.
//!
//! On wasm the closure is called directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
