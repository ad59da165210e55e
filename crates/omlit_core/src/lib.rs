//! Typed literal codec for values exchanged with a compiler scripting session.

/// Shape resolution, literal decoding, value casting, and serialization.
pub mod codec;
