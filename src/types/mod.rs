//! Result types returned to callers

pub mod digest;

pub use digest::Digest;
