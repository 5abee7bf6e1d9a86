//! Process surface for the `pr-herald` binary.
//!
//! Output formatting lives in [`output`] so it can be tested against an
//! in-memory writer.

pub mod output;
