//! Bit-level stream format layer.
//!
//! # Module Organization
//!
//! - [`window`]: Decodes the window-size field that opens every stream
//! - [`extract`]: Cuts the bits up to the end of the final meta-block
//! - [`padding`]: Aligns a cut meta-block to a byte boundary
//! - [`wrapper`]: Fixed header and terminator around bare blocks
//!
//! # Architecture
//!
//! ```text
//! Source stream:
//! ┌────────┬──────────────────────────┬──────────┐
//! │ WBITS  │ meta-block(s)            │ tail     │
//! └────────┴──────────────────────────┴──────────┘
//!  window::  └── extract::extract() ──┘
//!
//! Bare block:         ┌──────────────────────────┬────────┐
//!                     │ meta-block(s)            │ marker │ ← padding::pad()
//!                     └──────────────────────────┴────────┘
//!
//! Wrapped stream:
//! ┌──────────┬───────────┬───────────┬─────┬────────────┐
//! │ 6b 00    │ bare 1    │ bare 2    │ ... │ 03         │ ← wrapper::wrap_all()
//! └──────────┴───────────┴───────────┴─────┴────────────┘
//! ```

pub mod extract;
pub mod padding;
pub mod window;
pub mod wrapper;
