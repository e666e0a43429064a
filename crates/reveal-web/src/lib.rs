#![forbid(unsafe_code)]

//! Browser host for the reveal comparison widget.
//!
//! The platform-independent half lives in [`input_parser`] and [`host_core`]:
//! encoded pointer input, dispatch into a [`reveal_widget::Controller`], and a
//! host-driven clock. On `wasm32` the `wasm` module binds those to the DOM:
//! a shadow-root surface, passive event listeners, animation-frame and timer
//! drivers, and the `create` / `parse` markup exports.

pub mod host_core;
pub mod input_parser;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use host_core::{Dispatched, HostCore, dispatch_host_input};
pub use input_parser::{HostInput, InputParseError, parse_encoded_pointer};

#[cfg(target_arch = "wasm32")]
pub use wasm::{RevealElement, STYLE_SHEET, create, define, parse};
