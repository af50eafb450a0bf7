#![deny(unsafe_code)]

//! Validation of D-Bus wire data, for use by D-Bus protocol implementations.
//!
//! Everything here operates on borrowed byte slices, allocates nothing, and
//! reports the first violation found as a [`Validity`] code. Message
//! assembly, transport and value decoding live above this layer.

pub mod reader;

pub mod types;

pub mod validate;

mod validity;

pub use validate::{validate_body_with_reason, validate_signature, validate_signature_with_reason};
pub use validity::{ValidationError, Validity};

pub mod strings {
    //! Re-export of the dbus-wire-strings crate
    pub use dbus_wire_strings::*;
}
