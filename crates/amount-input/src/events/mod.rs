//! Control events module.
//!
//! Provides the observational events of the amount input and the sink trait
//! the host implements to receive them. Events never feed back into the
//! amount or rate computation.

mod input_event;
mod sink;

pub use input_event::*;
pub use sink::*;
