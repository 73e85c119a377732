//! Action flow support.
//!
//! ## Key Types
//!
//! - `FlowContext`: per-action parameters, dead-entity hints and result
//! - `ActionParameterGetter`: decisions requested from the acting player
//! - `ChoiceParameterGetter`: adapts a single numbered-choice callback

mod context;
mod parameters;

pub use context::{FlowContext, FlowResult};
pub use parameters::{
    ActionChoices, ActionParameterGetter, ActionType, ChoiceParameterGetter, MainOp, NumberedChoice,
};
