//! Arguments passed to aura capability callbacks.

use crate::cards::EnchantmentId;
use crate::core::{CardRef, State};
use crate::flow::FlowContext;

/// Input of the validity check.
pub struct AuraIsValid<'a, 'f> {
    pub state: &'a State,
    pub flow: &'a mut FlowContext<'f>,
    /// Card projecting the aura.
    pub source: CardRef,
}

/// Input of target enumeration. The callback pushes every eligible
/// reference into `targets`, usually through `Targets::fill`.
pub struct AuraGetTargets<'a, 'f> {
    pub state: &'a State,
    pub flow: &'a mut FlowContext<'f>,
    pub source: CardRef,
    pub targets: &'a mut Vec<CardRef>,
}

/// Input of the apply-effect capability.
pub struct AuraApplyOn<'a, 'f> {
    pub state: &'a mut State,
    pub flow: &'a mut FlowContext<'f>,
    pub source: CardRef,
    pub target: CardRef,
}

/// Input of the remove-effect capability.
pub struct AuraRemoveFrom<'a, 'f> {
    pub state: &'a mut State,
    pub flow: &'a mut FlowContext<'f>,
    pub source: CardRef,
    pub target: CardRef,
    /// Identifier returned by the apply-effect call for this target.
    pub enchantment: EnchantmentId,
}
