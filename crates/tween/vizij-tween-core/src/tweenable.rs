//! Capability contracts between the scheduler and tween implementations.
//!
//! The scheduler only ever sees tweens through [`TweenHandle`]. All methods take
//! `&self`: a tween may be re-entered (e.g. stopped from inside its own `advance`
//! through a chained callback), so implementations keep their mutable state behind
//! `Cell`/`RefCell`.

use std::rc::Rc;

use crate::ids::ObjectId;

/// Shared handle to a registered tween. Identity is the allocation, see [`same_tween`].
pub type TweenHandle = Rc<dyn Tweenable>;

/// Minimal contract every scheduled tween fulfils.
pub trait Tweenable {
    /// Advance by one frame. Called once per [`crate::TweenManager::tick`] while
    /// registered. Returns `true` when the tween has just completed and should
    /// leave the registry.
    fn advance(&self) -> bool;

    /// Release/reset hook. Called exactly once, right after removal from the registry.
    fn recycle(&self);

    /// Jump to the end value when `bring_to_completion`, otherwise abort in place.
    /// Does not by itself remove the tween from the registry.
    fn stop(&self, bring_to_completion: bool);

    /// Capability check for the [`TweenControl`] refinement. Tweens without it are
    /// invisible to context/target queries.
    fn as_control(&self) -> Option<&dyn TweenControl> {
        None
    }
}

/// Optional refinement exposing grouping metadata.
///
/// Implementing this trait is not enough on its own: the scheduler discovers it
/// only through [`Tweenable::as_control`], which must be overridden to return
/// `Some(self)`. With the default `None`, the tween never appears in
/// `tweens_with_context`/`tweens_with_target` and is never reached by the grouped
/// stop calls.
pub trait TweenControl: Tweenable {
    /// Logical owner that started the tween, if any. `None` never matches a query.
    fn context(&self) -> Option<ObjectId>;

    /// Object whose value the tween mutates, if any. `None` never matches a query.
    fn target_object(&self) -> Option<ObjectId>;
}

/// Identity comparison of two handles (same allocation; vtables are ignored).
#[inline]
pub fn same_tween(a: &TweenHandle, b: &TweenHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
