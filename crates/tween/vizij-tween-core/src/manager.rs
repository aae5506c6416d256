//! TweenManager: active-tween registry and per-frame advancement.
//!
//! Methods:
//! - new, add, remove/remove_at (+ fallible try_ forms), clear
//! - tick (once per frame), stop_all
//! - tweens_with_context/target, stop_tweens_with_context/target
//!
//! Every public method may be called from inside a tween's `advance`, `stop` or
//! `recycle`. The registry is never borrowed while control is inside a tween.
//! While a traversal is on the stack, removals leave a tombstone in their slot so
//! indices stay stable; the outermost traversal compacts on exit.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::Config;
use crate::error::TweenError;
use crate::ids::ObjectId;
use crate::tweenable::{same_tween, TweenHandle, Tweenable};

#[derive(Default)]
struct Registry {
    cfg: Config,
    /// Registration order. `None` marks a tween removed mid-traversal.
    slots: Vec<Option<TweenHandle>>,
    live: usize,
    /// Number of traversals currently on the stack.
    traversals: usize,
}

impl Registry {
    fn position(&self, tween: &TweenHandle) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|t| same_tween(t, tween)))
    }

    /// Unlink the tween at `index` after checking it is the expected one.
    fn detach_at(&mut self, tween: &TweenHandle, index: usize) -> Result<TweenHandle, TweenError> {
        let len = self.slots.len();
        match self.slots.get(index) {
            Some(Some(t)) if same_tween(t, tween) => {}
            _ => return Err(TweenError::IndexMismatch { index, len }),
        }
        let removed = if self.traversals > 0 {
            self.slots[index].take()
        } else {
            self.slots.remove(index)
        };
        self.live -= 1;
        removed.ok_or(TweenError::IndexMismatch { index, len })
    }

    fn drain_live(&mut self) -> Vec<TweenHandle> {
        self.live = 0;
        if self.traversals > 0 {
            self.slots.iter_mut().filter_map(Option::take).collect()
        } else {
            std::mem::take(&mut self.slots).into_iter().flatten().collect()
        }
    }

    fn compact(&mut self) {
        if self.traversals == 0 && self.live != self.slots.len() {
            self.slots.retain(Option::is_some);
        }
    }

    fn snapshot(&self) -> Vec<TweenHandle> {
        self.slots.iter().flatten().cloned().collect()
    }
}

/// Marks a traversal over the slots present when it began. Compacts on drop once
/// no other traversal is running.
struct Traversal<'a> {
    registry: &'a RefCell<Registry>,
    start_len: usize,
}

impl<'a> Traversal<'a> {
    fn begin(registry: &'a RefCell<Registry>) -> Self {
        let mut reg = registry.borrow_mut();
        reg.traversals += 1;
        let start_len = reg.slots.len();
        Self {
            registry,
            start_len,
        }
    }

    /// Live tween at `index`, cloned out so no borrow outlives the call.
    fn slot(&self, index: usize) -> Option<TweenHandle> {
        self.registry.borrow().slots.get(index).cloned().flatten()
    }

    /// Highest index first. Slots appended after `begin` are not visited.
    fn indices(&self) -> impl Iterator<Item = usize> {
        (0..self.start_len).rev()
    }
}

impl Drop for Traversal<'_> {
    fn drop(&mut self) {
        let mut reg = self.registry.borrow_mut();
        reg.traversals -= 1;
        reg.compact();
    }
}

fn has_context(tween: &dyn Tweenable, context: Option<ObjectId>) -> bool {
    context.is_some() && tween.as_control().and_then(|c| c.context()) == context
}

fn has_target(tween: &dyn Tweenable, target: Option<ObjectId>) -> bool {
    target.is_some() && tween.as_control().and_then(|c| c.target_object()) == target
}

/// Scheduler owning the active tween registry.
///
/// Cloning yields another handle to the same registry; hand clones to any code
/// (including tweens themselves) that needs to add, stop or query tweens. Not
/// thread-safe: drive it from a single thread.
#[derive(Clone, Default)]
pub struct TweenManager {
    inner: Rc<RefCell<Registry>>,
}

impl fmt::Debug for TweenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.inner.borrow();
        f.debug_struct("TweenManager")
            .field("cfg", &reg.cfg)
            .field("live", &reg.live)
            .field("slots", &reg.slots.len())
            .field("traversals", &reg.traversals)
            .finish()
    }
}

impl TweenManager {
    /// Create a new manager with an empty registry.
    pub fn new(cfg: Config) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                cfg,
                ..Registry::default()
            })),
        }
    }

    pub fn config(&self) -> Config {
        self.inner.borrow().cfg
    }

    pub fn set_config(&self, cfg: Config) {
        self.inner.borrow_mut().cfg = cfg;
    }

    /// Number of registered tweens.
    pub fn len(&self) -> usize {
        self.inner.borrow().live
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while a traversal is on the stack: `tick`, `stop_all` or one of the
    /// `stop_tweens_with_*` calls.
    pub fn is_traversing(&self) -> bool {
        self.inner.borrow().traversals > 0
    }

    pub fn contains(&self, tween: &TweenHandle) -> bool {
        self.position(tween).is_some()
    }

    /// Slot index of `tween`, usable with [`TweenManager::remove_at`] until the
    /// registry is next mutated.
    pub fn position(&self, tween: &TweenHandle) -> Option<usize> {
        self.inner.borrow().position(tween)
    }

    /// Append a tween to the registry. Registering the same handle twice is a
    /// caller error and is not checked.
    pub fn add(&self, tween: TweenHandle) {
        let mut reg = self.inner.borrow_mut();
        reg.slots.push(Some(tween));
        reg.live += 1;
        log::debug!("tween added ({} active)", reg.live);
    }

    /// Remove the tween stored at `index` and recycle it.
    pub fn try_remove_at(&self, tween: &TweenHandle, index: usize) -> Result<(), TweenError> {
        let removed = self.inner.borrow_mut().detach_at(tween, index)?;
        log::debug!("tween removed at slot {index}");
        removed.recycle();
        Ok(())
    }

    /// Remove `tween` after a linear search and recycle it. Prefer
    /// [`TweenManager::try_remove_at`] when the index is known.
    pub fn try_remove(&self, tween: &TweenHandle) -> Result<(), TweenError> {
        let removed = {
            let mut reg = self.inner.borrow_mut();
            let index = reg.position(tween).ok_or(TweenError::NotRegistered)?;
            reg.detach_at(tween, index)?
        };
        log::debug!("tween removed");
        removed.recycle();
        Ok(())
    }

    /// Infallible form of [`TweenManager::try_remove_at`]. Returns whether the
    /// tween was removed; a mismatch is logged and leaves the registry untouched.
    pub fn remove_at(&self, tween: &TweenHandle, index: usize) -> bool {
        match self.try_remove_at(tween, index) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("remove_at ignored: {err}");
                false
            }
        }
    }

    /// Infallible form of [`TweenManager::try_remove`].
    pub fn remove(&self, tween: &TweenHandle) -> bool {
        match self.try_remove(tween) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("remove ignored: {err}");
                false
            }
        }
    }

    /// Remove and recycle every registered tween.
    pub fn clear(&self) {
        let drained = self.inner.borrow_mut().drain_live();
        log::debug!("clearing {} tweens", drained.len());
        for tween in drained {
            tween.recycle();
        }
    }

    /// Advance every registered tween by one frame, removing and recycling the ones
    /// that report completion.
    ///
    /// Each tween registered when the tick starts is visited at most once, from the
    /// newest to the oldest. Tweens added during the tick wait for the next one;
    /// tweens removed during the tick before their turn are skipped.
    pub fn tick(&self) {
        let traversal = Traversal::begin(&self.inner);
        let mut visited = 0usize;
        let mut completed = 0usize;

        for index in traversal.indices() {
            let Some(tween) = traversal.slot(index) else {
                continue;
            };
            visited += 1;
            if !tween.advance() {
                continue;
            }
            completed += 1;
            // A tween may already have been removed from inside its own `advance`.
            match self.try_remove_at(&tween, index) {
                Ok(()) => {}
                Err(err) => log::debug!("completed tween already gone: {err}"),
            }
        }

        drop(traversal);
        log::trace!("tick: visited={visited} completed={completed}");
    }

    /// Stop every tween registered at call time. Tweens stay registered until their
    /// next `tick` reports completion or they are removed explicitly.
    pub fn stop_all(&self, bring_to_completion: bool) {
        self.stop_matching(bring_to_completion, |_| true);
    }

    /// Registered tweens whose context is `context`, in registration order.
    ///
    /// Tweens without [`crate::TweenControl`] and tweens reporting no context never
    /// match; a `None` query therefore returns nothing.
    pub fn tweens_with_context(&self, context: impl Into<Option<ObjectId>>) -> Vec<TweenHandle> {
        let context = context.into();
        self.collect_matching(|t| has_context(t, context))
    }

    pub fn stop_tweens_with_context(
        &self,
        context: impl Into<Option<ObjectId>>,
        bring_to_completion: bool,
    ) {
        let context = context.into();
        self.stop_matching(bring_to_completion, |t| has_context(t, context));
    }

    /// Registered tweens whose target object is `target`, in registration order.
    /// Same matching rules as [`TweenManager::tweens_with_context`].
    pub fn tweens_with_target(&self, target: impl Into<Option<ObjectId>>) -> Vec<TweenHandle> {
        let target = target.into();
        self.collect_matching(|t| has_target(t, target))
    }

    pub fn stop_tweens_with_target(
        &self,
        target: impl Into<Option<ObjectId>>,
        bring_to_completion: bool,
    ) {
        let target = target.into();
        self.stop_matching(bring_to_completion, |t| has_target(t, target));
    }

    fn collect_matching(&self, pred: impl Fn(&dyn Tweenable) -> bool) -> Vec<TweenHandle> {
        let snapshot = self.inner.borrow().snapshot();
        snapshot.into_iter().filter(|t| pred(&**t)).collect()
    }

    fn stop_matching(&self, bring_to_completion: bool, pred: impl Fn(&dyn Tweenable) -> bool) {
        let traversal = Traversal::begin(&self.inner);
        let mut stopped = 0usize;
        for index in traversal.indices() {
            let Some(tween) = traversal.slot(index) else {
                continue;
            };
            if pred(&*tween) {
                tween.stop(bring_to_completion);
                stopped += 1;
            }
        }
        drop(traversal);
        log::debug!("stopped {stopped} tweens (bring_to_completion={bring_to_completion})");
    }
}
