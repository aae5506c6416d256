#![allow(dead_code)]
//! Recording probe tween shared by the integration tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vizij_tween_core::{ObjectId, TweenControl, TweenHandle, TweenManager, Tweenable};

type Hook = Box<dyn Fn(&TweenManager)>;

/// Tween that completes after a fixed number of ticks and records every call.
pub struct Probe {
    pub name: &'static str,
    frames_left: Cell<u32>,
    context: Option<ObjectId>,
    target: Option<ObjectId>,
    control: bool,
    pub ticks: Cell<u32>,
    pub recycles: Cell<u32>,
    pub stops: RefCell<Vec<bool>>,
    journal: Option<Rc<RefCell<Vec<&'static str>>>>,
    manager: Option<TweenManager>,
    on_tick: RefCell<Option<Hook>>,
    on_stop: RefCell<Option<Hook>>,
}

impl Probe {
    /// Plain tween without grouping metadata. `frames == 0` never completes.
    pub fn plain(name: &'static str, frames: u32) -> Self {
        Self {
            name,
            frames_left: Cell::new(frames),
            context: None,
            target: None,
            control: false,
            ticks: Cell::new(0),
            recycles: Cell::new(0),
            stops: RefCell::new(Vec::new()),
            journal: None,
            manager: None,
            on_tick: RefCell::new(None),
            on_stop: RefCell::new(None),
        }
    }

    /// Tween exposing context/target through [`TweenControl`].
    pub fn controlled(
        name: &'static str,
        frames: u32,
        context: Option<ObjectId>,
        target: Option<ObjectId>,
    ) -> Self {
        Self {
            context,
            target,
            control: true,
            ..Self::plain(name, frames)
        }
    }

    pub fn journal(mut self, journal: &Rc<RefCell<Vec<&'static str>>>) -> Self {
        self.journal = Some(Rc::clone(journal));
        self
    }

    /// Handle given to hooks; the probe keeps a clone so it can re-enter the manager.
    pub fn manager(mut self, manager: &TweenManager) -> Self {
        self.manager = Some(manager.clone());
        self
    }

    pub fn on_tick(self, hook: impl Fn(&TweenManager) + 'static) -> Self {
        *self.on_tick.borrow_mut() = Some(Box::new(hook));
        self
    }

    pub fn on_stop(self, hook: impl Fn(&TweenManager) + 'static) -> Self {
        *self.on_stop.borrow_mut() = Some(Box::new(hook));
        self
    }

    pub fn into_handle(self) -> (Rc<Probe>, TweenHandle) {
        let probe = Rc::new(self);
        let handle: TweenHandle = probe.clone();
        (probe, handle)
    }

    fn run_hook(&self, hook: &RefCell<Option<Hook>>) {
        // Taken out for the call so a hook may not re-enter itself.
        let taken = hook.borrow_mut().take();
        if let (Some(f), Some(mgr)) = (taken.as_ref(), self.manager.as_ref()) {
            f(mgr);
        }
        if let Some(f) = taken {
            *hook.borrow_mut() = Some(f);
        }
    }
}

impl Tweenable for Probe {
    fn advance(&self) -> bool {
        self.ticks.set(self.ticks.get() + 1);
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push(self.name);
        }
        self.run_hook(&self.on_tick);
        match self.frames_left.get() {
            0 => false,
            1 => {
                self.frames_left.set(0);
                true
            }
            n => {
                self.frames_left.set(n - 1);
                false
            }
        }
    }

    fn recycle(&self) {
        self.recycles.set(self.recycles.get() + 1);
    }

    fn stop(&self, bring_to_completion: bool) {
        self.stops.borrow_mut().push(bring_to_completion);
        self.run_hook(&self.on_stop);
    }

    fn as_control(&self) -> Option<&dyn TweenControl> {
        if self.control {
            Some(self)
        } else {
            None
        }
    }
}

impl TweenControl for Probe {
    fn context(&self) -> Option<ObjectId> {
        self.context
    }

    fn target_object(&self) -> Option<ObjectId> {
        self.target
    }
}

pub fn names(tweens: &[TweenHandle], probes: &[&Rc<Probe>]) -> Vec<&'static str> {
    tweens
        .iter()
        .filter_map(|t| {
            probes
                .iter()
                .find(|p| {
                    let h: TweenHandle = Rc::<Probe>::clone(**p);
                    vizij_tween_core::same_tween(&h, t)
                })
                .map(|p| p.name)
        })
        .collect()
}
