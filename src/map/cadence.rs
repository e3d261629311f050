//! Odometry down-sampling and past-view history.

use std::collections::VecDeque;

use crate::config::CadenceSection;
use crate::core::Point3;

/// What a sampled pose should trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleKind {
    /// Full cycle including the occlusion term
    Full {
        /// Oldest pose in the history
        past_view: Point3,
    },
    /// Cycle without occlusion; runs the quality term instead
    Light,
}

/// Turns a raw odometry stream into confidence cycles.
///
/// Every `frames_per_cycle`-th pose is sampled into a bounded history. The
/// first sampled pose and every `full_cycle_interval`-th one after it run a
/// full cycle, viewed from the oldest pose still in the history. The very
/// first full cycle therefore views from the current pose.
#[derive(Clone, Debug)]
pub struct PoseCadence {
    frames_per_cycle: u32,
    full_cycle_interval: u32,
    history_len: usize,
    frame: u64,
    cycles: u64,
    history: VecDeque<Point3>,
}

impl PoseCadence {
    /// Cadence from configuration.
    pub fn new(config: &CadenceSection) -> Self {
        let history_len = config.past_view_len();
        Self {
            frames_per_cycle: config.frames_per_cycle(),
            full_cycle_interval: config.full_cycle_interval.max(1),
            history_len,
            frame: 0,
            cycles: 0,
            history: VecDeque::with_capacity(history_len + 1),
        }
    }

    /// Feed one odometry pose. Returns the cycle to run, if any.
    pub fn admit(&mut self, pose: Point3) -> Option<CycleKind> {
        let frame = self.frame;
        self.frame += 1;
        if frame % self.frames_per_cycle as u64 != 0 {
            return None;
        }

        self.history.push_back(pose);
        while self.history.len() > self.history_len + 1 {
            self.history.pop_front();
        }

        let cycle = self.cycles;
        self.cycles += 1;
        if cycle % self.full_cycle_interval as u64 == 0
            && let Some(&past_view) = self.history.front()
        {
            return Some(CycleKind::Full { past_view });
        }
        Some(CycleKind::Light)
    }

    /// Sampled poses currently held, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Point3> {
        self.history.iter()
    }

    /// Cycles triggered so far.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
