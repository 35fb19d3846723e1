//! Rotation Controller
//!
//! Cycles a rotating banner through its eligible records. Two timers feed
//! it: a short tick that fills the progress indicator and a long advance
//! that moves to the next record. The controller only decides; the caller
//! owns the timers and follows the returned [`RotationCommand`]s.
//!
//! Ticks are tagged with the [`Cycle`] they were armed for. A tick that
//! lands after the advance closing its cycle is dropped, so each record
//! starts at zero progress.

use crate::{
    device::DeviceClass,
    display::Epoch,
    promotions::PromotionRecord,
    timing::Timings,
    view::{BannerView, Indicator, Picture},
};

/// Banner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    /// No eligible records; no timers may run.
    Empty,

    /// Showing `index`, with `progress` ticks elapsed in this cycle.
    Displaying {
        /// Displayed record.
        index: usize,

        /// Elapsed ticks, saturating at one full cycle.
        progress: u32,
    },
}

/// What the caller must do with its timers after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCommand {
    /// Cancel any running timers and start tick and advance timers tagged
    /// with `epoch`.
    Start {
        /// Tag for events produced by the new timers.
        epoch: Epoch,
    },

    /// Cancel both timers.
    Stop,

    /// Leave the timers alone.
    Keep,
}

/// Display cycle a tick timer was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cycle {
    epoch: Epoch,
    advances: u64,
}

/// Multi-item banner state machine.
#[derive(Debug, Clone)]
pub struct RotationController {
    records: Vec<PromotionRecord>,
    state: RotationState,
    ticks_per_cycle: u32,
    epoch: Epoch,
    advances: u64,
}

impl RotationController {
    /// Create an empty controller.
    #[must_use]
    pub fn new(timings: &Timings) -> Self {
        Self {
            records: Vec::new(),
            state: RotationState::Empty,
            ticks_per_cycle: timings.ticks_per_cycle(),
            epoch: Epoch::default(),
            advances: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RotationState {
        self.state
    }

    /// Tag of the currently valid timers.
    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Records being rotated.
    #[must_use]
    pub fn records(&self) -> &[PromotionRecord] {
        &self.records
    }

    /// Feed a freshly selected eligible list.
    ///
    /// Identical content keeps the rotation going; anything else restarts it.
    pub fn replace(&mut self, records: Vec<PromotionRecord>) -> RotationCommand {
        if records == self.records {
            return RotationCommand::Keep;
        }

        self.restart(records)
    }

    /// Restart from the first record regardless of content, used when the
    /// slot or device class changes.
    pub fn restart(&mut self, records: Vec<PromotionRecord>) -> RotationCommand {
        self.records = records;
        self.epoch = self.epoch.next();
        self.advances = 0;

        if self.records.is_empty() {
            self.state = RotationState::Empty;

            return RotationCommand::Stop;
        }

        self.state = RotationState::Displaying {
            index: 0,
            progress: 0,
        };

        RotationCommand::Start { epoch: self.epoch }
    }

    /// Drop everything and stop, e.g. on unmount.
    pub fn clear(&mut self) -> RotationCommand {
        if matches!(self.state, RotationState::Empty) && self.records.is_empty() {
            return RotationCommand::Keep;
        }

        self.restart(Vec::new())
    }

    /// Tag for tick timers armed now. Changes on every advance and restart.
    #[must_use]
    pub const fn cycle(&self) -> Cycle {
        Cycle {
            epoch: self.epoch,
            advances: self.advances,
        }
    }

    /// Progress tick. Returns whether the state changed.
    pub fn tick(&mut self, cycle: Cycle) -> bool {
        if cycle != self.cycle() {
            return false;
        }

        match &mut self.state {
            RotationState::Displaying { progress, .. } if *progress < self.ticks_per_cycle => {
                *progress += 1;
                true
            }
            RotationState::Displaying { .. } | RotationState::Empty => false,
        }
    }

    /// Advance to the next record. Returns whether the state changed.
    pub fn advance(&mut self, epoch: Epoch) -> bool {
        if epoch != self.epoch {
            return false;
        }

        let len = self.records.len();

        match &mut self.state {
            RotationState::Displaying { index, progress } if len > 0 => {
                *index = (*index + 1) % len;
                *progress = 0;
                self.advances = self.advances.wrapping_add(1);
                true
            }
            RotationState::Displaying { .. } | RotationState::Empty => false,
        }
    }

    /// Displayed index, if any.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self.state {
            RotationState::Displaying { index, .. } => Some(index),
            RotationState::Empty => None,
        }
    }

    /// Fill level of the active indicator, `0..=100`.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        match self.state {
            RotationState::Displaying { progress, .. } => {
                let percent = u64::from(progress) * 100 / u64::from(self.ticks_per_cycle.max(1));

                u8::try_from(percent.min(100)).unwrap_or(100)
            }
            RotationState::Empty => 0,
        }
    }

    /// Frame to draw for `device`.
    #[must_use]
    pub fn view(&self, device: DeviceClass) -> Option<BannerView> {
        let index = self.index()?;
        let record = self.records.get(index)?;
        let picture = Picture::of(record, device)?;
        let progress_percent = self.progress_percent();

        let indicators = (0..self.records.len())
            .map(|position| Indicator {
                active: position == index,
                progress_percent: if position == index { progress_percent } else { 0 },
            })
            .collect();

        Some(BannerView {
            id: record.id.clone(),
            picture,
            indicators,
        })
    }
}
