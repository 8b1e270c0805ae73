//! Sequential playback over the animation registry.
//!
//! One record is active at a time. Each `advance(dt)` touches at most one
//! record; time left over when a record finishes is not carried into the next.

use serde::{Deserialize, Serialize};

use crate::animation::Action;
use crate::error::{EngineError, Result};
use crate::ids::AnimId;
use crate::objects::ObjectRegistry;
use crate::outputs::{CoreEvent, Outputs};
use crate::timeline::AnimationRegistry;
use crate::value_box::ValueStore;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing advanced since construction or the last reset.
    #[default]
    Idle,
    /// Index of the active record.
    Playing(usize),
    Completed,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing(_) => "playing",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    state: PlaybackState,
    clock: f32,
    paused: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Global clock in seconds.
    #[inline]
    pub fn current_time(&self) -> f32 {
        self.clock
    }

    /// Cursor position; `record_count` once completed.
    pub fn current_record_index(&self, record_count: usize) -> usize {
        match self.state {
            PlaybackState::Idle => 0,
            PlaybackState::Playing(cursor) => cursor,
            PlaybackState::Completed => record_count,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("scheduler: paused={paused} at t={:.3}", self.clock);
        }
        self.paused = paused;
    }

    /// Back to `Idle` with the clock at zero. The pause flag is kept.
    pub fn reset(&mut self) {
        log::trace!(
            "scheduler: reset from {} at t={:.3}",
            self.state.name(),
            self.clock
        );
        self.state = PlaybackState::Idle;
        self.clock = 0.0;
    }

    /// Step the active record by `dt` seconds.
    pub fn advance(
        &mut self,
        dt: f32,
        objects: &mut ObjectRegistry,
        animations: &mut AnimationRegistry,
        values: &ValueStore,
        out: &mut Outputs,
    ) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EngineError::InvalidDelta { dt });
        }
        if self.paused {
            return Ok(());
        }

        // Nothing is committed until every fallible step of this frame succeeded.
        let starting = self.state == PlaybackState::Idle;
        let records = animations.len();
        let cursor = match self.state {
            PlaybackState::Idle if records == 0 => {
                self.state = PlaybackState::Completed;
                out.push_event(CoreEvent::PlaybackStarted { records });
                return Ok(());
            }
            PlaybackState::Idle => 0,
            PlaybackState::Playing(cursor) => cursor,
            PlaybackState::Completed => return Ok(()),
        };

        let anim = AnimId::from_index(cursor);
        let record = animations.get_mut(anim)?;
        let action = *record.action();
        let activate = match action.target() {
            Some(object) => !objects.get(object)?.should_render(),
            None => false,
        };

        if !activate {
            if let Action::Tween { object, tween } = action {
                let t = record.factor_at(record.elapsed_after(dt))?;
                tween.apply(objects.get_mut(object)?, values, t)?;
            }
        }

        if starting {
            self.state = PlaybackState::Playing(0);
            out.push_event(CoreEvent::PlaybackStarted { records });
        }
        if let (true, Some(object)) = (activate, action.target()) {
            objects.mark_renderable(object)?;
            out.push_event(CoreEvent::ObjectActivated { object, anim });
            if !matches!(action, Action::Immediate { .. }) {
                return Ok(());
            }
        }
        if !matches!(action, Action::Immediate { .. }) {
            self.clock += dt;
            record.advance_elapsed(dt);
        }

        if record.is_finished() {
            log::debug!("scheduler: finished {record} at t={:.3}", self.clock);
            out.push_event(CoreEvent::RecordFinished {
                anim,
                time: self.clock,
            });
            let next = cursor + 1;
            if next < records {
                log::trace!("scheduler: cursor {cursor} -> {next}");
                self.state = PlaybackState::Playing(next);
            } else {
                log::info!(
                    "scheduler: timeline completed at t={:.3} ({} records)",
                    self.clock,
                    records
                );
                self.state = PlaybackState::Completed;
                out.push_event(CoreEvent::PlaybackCompleted { time: self.clock });
            }
        }
        Ok(())
    }
}
