//! Animation registry: records in insertion order, played back in that order.

use crate::animation::{validate_duration, Action, AnimKind, AnimationRecord};
use crate::arena::Arena;
use crate::error::{EngineError, Result};
use crate::ids::AnimId;
use crate::interp::Easing;

#[derive(Debug)]
pub struct AnimationRegistry {
    records: Arena<AnimationRecord>,
    default_easing: Easing,
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        Self::new(crate::arena::DEFAULT_INIT_CAP, Easing::default())
    }
}

impl AnimationRegistry {
    pub fn new(initial_capacity: usize, default_easing: Easing) -> Self {
        Self {
            records: Arena::with_initial_capacity("animations", initial_capacity),
            default_easing,
        }
    }

    /// Append a record after validating its duration.
    pub fn push(
        &mut self,
        operation: &'static str,
        kind: AnimKind,
        action: Action,
        duration: f32,
    ) -> Result<AnimId> {
        validate_duration(operation, &action, duration)?;
        let id = AnimId::from_index(self.records.len());
        let record = AnimationRecord::new(id, kind, action, duration, self.default_easing);
        log::trace!("animations: {operation} -> {record}");
        self.records.push(record);
        Ok(id)
    }

    fn out_of_bounds(&self, id: AnimId) -> EngineError {
        EngineError::AnimationOutOfBounds {
            id: id.index(),
            count: self.records.len(),
        }
    }

    pub fn get(&self, id: AnimId) -> Result<&AnimationRecord> {
        self.records
            .get(id.index())
            .ok_or_else(|| self.out_of_bounds(id))
    }

    pub fn get_mut(&mut self, id: AnimId) -> Result<&mut AnimationRecord> {
        let err = self.out_of_bounds(id);
        self.records.get_mut(id.index()).ok_or(err)
    }

    /// Replace the easing of one record.
    pub fn override_easing(&mut self, id: AnimId, easing: Easing) -> Result<()> {
        self.get_mut(id)?.set_easing(easing);
        Ok(())
    }

    /// Sum of every record's duration.
    pub fn total_duration(&self) -> f32 {
        self.records.iter().map(AnimationRecord::duration).sum()
    }

    /// Zero every record's elapsed time.
    pub fn rewind_all(&mut self) {
        for record in self.records.iter_mut() {
            record.rewind();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationRecord> {
        self.records.iter()
    }

    pub fn free_all(&mut self) {
        self.records.free_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ObjectId;

    fn pauses(durations: &[f32]) -> AnimationRegistry {
        let mut reg = AnimationRegistry::default();
        for d in durations {
            reg.push("pause", AnimKind::Pause, Action::Pause, *d).unwrap();
        }
        reg
    }

    #[test]
    fn records_keep_insertion_order() {
        let reg = pauses(&[1.0, 2.0, 0.5]);
        let ids: Vec<AnimId> = reg.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![AnimId(0), AnimId(1), AnimId(2)]);
        assert_eq!(reg.get(AnimId(1)).unwrap().duration(), 2.0);
    }

    #[test]
    fn total_duration_sums_records() {
        let reg = pauses(&[1.0, 2.0, 0.5]);
        assert_eq!(reg.total_duration(), 3.5);
        assert_eq!(AnimationRegistry::default().total_duration(), 0.0);
    }

    #[test]
    fn override_easing_checks_bounds() {
        let mut reg = pauses(&[1.0]);
        assert_eq!(reg.get(AnimId(0)).unwrap().easing(), Easing::CubicSmoothStep);
        reg.override_easing(AnimId(0), Easing::SinePulse).unwrap();
        assert_eq!(reg.get(AnimId(0)).unwrap().easing(), Easing::SinePulse);
        assert_eq!(
            reg.override_easing(AnimId(1), Easing::Linear),
            Err(EngineError::AnimationOutOfBounds { id: 1, count: 1 })
        );
    }

    #[test]
    fn invalid_duration_is_not_stored() {
        let mut reg = AnimationRegistry::default();
        let err = reg
            .push("pause_for", AnimKind::Pause, Action::Pause, -1.0)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidDuration {
                operation: "pause_for",
                duration: -1.0
            }
        );
        assert!(reg.is_empty());

        let imm = Action::Immediate { object: ObjectId(0) };
        assert!(reg.push("add_object", AnimKind::Immediate, imm, 0.0).is_ok());
    }

    #[test]
    fn grows_and_rewinds() {
        let mut reg = AnimationRegistry::new(2, Easing::Linear);
        for _ in 0..5 {
            reg.push("pause", AnimKind::Pause, Action::Pause, 1.0).unwrap();
        }
        assert_eq!(reg.capacity(), 8);
        reg.get_mut(AnimId(4)).unwrap().advance_elapsed(0.5);
        reg.rewind_all();
        assert!(reg.iter().all(|r| r.elapsed() == 0.0));
        assert_eq!(reg.get(AnimId(0)).unwrap().easing(), Easing::Linear);
    }
}
