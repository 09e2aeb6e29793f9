//! Per-member availability state.
//!
//! The timeline is owned by a single scheduling run and threaded explicitly
//! through every placement; nothing about resource availability lives
//! outside it. Members are addressed by their position in the pool, so every
//! scan visits them in declared order and ties go to the earlier member.

use crate::models::ResourcePool;

/// Busy intervals and end-of-work time per member.
#[derive(Debug, Clone)]
pub struct ResourceTimeline {
    next_free: Vec<f64>,
    busy: Vec<Vec<(f64, f64)>>,
}

/// Where a task would land on one member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Member position in the pool.
    pub resource: usize,
    /// Start time (hours).
    pub start: f64,
    /// Finish time (hours).
    pub finish: f64,
}

impl ResourceTimeline {
    /// Creates a timeline with every member free from t=0.
    pub fn new(pool: &ResourcePool) -> Self {
        Self {
            next_free: vec![0.0; pool.len()],
            busy: vec![Vec::new(); pool.len()],
        }
    }

    /// End of committed work on a member.
    pub fn next_free(&self, resource: usize) -> f64 {
        self.next_free.get(resource).copied().unwrap_or(0.0)
    }

    /// Member with the smallest `next_free`, first in pool order on ties.
    pub fn least_loaded(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &free) in self.next_free.iter().enumerate() {
            if best.map_or(true, |(_, b)| free < b) {
                best = Some((i, free));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Appends after the member's last committed work.
    pub fn append(&self, resource: usize, earliest: f64, duration: f64) -> Slot {
        let start = self.next_free(resource).max(earliest);
        Slot {
            resource,
            start,
            finish: start + duration,
        }
    }

    /// Member whose appended slot finishes first, first in pool order on
    /// ties.
    pub fn earliest_finish(&self, earliest: f64, duration: f64) -> Option<Slot> {
        let mut best: Option<Slot> = None;
        for resource in 0..self.next_free.len() {
            let slot = self.append(resource, earliest, duration);
            if best.map_or(true, |b| slot.finish < b.finish) {
                best = Some(slot);
            }
        }
        best
    }

    /// Earliest slot at or after `not_before` that fits between the
    /// member's committed intervals.
    pub fn first_fit(&self, resource: usize, not_before: f64, duration: f64) -> Slot {
        let mut start = not_before;
        if let Some(intervals) = self.busy.get(resource) {
            for &(s, f) in intervals {
                if f <= start {
                    continue;
                }
                if s >= start + duration {
                    break;
                }
                start = f;
            }
        }
        Slot {
            resource,
            start,
            finish: start + duration,
        }
    }

    /// Records a slot as busy.
    pub fn commit(&mut self, slot: Slot) {
        let Some(intervals) = self.busy.get_mut(slot.resource) else {
            return;
        };
        let pos = intervals.partition_point(|&(s, _)| s <= slot.start);
        intervals.insert(pos, (slot.start, slot.finish));
        if let Some(free) = self.next_free.get_mut(slot.resource) {
            *free = free.max(slot.finish);
        }
    }
}
