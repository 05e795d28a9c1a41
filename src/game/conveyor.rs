use std::collections::VecDeque;

use super::equation::Equation;
use super::pool::EquationPool;

/// Vertical distance between neighbouring equations.
pub const STEP: f32 = 80.0;
/// Resting position of the bottom slot.
pub const BASE_Y: f32 = 140.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConveyorState {
    Filling,
    Steady,
}

/// The visible window of equations. The front of the deque is the bottom
/// row, the next one to leave the screen.
pub struct ConveyorQueue {
    items: VecDeque<Equation>,
    capacity: usize,
    state: ConveyorState,
}

impl ConveyorQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            capacity: 0,
            state: ConveyorState::Filling,
        }
    }

    pub fn initial_fill(&mut self, pool: &mut EquationPool, capacity: usize) {
        assert!(self.items.is_empty(), "initial fill on a non-empty conveyor");
        assert_eq!(self.state, ConveyorState::Filling, "conveyor already filled");
        assert!(capacity > 0, "conveyor needs at least one slot");

        self.capacity = capacity;
        self.items.reserve(capacity + 1);
        for i in 0..capacity {
            let mut eq = pool.obtain();
            eq.y = BASE_Y + i as f32 * STEP;
            eq.target_y = eq.y;
            self.items.push_back(eq);
        }
        self.state = ConveyorState::Steady;
    }

    /// Moves everything down one step, drops the bottom equation and adds a
    /// fresh one on top. Returns the dropped equation so it can go back to
    /// the pool.
    pub fn shift(&mut self, pool: &mut EquationPool) -> Equation {
        assert_eq!(self.state, ConveyorState::Steady, "shift before the conveyor was filled");

        for eq in self.items.iter_mut() {
            eq.target_y -= STEP;
        }
        let removed = self
            .items
            .pop_front()
            .expect("shift on an empty conveyor");

        let mut eq = pool.obtain();
        eq.y = self.top_y();
        eq.target_y = eq.y - STEP;
        self.items.push_back(eq);

        removed
    }

    /// Eases every equation toward its target so that one full step takes
    /// `move_time` seconds.
    pub fn animate(&mut self, dt: f32, move_time: f32) {
        let max_move = if move_time > 0.0 { STEP * dt / move_time } else { f32::INFINITY };
        for eq in self.items.iter_mut() {
            let delta = eq.target_y - eq.y;
            if delta.abs() <= max_move {
                eq.y = eq.target_y;
            } else {
                eq.y += max_move.copysign(delta);
            }
        }
    }

    /// Where a new equation enters, one step above the highest slot.
    pub fn top_y(&self) -> f32 {
        BASE_Y + self.capacity as f32 * STEP
    }

    pub fn bottom(&self) -> Option<&Equation> {
        self.items.front()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Equation> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn state(&self) -> ConveyorState {
        self.state
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Equation> + '_ {
        self.items.drain(..)
    }
}

impl Default for ConveyorQueue {
    fn default() -> Self {
        Self::new()
    }
}
