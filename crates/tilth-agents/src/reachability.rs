//! The reference breadth-first coverage agent.
//!
//! The agent cannot see the whole field, so it rebuilds a partial map
//! from the observations it is given: every tile it has ever seen, plus
//! the set of tiles it has stood on. Each turn it searches that map
//! breadth-first from the drone and walks toward the nearest known
//! passable tile it has not visited yet. The base counts: stepping on it
//! is how the agent sees what lies beyond.
//!
//! # Determinism
//!
//! Neighbours are expanded in [`Direction::ALL`] order (RIGHT, DOWN,
//! LEFT, UP) and the first matching tile dequeued wins, so ties between
//! equally distant plots always break the same way. The same observation
//! history always yields the same action sequence.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use tilth_core::{Action, Direction, Position, Terrain};
use tilth_obs::Observation;
use tracing::trace;

use crate::agent::Agent;

/// Deterministic BFS agent used as a correctness baseline.
///
/// # Examples
///
/// ```
/// use tilth_agents::{Agent, ReachabilityAgent};
/// use tilth_core::{Action, Direction, GrowthThresholds, TurnId};
/// use tilth_space::{Field, Layout};
///
/// let plan = Layout::Open.resolve(3, 1, None, None).unwrap();
/// let field = Field::new(&plan, GrowthThresholds::default()).unwrap();
/// let obs = tilth_obs::build_observation(&field, TurnId(0), None);
///
/// let mut agent = ReachabilityAgent::new();
/// assert_eq!(agent.decide(&obs), Action::Move(Direction::Right));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReachabilityAgent {
    known: IndexMap<Position, Terrain>,
    visited: IndexSet<Position>,
}

impl ReachabilityAgent {
    /// A fresh agent with an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles seen so far with their last observed terrain.
    pub fn known(&self) -> &IndexMap<Position, Terrain> {
        &self.known
    }

    /// Tiles the drone has stood on, in first-visit order.
    pub fn visited(&self) -> &IndexSet<Position> {
        &self.visited
    }

    fn absorb(&mut self, observation: &Observation) {
        for (pos, terrain) in observation.iter() {
            self.known.insert(pos, terrain);
        }
        self.visited.insert(observation.position);
    }

    fn is_target(&self, pos: Position, terrain: Terrain) -> bool {
        terrain.is_passable() && !self.visited.contains(&pos)
    }

    /// Nearest target and the first move toward it.
    fn plan(&self, from: Position) -> Option<(Position, Direction)> {
        let mut first_move: IndexMap<Position, Option<Direction>> = IndexMap::new();
        let mut queue = VecDeque::new();
        first_move.insert(from, None);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            let via = first_move.get(&current).copied().flatten();
            if let (Some(dir), Some(&terrain)) = (via, self.known.get(&current)) {
                if self.is_target(current, terrain) {
                    return Some((current, dir));
                }
            }
            for dir in Direction::ALL {
                let next = current.offset(dir);
                if first_move.contains_key(&next) {
                    continue;
                }
                match self.known.get(&next) {
                    Some(t) if t.is_passable() => {
                        first_move.insert(next, Some(via.unwrap_or(dir)));
                        queue.push_back(next);
                    }
                    _ => {}
                }
            }
        }
        None
    }
}

impl Agent for ReachabilityAgent {
    fn name(&self) -> &str {
        "reachability"
    }

    fn decide(&mut self, observation: &Observation) -> Action {
        self.absorb(observation);
        match self.plan(observation.position) {
            Some((target, dir)) => {
                trace!(%target, direction = %dir, "heading to nearest unvisited tile");
                Action::Move(dir)
            }
            None => Action::Wait,
        }
    }

    fn reset(&mut self) {
        self.known.clear();
        self.visited.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilth_core::{GrowthThresholds, TurnId};
    use tilth_obs::build_observation;
    use tilth_test_utils::fixtures;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn prefers_right_then_down() {
        let field = fixtures::open_field(3, 3);
        let obs = build_observation(&field, TurnId(0), None);
        let mut agent = ReachabilityAgent::new();
        assert_eq!(agent.decide(&obs), Action::Move(Direction::Right));
    }

    #[test]
    fn waits_when_nothing_is_reachable() {
        let field = fixtures::field_from_ascii(&["S#"], GrowthThresholds::default());
        let obs = build_observation(&field, TurnId(0), None);
        let mut agent = ReachabilityAgent::new();
        assert_eq!(agent.decide(&obs), Action::Wait);
        assert_eq!(agent.known().get(&p(1, 0)), Some(&Terrain::Obstacle));
    }

    #[test]
    fn explores_through_the_base() {
        // Drone at (0,0); base at (1,0); soil beyond it at (2,0).
        let mut field = fixtures::field_from_ascii(&["SB."], GrowthThresholds::default());
        let mut agent = ReachabilityAgent::new();
        let obs = build_observation(&field, TurnId(0), None);
        assert_eq!(agent.decide(&obs), Action::Move(Direction::Right));

        field.move_drone(Direction::Right);
        let obs = build_observation(&field, TurnId(1), None);
        assert_eq!(obs.current(), Some(Terrain::Base));
        assert_eq!(agent.decide(&obs), Action::Move(Direction::Right));
    }

    #[test]
    fn first_move_follows_the_shortest_known_path() {
        let mut agent = ReachabilityAgent::new();
        for (pos, t) in [
            (p(0, 0), Terrain::Seed),
            (p(1, 0), Terrain::Obstacle),
            (p(0, 1), Terrain::Seed),
            (p(1, 1), Terrain::Seed),
            (p(2, 1), Terrain::Seed),
            (p(2, 0), Terrain::Empty),
        ] {
            agent.known.insert(pos, t);
        }
        for pos in [p(0, 0), p(0, 1), p(1, 1), p(2, 1)] {
            agent.visited.insert(pos);
        }
        assert_eq!(agent.plan(p(0, 0)), Some((p(2, 0), Direction::Down)));
    }

    #[test]
    fn reset_forgets_map() {
        let field = fixtures::open_field(2, 2);
        let obs = build_observation(&field, TurnId(0), None);
        let mut agent = ReachabilityAgent::new();
        agent.decide(&obs);
        assert!(!agent.known().is_empty());
        agent.reset();
        assert!(agent.known().is_empty());
        assert!(agent.visited().is_empty());
    }
}
