//! The tile grid, the drone, and the movement/planting rules.

use crate::error::FieldError;
use crate::grid;
use crate::layout::ResolvedLayout;
use indexmap::IndexSet;
use smallvec::SmallVec;
use tilth_core::{advance_growth, Direction, GrowthThresholds, Position, Terrain, Tile};

/// What happened when the drone acted this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Drone position after the action.
    pub position: Position,
    /// Whether the drone changed tile.
    pub moved: bool,
    /// Whether a move was attempted and refused (obstacle or edge).
    pub blocked: bool,
    /// Whether an empty tile under the drone was planted.
    pub planted: bool,
}

/// Stage transitions produced by one growth pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthReport {
    /// Tiles that went from Seed to Growing.
    pub sprouted: u32,
    /// Tiles that went from Growing to Ready.
    pub matured: u32,
}

/// A 2D field of tiles with exactly one drone.
///
/// The obstacle set and base are fixed at construction. The drone always
/// stands on a passable tile: every mutation path checks passability
/// before moving it.
///
/// # Examples
///
/// ```
/// use tilth_core::{Direction, GrowthThresholds, Position, Terrain};
/// use tilth_space::{Field, Layout};
///
/// let plan = Layout::Open.resolve(3, 1, None, None).unwrap();
/// let mut field = Field::new(&plan, GrowthThresholds::default()).unwrap();
///
/// // The start tile is planted as soon as the drone is placed on it.
/// assert_eq!(field.terrain(Position::new(0, 0)), Some(Terrain::Seed));
///
/// let out = field.move_drone(Direction::Right);
/// assert!(out.moved && out.planted);
/// assert_eq!(field.drone(), Position::new(1, 0));
/// ```
#[derive(Clone, Debug)]
pub struct Field {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    obstacles: IndexSet<Position>,
    base: Option<Position>,
    drone: Position,
    thresholds: GrowthThresholds,
}

impl Field {
    /// Maximum dimension: coordinates are `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Maximum tile count. Tiles are stored densely, so a field above
    /// this would not fit in memory.
    pub const MAX_CELLS: u64 = 1 << 24;

    /// Check `width × height` against [`MAX_DIM`](Self::MAX_DIM) and
    /// [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn check_dimensions(width: u32, height: u32) -> Result<(), FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyField);
        }
        for (name, value) in [("width", width), ("height", height)] {
            if value > Self::MAX_DIM {
                return Err(FieldError::DimensionTooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        let cells = u64::from(width) * u64::from(height);
        if cells > Self::MAX_CELLS {
            return Err(FieldError::TooManyCells {
                cells,
                max: Self::MAX_CELLS,
            });
        }
        Ok(())
    }

    /// Build a field from a resolved layout.
    ///
    /// Validates bounds, marker placement and that at least one farmable
    /// tile is reachable from the start (when any farmable tile exists).
    /// The drone is placed on the start tile, which is planted if empty.
    pub fn new(plan: &ResolvedLayout, thresholds: GrowthThresholds) -> Result<Self, FieldError> {
        let (width, height) = (plan.width, plan.height);
        Self::check_dimensions(width, height)?;

        let out_of_bounds = |what, position| FieldError::OutOfBounds {
            what,
            position,
            width,
            height,
        };

        let mut tiles = vec![Tile::empty(); (width as usize) * (height as usize)];
        for &pos in &plan.obstacles {
            let idx =
                grid::flat_index(pos, width, height).ok_or_else(|| out_of_bounds("obstacle", pos))?;
            tiles[idx] = Tile::obstacle();
        }
        if let Some(base) = plan.base {
            let idx =
                grid::flat_index(base, width, height).ok_or_else(|| out_of_bounds("base", base))?;
            if plan.obstacles.contains(&base) {
                return Err(FieldError::ObstacleOnBase { position: base });
            }
            tiles[idx] = Tile::base();
        }
        let start = plan.start;
        let start_idx =
            grid::flat_index(start, width, height).ok_or_else(|| out_of_bounds("start", start))?;
        if !tiles[start_idx].terrain().is_passable() {
            return Err(FieldError::StartBlocked { position: start });
        }

        let mut field = Self {
            width,
            height,
            tiles,
            obstacles: plan.obstacles.clone(),
            base: plan.base,
            drone: start,
            thresholds,
        };

        let farmable = field.farmable_count();
        if farmable > 0 {
            let reach = field.reachable_from(start);
            let reachable_farmland = reach
                .iter()
                .zip(&field.tiles)
                .any(|(&seen, tile)| seen && tile.terrain().is_farmable());
            if !reachable_farmland {
                return Err(FieldError::NoReachableFarmland { start, farmable });
            }
        }

        field.plant_under_drone();
        Ok(field)
    }

    /// Grid width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles.
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Growth thresholds used for planting and advancing.
    pub fn thresholds(&self) -> &GrowthThresholds {
        &self.thresholds
    }

    /// Current drone position.
    pub fn drone(&self) -> Position {
        self.drone
    }

    /// Base position, if the layout has one.
    pub fn base(&self) -> Option<Position> {
        self.base
    }

    /// Obstacle positions in layout order.
    pub fn obstacles(&self) -> &IndexSet<Position> {
        &self.obstacles
    }

    /// Whether `pos` lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    /// The tile at `pos`, or `None` out of bounds.
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        grid::flat_index(pos, self.width, self.height).map(|i| &self.tiles[i])
    }

    /// Terrain at `pos`, or `None` out of bounds.
    pub fn terrain(&self, pos: Position) -> Option<Terrain> {
        self.tile(pos).map(Tile::terrain)
    }

    /// True iff `pos` is in bounds and not an obstacle.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.terrain(pos).is_some_and(Terrain::is_passable)
    }

    /// In-bounds 4-neighbours of `pos` in RIGHT, DOWN, LEFT, UP order.
    pub fn neighbours(&self, pos: Position) -> SmallVec<[Position; 4]> {
        grid::neighbours(pos, self.width, self.height)
    }

    /// All tiles with their positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (grid::position_of(i, width), t))
    }

    /// Number of tiles currently showing `terrain`.
    pub fn count_terrain(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| t.terrain() == terrain).count()
    }

    /// Number of soil tiles, planted or not.
    pub fn farmable_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.terrain().is_farmable())
            .count()
    }

    /// Row-major mask of tiles reachable from `start` through passable
    /// tiles.
    pub fn reachable_from(&self, start: Position) -> Vec<bool> {
        grid::flood_fill(start, self.width, self.height, |i| {
            self.tiles[i].terrain().is_passable()
        })
    }

    /// Try to move the drone one tile.
    ///
    /// A blocked move (obstacle or edge) leaves the drone where it is and
    /// is not an error. Whichever tile the drone ends up on is planted if
    /// it is empty.
    pub fn move_drone(&mut self, direction: Direction) -> MoveOutcome {
        let target = self.drone.offset(direction);
        let moved = self.is_passable(target);
        if moved {
            self.drone = target;
        }
        let planted = self.plant_under_drone();
        MoveOutcome {
            position: self.drone,
            moved,
            blocked: !moved,
            planted,
        }
    }

    /// Keep the drone in place for a turn, planting if the tile is empty.
    pub fn wait(&mut self) -> MoveOutcome {
        let planted = self.plant_under_drone();
        MoveOutcome {
            position: self.drone,
            moved: false,
            blocked: false,
            planted,
        }
    }

    /// Advance every Seed/Growing tile by one turn, except `skip`.
    ///
    /// Tiles do not interact, so the pass order does not affect the result.
    pub fn advance_growth(&mut self, skip: Option<Position>) -> GrowthReport {
        let skip_idx = skip.and_then(|p| grid::flat_index(p, self.width, self.height));
        let mut report = GrowthReport::default();
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            if Some(i) == skip_idx || !tile.terrain().is_growing_stage() {
                continue;
            }
            let before = tile.terrain();
            *tile = advance_growth(*tile, &self.thresholds);
            match (before, tile.terrain()) {
                (Terrain::Seed, Terrain::Growing) => report.sprouted += 1,
                (Terrain::Growing, Terrain::Ready) => report.matured += 1,
                _ => {}
            }
        }
        report
    }

    /// Plant the tile under the drone if it is empty soil.
    fn plant_under_drone(&mut self) -> bool {
        let Some(idx) = grid::flat_index(self.drone, self.width, self.height) else {
            return false;
        };
        if self.tiles[idx].terrain() != Terrain::Empty {
            return false;
        }
        self.tiles[idx] = Tile::seeded(&self.thresholds);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn open(width: u32, height: u32) -> Field {
        let plan = Layout::Open.resolve(width, height, None, None).unwrap();
        Field::new(&plan, GrowthThresholds::default()).unwrap()
    }

    fn with_obstacles(width: u32, height: u32, obstacles: &[Position]) -> Field {
        let plan = Layout::Explicit {
            obstacles: obstacles.to_vec(),
        }
        .resolve(width, height, None, None)
        .unwrap();
        Field::new(&plan, GrowthThresholds::default()).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn start_tile_is_planted_on_construction() {
        let f = open(3, 3);
        assert_eq!(f.drone(), p(0, 0));
        assert_eq!(f.terrain(p(0, 0)), Some(Terrain::Seed));
        assert_eq!(f.count_terrain(Terrain::Empty), 8);
    }

    #[test]
    fn base_start_is_not_planted() {
        let plan = Layout::Open.resolve(1, 1, Some(p(0, 0)), None).unwrap();
        let f = Field::new(&plan, GrowthThresholds::default()).unwrap();
        assert_eq!(f.terrain(p(0, 0)), Some(Terrain::Base));
        assert_eq!(f.farmable_count(), 0);
    }

    #[test]
    fn rejects_zero_dimensions() {
        let plan = ResolvedLayout {
            width: 0,
            height: 3,
            obstacles: IndexSet::new(),
            base: None,
            start: p(0, 0),
        };
        assert_eq!(
            Field::new(&plan, GrowthThresholds::default()).unwrap_err(),
            FieldError::EmptyField
        );
    }

    #[test]
    fn rejects_oversized_fields_before_allocating() {
        let plan = ResolvedLayout {
            width: 2_000_000_000,
            height: 4,
            obstacles: IndexSet::new(),
            base: None,
            start: p(0, 0),
        };
        assert_eq!(
            Field::new(&plan, GrowthThresholds::default()).unwrap_err(),
            FieldError::TooManyCells {
                cells: 8_000_000_000,
                max: Field::MAX_CELLS,
            }
        );
        assert!(matches!(
            Layout::Scattered.resolve(2_000_000_000, 4, None, None),
            Err(FieldError::TooManyCells { .. })
        ));
        assert!(matches!(
            Field::check_dimensions(i32::MAX as u32 + 1, 1),
            Err(FieldError::DimensionTooLarge { name: "width", .. })
        ));
    }

    #[test]
    fn cell_cap_is_inclusive() {
        assert!(Field::check_dimensions(4096, 4096).is_ok());
        assert!(Field::check_dimensions(4096, 4097).is_err());
        let plan = Layout::Open.resolve(7, 3, None, None).unwrap();
        assert_eq!(Field::new(&plan, GrowthThresholds::default()).unwrap().cell_count(), 21);
    }

    #[test]
    fn rejects_out_of_bounds_obstacle() {
        let plan = ResolvedLayout {
            width: 2,
            height: 2,
            obstacles: [p(2, 0)].into_iter().collect(),
            base: None,
            start: p(0, 0),
        };
        assert!(matches!(
            Field::new(&plan, GrowthThresholds::default()),
            Err(FieldError::OutOfBounds { what: "obstacle", .. })
        ));
    }

    #[test]
    fn rejects_obstacle_on_base_and_blocked_start() {
        let plan = ResolvedLayout {
            width: 3,
            height: 1,
            obstacles: [p(2, 0)].into_iter().collect(),
            base: Some(p(2, 0)),
            start: p(0, 0),
        };
        assert_eq!(
            Field::new(&plan, GrowthThresholds::default()).unwrap_err(),
            FieldError::ObstacleOnBase { position: p(2, 0) }
        );

        let plan = ResolvedLayout {
            width: 3,
            height: 1,
            obstacles: [p(0, 0)].into_iter().collect(),
            base: None,
            start: p(0, 0),
        };
        assert_eq!(
            Field::new(&plan, GrowthThresholds::default()).unwrap_err(),
            FieldError::StartBlocked { position: p(0, 0) }
        );
    }

    #[test]
    fn rejects_unreachable_farmland() {
        // B#.   drone starts on the base, the only soil is walled off
        let plan = ResolvedLayout {
            width: 3,
            height: 1,
            obstacles: [p(1, 0)].into_iter().collect(),
            base: Some(p(0, 0)),
            start: p(0, 0),
        };
        assert_eq!(
            Field::new(&plan, GrowthThresholds::default()).unwrap_err(),
            FieldError::NoReachableFarmland {
                start: p(0, 0),
                farmable: 1
            }
        );
    }

    #[test]
    fn partially_walled_farmland_is_accepted() {
        // .#.   start tile itself is reachable soil
        let f = with_obstacles(3, 1, &[p(1, 0)]);
        let reach = f.reachable_from(f.drone());
        assert_eq!(reach, vec![true, false, false]);
    }

    // ── Movement ────────────────────────────────────────────────

    #[test]
    fn move_into_obstacle_is_a_silent_noop() {
        let mut f = with_obstacles(3, 1, &[p(1, 0)]);
        let out = f.move_drone(Direction::Right);
        assert_eq!(
            out,
            MoveOutcome {
                position: p(0, 0),
                moved: false,
                blocked: true,
                planted: false,
            }
        );
        assert_eq!(f.terrain(p(1, 0)), Some(Terrain::Obstacle));
    }

    #[test]
    fn move_off_edge_is_a_silent_noop() {
        let mut f = open(2, 2);
        for d in [Direction::Up, Direction::Left] {
            let out = f.move_drone(d);
            assert!(out.blocked);
            assert_eq!(f.drone(), p(0, 0));
        }
    }

    #[test]
    fn moving_onto_planted_or_base_does_not_replant() {
        let plan = Layout::Open.resolve(3, 1, Some(p(2, 0)), Some(p(0, 0))).unwrap();
        let mut f = Field::new(&plan, GrowthThresholds::default()).unwrap();
        let first = f.move_drone(Direction::Right);
        assert!(first.planted);
        let onto_base = f.move_drone(Direction::Right);
        assert!(onto_base.moved && !onto_base.planted);
        assert_eq!(f.terrain(p(2, 0)), Some(Terrain::Base));
        let back = f.move_drone(Direction::Left);
        assert!(back.moved && !back.planted);
        assert_eq!(f.tile(p(1, 0)).unwrap().growth_timer(), Some(2));
    }

    #[test]
    fn wait_plants_only_empty_tiles() {
        let mut f = open(2, 1);
        assert!(!f.wait().planted);
        assert_eq!(f.terrain(p(0, 0)), Some(Terrain::Seed));
    }

    // ── Growth ──────────────────────────────────────────────────

    #[test]
    fn growth_skips_the_freshly_planted_tile() {
        let mut f = open(2, 1);
        let out = f.move_drone(Direction::Right);
        let report = f.advance_growth(Some(out.position));
        assert_eq!(report, GrowthReport::default());
        assert_eq!(f.tile(p(1, 0)).unwrap().growth_timer(), Some(2));
        assert_eq!(f.tile(p(0, 0)).unwrap().growth_timer(), Some(1));
    }

    #[test]
    fn growth_reports_transitions() {
        let plan = Layout::Open.resolve(1, 1, None, None).unwrap();
        let mut f = Field::new(&plan, GrowthThresholds::new(1, 1)).unwrap();
        assert_eq!(
            f.advance_growth(None),
            GrowthReport {
                sprouted: 1,
                matured: 0
            }
        );
        assert_eq!(
            f.advance_growth(None),
            GrowthReport {
                sprouted: 0,
                matured: 1
            }
        );
        assert_eq!(f.count_terrain(Terrain::Ready), 1);
    }

    proptest! {
        #[test]
        fn drone_never_stands_on_an_obstacle(
            moves in proptest::collection::vec(0u8..5, 0..60),
        ) {
            let mut f = with_obstacles(5, 5, &[p(1, 1), p(2, 1), p(3, 3), p(1, 3)]);
            for code in moves {
                match Direction::from_code(code) {
                    Some(d) => { f.move_drone(d); }
                    None => { f.wait(); }
                }
                f.advance_growth(None);
                prop_assert!(f.is_passable(f.drone()));
                prop_assert_ne!(f.terrain(f.drone()), Some(Terrain::Empty));
            }
            prop_assert_eq!(f.count_terrain(Terrain::Obstacle), 4);
        }
    }
}
