// World model: one immutable snapshot of the board per tick, plus the
// point-in-time queries the decision engine runs against it.
//
// Construction from a wire message is the strict validation boundary:
// malformed snapshots (bad dimensions, tile indices off the board) are
// rejected here so the decision logic never sees them.

use crate::types::{Coordinate, Direction, MapUpdateMessage, MapWire, Outcome, Snake};

/// Immutable snapshot of the game world for a single tick
#[derive(Debug, Clone)]
pub struct World {
    width: i32,
    height: i32,
    tick: u32,
    snakes: Vec<Snake>,
    food: Vec<Coordinate>,
    obstacles: Vec<Coordinate>,
}

impl World {
    /// Builds a world directly from already-validated parts.
    /// Callers must uphold the live-snake invariant (non-empty bodies).
    pub fn new(
        width: i32,
        height: i32,
        tick: u32,
        snakes: Vec<Snake>,
        food: Vec<Coordinate>,
        obstacles: Vec<Coordinate>,
    ) -> Self {
        World {
            width,
            height,
            tick,
            snakes,
            food,
            obstacles,
        }
    }

    /// Decodes and validates a raw map update into a world snapshot.
    ///
    /// Tile indices are checked against `[0, width * height)` before
    /// conversion. Wire snakes with empty position lists are dead and are
    /// excluded from the model.
    pub fn from_wire(wire: &MapWire) -> Result<World, String> {
        if wire.width <= 0 || wire.height <= 0 {
            return Err(format!(
                "Invalid map dimensions: {}x{}",
                wire.width, wire.height
            ));
        }

        let tile_count = wire.width * wire.height;
        let decode = |index: i32, what: &str| -> Result<Coordinate, String> {
            if index < 0 || index >= tile_count {
                return Err(format!(
                    "{} tile index {} outside board of {} tiles",
                    what, index, tile_count
                ));
            }
            Ok(Coordinate::from_index(index, wire.width))
        };

        let mut snakes = Vec::with_capacity(wire.snake_infos.len());
        for info in &wire.snake_infos {
            if info.positions.is_empty() {
                continue;
            }

            let mut positions = Vec::with_capacity(info.positions.len());
            for &index in &info.positions {
                positions.push(decode(index, "snake")?);
            }

            let direction = derive_heading(&positions);
            snakes.push(Snake {
                id: info.id.clone(),
                name: info.name.clone(),
                points: info.points,
                positions,
                direction,
            });
        }

        let food = wire
            .food_positions
            .iter()
            .map(|&i| decode(i, "food"))
            .collect::<Result<Vec<_>, _>>()?;
        let obstacles = wire
            .obstacle_positions
            .iter()
            .map(|&i| decode(i, "obstacle"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(World::new(
            wire.width,
            wire.height,
            wire.world_tick,
            snakes,
            food,
            obstacles,
        ))
    }

    /// Decodes the map carried by a per-player update message.
    pub fn from_message(message: &MapUpdateMessage) -> Result<World, String> {
        Self::from_wire(&message.map)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    /// Food tiles in wire order. Order matters: goal selection breaks
    /// distance ties by first encounter.
    pub fn food(&self) -> &[Coordinate] {
        &self.food
    }

    pub fn obstacles(&self) -> &[Coordinate] {
        &self.obstacles
    }

    /// Linear lookup by snake identity. Absence is an expected result.
    pub fn snake_by_id(&self, id: &str) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.id == id)
    }

    /// True if any live snake's body (heads included) covers the coordinate.
    pub fn is_snake(&self, coordinate: Coordinate) -> bool {
        self.snakes
            .iter()
            .any(|s| s.positions.contains(&coordinate))
    }

    pub fn is_obstacle(&self, coordinate: Coordinate) -> bool {
        self.obstacles.contains(&coordinate)
    }

    pub fn is_food(&self, coordinate: Coordinate) -> bool {
        self.food.contains(&coordinate)
    }

    /// Classifies one step in `direction` for the given snake.
    ///
    /// Death checks (snake parts, obstacles, board edge) dominate a
    /// simultaneous food match. Resolving a move for an unknown snake id is
    /// an integration fault and fails instead of guessing.
    pub fn outcome_of(&self, snake_id: &str, direction: Direction) -> Result<Outcome, String> {
        let snake = self
            .snake_by_id(snake_id)
            .ok_or_else(|| format!("No snake with id: {}", snake_id))?;

        let target = snake.head().translate(direction);

        if self.is_snake(target)
            || self.is_obstacle(target)
            || !target.is_inside(self.width, self.height)
        {
            return Ok(Outcome::Death);
        }

        if self.is_food(target) {
            Ok(Outcome::Points)
        } else {
            Ok(Outcome::Nothing)
        }
    }

    /// Convenience: the move does not classify as Death.
    pub fn survivable(&self, snake_id: &str, direction: Direction) -> Result<bool, String> {
        Ok(self.outcome_of(snake_id, direction)? != Outcome::Death)
    }
}

/// Derives a snake's heading from its body: the direction that moved the
/// neck onto the head. Segments stacked on the head (growth after eating)
/// are skipped. Single-segment snakes have not moved yet; Down is the
/// engine-wide default.
fn derive_heading(positions: &[Coordinate]) -> Direction {
    let head = positions[0];
    positions[1..]
        .iter()
        .find(|&&segment| segment != head)
        .and_then(|&neck| Direction::between(neck, head))
        .unwrap_or(Direction::Down)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SnakeInfoWire, MapWire};

    fn snake(id: &str, positions: Vec<Coordinate>, direction: Direction) -> Snake {
        Snake {
            id: id.to_string(),
            name: id.to_string(),
            points: 0,
            positions,
            direction,
        }
    }

    fn world_10x10(snakes: Vec<Snake>, food: Vec<Coordinate>, obstacles: Vec<Coordinate>) -> World {
        World::new(10, 10, 0, snakes, food, obstacles)
    }

    #[test]
    fn test_snake_by_id_absent_is_none() {
        let world = world_10x10(vec![], vec![], vec![]);
        assert!(world.snake_by_id("ghost").is_none());
    }

    #[test]
    fn test_outcome_unknown_snake_is_error() {
        let world = world_10x10(vec![], vec![], vec![]);
        let result = world.outcome_of("ghost", Direction::Up);
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_death_off_board() {
        let world = world_10x10(
            vec![snake(
                "me",
                vec![Coordinate { x: 9, y: 5 }, Coordinate { x: 8, y: 5 }],
                Direction::Right,
            )],
            vec![],
            vec![],
        );
        assert_eq!(
            world.outcome_of("me", Direction::Right).unwrap(),
            Outcome::Death
        );
        assert!(!world.survivable("me", Direction::Right).unwrap());
    }

    #[test]
    fn test_outcome_death_on_any_snake_part() {
        // Enemy body crosses the tile above our head
        let world = world_10x10(
            vec![
                snake(
                    "me",
                    vec![Coordinate { x: 5, y: 5 }, Coordinate { x: 5, y: 6 }],
                    Direction::Up,
                ),
                snake(
                    "enemy",
                    vec![Coordinate { x: 4, y: 4 }, Coordinate { x: 5, y: 4 }],
                    Direction::Right,
                ),
            ],
            vec![],
            vec![],
        );
        assert_eq!(
            world.outcome_of("me", Direction::Up).unwrap(),
            Outcome::Death
        );
        // Own body counts too
        assert_eq!(
            world.outcome_of("me", Direction::Down).unwrap(),
            Outcome::Death
        );
    }

    #[test]
    fn test_outcome_death_on_obstacle() {
        let world = world_10x10(
            vec![snake(
                "me",
                vec![Coordinate { x: 5, y: 5 }],
                Direction::Left,
            )],
            vec![],
            vec![Coordinate { x: 4, y: 5 }],
        );
        assert_eq!(
            world.outcome_of("me", Direction::Left).unwrap(),
            Outcome::Death
        );
    }

    #[test]
    fn test_outcome_points_on_food() {
        let world = world_10x10(
            vec![snake(
                "me",
                vec![Coordinate { x: 5, y: 5 }],
                Direction::Right,
            )],
            vec![Coordinate { x: 6, y: 5 }],
            vec![],
        );
        assert_eq!(
            world.outcome_of("me", Direction::Right).unwrap(),
            Outcome::Points
        );
        assert_eq!(
            world.outcome_of("me", Direction::Up).unwrap(),
            Outcome::Nothing
        );
    }

    #[test]
    fn test_death_dominates_food() {
        // Food sitting on an obstacle tile: still Death
        let world = world_10x10(
            vec![snake(
                "me",
                vec![Coordinate { x: 5, y: 5 }],
                Direction::Right,
            )],
            vec![Coordinate { x: 6, y: 5 }],
            vec![Coordinate { x: 6, y: 5 }],
        );
        assert_eq!(
            world.outcome_of("me", Direction::Right).unwrap(),
            Outcome::Death
        );
    }

    #[test]
    fn test_from_wire_rejects_bad_indices() {
        let wire = MapWire {
            width: 10,
            height: 10,
            world_tick: 0,
            snake_infos: vec![],
            food_positions: vec![100],
            obstacle_positions: vec![],
        };
        assert!(World::from_wire(&wire).is_err());

        let wire = MapWire {
            width: 0,
            height: 10,
            world_tick: 0,
            snake_infos: vec![],
            food_positions: vec![],
            obstacle_positions: vec![],
        };
        assert!(World::from_wire(&wire).is_err());
    }

    #[test]
    fn test_from_wire_drops_dead_snakes_and_derives_heading() {
        let wire = MapWire {
            width: 10,
            height: 10,
            world_tick: 3,
            snake_infos: vec![
                SnakeInfoWire {
                    id: "alive".to_string(),
                    name: "Alive".to_string(),
                    points: 5,
                    // head (5,5), neck (4,5): moved Right
                    positions: vec![55, 54],
                },
                SnakeInfoWire {
                    id: "dead".to_string(),
                    name: "Dead".to_string(),
                    points: 2,
                    positions: vec![],
                },
            ],
            food_positions: vec![0],
            obstacle_positions: vec![99],
        };

        let world = World::from_wire(&wire).unwrap();
        assert_eq!(world.snakes().len(), 1);
        assert!(world.snake_by_id("dead").is_none());

        let alive = world.snake_by_id("alive").unwrap();
        assert_eq!(alive.head(), Coordinate { x: 5, y: 5 });
        assert_eq!(alive.direction, Direction::Right);
        assert!(world.is_food(Coordinate { x: 0, y: 0 }));
        assert!(world.is_obstacle(Coordinate { x: 9, y: 9 }));
        assert_eq!(world.tick(), 3);
    }

    #[test]
    fn test_derive_heading_skips_stacked_segments() {
        // Growth stacks segments on the head right after eating
        let positions = vec![
            Coordinate { x: 5, y: 5 },
            Coordinate { x: 5, y: 5 },
            Coordinate { x: 5, y: 4 },
        ];
        assert_eq!(derive_heading(&positions), Direction::Down);

        // Single segment: never moved
        assert_eq!(
            derive_heading(&[Coordinate { x: 2, y: 2 }]),
            Direction::Down
        );
    }
}
