// Decision engine: picks one direction per tick from a world snapshot.
//
// Three strategies layer in priority order: reactive collision avoidance,
// goal-directed food seeking, continue-straight fallback. The only state
// carried across ticks is the current food goal, threaded in and out
// explicitly so the engine stays a pure function of (snapshot, prior goal).
//
// Single ply, no search: every prediction looks exactly one step ahead.

use crate::config::Config;
use crate::types::{Coordinate, Direction, Snake};
use crate::world::World;

/// Last-resort scan order when the chosen direction turns out fatal
const FALLBACK_SCAN: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

/// The food tile currently being pursued, if any. Outlives individual
/// snapshots; created and cleared only by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodGoal {
    target: Option<Coordinate>,
}

impl FoodGoal {
    pub fn new() -> Self {
        FoodGoal { target: None }
    }

    pub fn target(&self) -> Option<Coordinate> {
        self.target
    }

    pub fn set(&mut self, target: Coordinate) {
        self.target = Some(target);
    }

    pub fn clear(&mut self) {
        self.target = None;
    }
}

/// Chooses the next direction for `you`.
///
/// Always produces a value: the hosting protocol requires a registered move
/// every tick, even when every option is predicted fatal.
pub fn next_move(world: &World, you: &Snake, goal: &mut FoodGoal, config: &Config) -> Direction {
    refresh_goal(world, you, goal);

    let candidate = simulate_next_move(world, you, goal, config);
    if survivable(world, you, candidate) {
        return candidate;
    }

    FALLBACK_SCAN
        .iter()
        .copied()
        .find(|&dir| survivable(world, you, dir))
        .unwrap_or(config.decision.default_direction)
}

/// Runs the strategy stack without the final safety net.
fn simulate_next_move(
    world: &World,
    you: &Snake,
    goal: &mut FoodGoal,
    config: &Config,
) -> Direction {
    // Corrections to the current heading always win, food never overrides
    if let Some(corrected) = check_and_avoid_collision(world, you, you.direction) {
        return corrected;
    }

    if let Some(toward_food) = food_direction(world, you, goal, config) {
        if let Some(corrected) = check_and_avoid_collision(world, you, toward_food) {
            return corrected;
        }
        return toward_food;
    }

    // Nothing to chase yet: pick a goal for future ticks, keep going straight
    select_goal(world, you, goal, config);
    you.direction
}

/// Detects the two danger classes for a candidate direction and produces a
/// corrective direction when one applies.
fn check_and_avoid_collision(world: &World, you: &Snake, direction: Direction) -> Option<Direction> {
    // Head-on danger on the original candidate comes first
    if let Some(turned) = avoid_head_on(world, you, direction) {
        return Some(turned);
    }

    // Then body / obstacle / edge danger
    if !survivable(world, you, direction) {
        let turned = turn_perpendicular(world, you);
        // The replacement can itself steer into an oncoming head;
        // its opposite is the last resort
        if avoid_head_on(world, you, turned).is_some() {
            return Some(turned.opposite());
        }
        return Some(turned);
    }

    None
}

/// One-ply head-on prediction: every other snake is assumed to continue
/// along its current heading. A coinciding destination is treated the same
/// as an unsurvivable move.
fn avoid_head_on(world: &World, you: &Snake, direction: Direction) -> Option<Direction> {
    let our_next = you.head().translate(direction);

    for other in world.snakes() {
        if other.id == you.id {
            continue;
        }
        let their_next = other.head().translate(other.direction);
        if our_next == their_next {
            return Some(turn_perpendicular(world, you));
        }
    }

    None
}

/// Fixed perpendicular turn: vertical headings prefer Right, horizontal
/// headings prefer Down, each falling back to the other side only when the
/// preferred tile is unsurvivable. Deterministic, ignores the rejected
/// direction.
pub fn turn_perpendicular(world: &World, you: &Snake) -> Direction {
    match you.direction {
        Direction::Up | Direction::Down => {
            if survivable(world, you, Direction::Right) {
                Direction::Right
            } else {
                Direction::Left
            }
        }
        Direction::Left | Direction::Right => {
            if survivable(world, you, Direction::Down) {
                Direction::Down
            } else {
                Direction::Up
            }
        }
    }
}

/// Drops a stale goal: the tile stopped being food (someone ate it) or the
/// head is standing on it.
fn refresh_goal(world: &World, you: &Snake, goal: &mut FoodGoal) {
    if let Some(target) = goal.target() {
        if !world.is_food(target) || you.head() == target {
            goal.clear();
        }
    }
}

/// Resolves the direction toward the current goal, x axis before y.
fn food_direction(
    world: &World,
    you: &Snake,
    goal: &mut FoodGoal,
    config: &Config,
) -> Option<Direction> {
    let target = goal.target()?;
    let head = you.head();

    if !world.is_food(target) {
        goal.clear();
        return None;
    }
    if head == target {
        goal.clear();
        return None;
    }

    let horizontal = if target.x > head.x {
        Some(Direction::Right)
    } else if target.x < head.x {
        Some(Direction::Left)
    } else {
        None
    };
    let vertical = if target.y > head.y {
        Some(Direction::Down)
    } else if target.y < head.y {
        Some(Direction::Up)
    } else {
        None
    };

    if config.goal.x_axis_first {
        horizontal.or(vertical)
    } else {
        vertical.or(horizontal)
    }
}

/// Locks onto the closest food tile by Manhattan distance, first minimum on
/// ties. Only triggers with enough food on the map at once; below the
/// threshold an already-chosen goal is still pursued but no new one is set.
fn select_goal(world: &World, you: &Snake, goal: &mut FoodGoal, config: &Config) {
    let food = world.food();
    if food.len() < config.goal.min_food_for_goal {
        return;
    }

    let head = you.head();
    let mut best: Option<(i32, Coordinate)> = None;
    for &tile in food {
        let distance = head.manhattan_distance_to(tile);
        if best.map_or(true, |(best_distance, _)| distance < best_distance) {
            best = Some((distance, tile));
        }
    }

    if let Some((_, tile)) = best {
        goal.set(tile);
    }
}

fn survivable(world: &World, you: &Snake, direction: Direction) -> bool {
    world.survivable(&you.id, direction).unwrap_or(false)
}
