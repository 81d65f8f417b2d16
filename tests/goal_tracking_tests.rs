// Multi-tick food goal behavior, driven through the engine entry point
// with explicitly threaded goal state, plus the replay engine's goal
// threading across logged ticks.

use slither_bot::config::Config;
use slither_bot::engine::{next_move, FoodGoal};
use slither_bot::replay::{LogEntry, ReplayEngine};
use slither_bot::types::{Coordinate, Direction, MapWire, Snake, SnakeInfoWire};
use slither_bot::world::World;

fn snake_at(x: i32, y: i32, direction: Direction) -> Snake {
    Snake {
        id: "me".to_string(),
        name: "me".to_string(),
        points: 0,
        positions: vec![Coordinate { x, y }],
        direction,
    }
}

fn world_with_food(you: &Snake, food: Vec<Coordinate>) -> World {
    World::new(10, 10, 0, vec![you.clone()], food, vec![])
}

#[test]
fn test_goal_persists_across_ticks_until_reached() {
    let config = Config::default_hardcoded();
    let mut goal = FoodGoal::new();

    let you = snake_at(5, 5, Direction::Right);
    let food = vec![
        Coordinate { x: 7, y: 5 },
        Coordinate { x: 0, y: 0 },
        Coordinate { x: 0, y: 9 },
    ];

    // Tick 1: goal locks in, snake keeps going straight
    let world = world_with_food(&you, food.clone());
    assert_eq!(next_move(&world, &you, &mut goal, &config), Direction::Right);
    assert_eq!(goal.target(), Some(Coordinate { x: 7, y: 5 }));

    // Tick 2: one step closer, goal unchanged
    let you = snake_at(6, 5, Direction::Right);
    let world = world_with_food(&you, food.clone());
    assert_eq!(next_move(&world, &you, &mut goal, &config), Direction::Right);
    assert_eq!(goal.target(), Some(Coordinate { x: 7, y: 5 }));

    // Tick 3: standing on the goal tile (food consumed this tick), goal
    // clears; two remaining foods are below the selection threshold
    let you = snake_at(7, 5, Direction::Right);
    let world = world_with_food(
        &you,
        vec![Coordinate { x: 0, y: 0 }, Coordinate { x: 0, y: 9 }],
    );
    next_move(&world, &you, &mut goal, &config);
    assert_eq!(goal.target(), None);
}

#[test]
fn test_existing_goal_pursued_below_threshold() {
    let config = Config::default_hardcoded();
    let mut goal = FoodGoal::new();
    goal.set(Coordinate { x: 5, y: 2 });

    // Only one food tile on the map, but the goal predates the shortage
    let you = snake_at(5, 5, Direction::Up);
    let world = world_with_food(&you, vec![Coordinate { x: 5, y: 2 }]);

    assert_eq!(next_move(&world, &you, &mut goal, &config), Direction::Up);
    assert_eq!(goal.target(), Some(Coordinate { x: 5, y: 2 }));
}

#[test]
fn test_goal_steering_defers_to_avoidance() {
    let config = Config::default_hardcoded();
    let mut goal = FoodGoal::new();
    goal.set(Coordinate { x: 9, y: 5 });

    // The food direction (Right) would step into an enemy body; the
    // correction from avoidance wins
    let you = Snake {
        id: "me".to_string(),
        name: "me".to_string(),
        points: 0,
        positions: vec![Coordinate { x: 5, y: 5 }, Coordinate { x: 5, y: 4 }],
        direction: Direction::Down,
    };
    let enemy = Snake {
        id: "enemy".to_string(),
        name: "enemy".to_string(),
        points: 0,
        positions: vec![
            Coordinate { x: 6, y: 4 },
            Coordinate { x: 6, y: 5 },
            Coordinate { x: 6, y: 6 },
        ],
        direction: Direction::Up,
    };
    let world = World::new(
        10,
        10,
        0,
        vec![you.clone(), enemy],
        vec![Coordinate { x: 9, y: 5 }],
        vec![],
    );

    let chosen = next_move(&world, &you, &mut goal, &config);
    assert_ne!(chosen, Direction::Right);
}

#[test]
fn test_replay_threads_goal_across_entries() {
    let config = Config::default_hardcoded();

    // Two consecutive logged ticks. On the first the goal (5,8) locks in
    // while the snake continues straight; on the second the carried goal
    // pulls the snake off its heading. A replay starting tick 2 from a
    // fresh goal would continue straight instead, so the second entry only
    // matches because the goal threads across entries.
    let food = vec![
        Coordinate { x: 5, y: 8 }.to_index(10),
        Coordinate { x: 0, y: 0 }.to_index(10),
        Coordinate { x: 9, y: 9 }.to_index(10),
    ];

    let entry = |tick: u32, head: i32, neck: i32, chosen: &str| LogEntry {
        game_tick: tick,
        receiving_player_id: "me".to_string(),
        chosen_direction: chosen.to_string(),
        map: MapWire {
            width: 10,
            height: 10,
            world_tick: tick,
            snake_infos: vec![SnakeInfoWire {
                id: "me".to_string(),
                name: "me".to_string(),
                points: 0,
                positions: vec![head, neck],
            }],
            food_positions: food.clone(),
            obstacle_positions: vec![],
        },
        timestamp: "2025-01-01T00:00:00Z".to_string(),
    };

    let entries = vec![
        entry(
            1,
            Coordinate { x: 5, y: 5 }.to_index(10),
            Coordinate { x: 4, y: 5 }.to_index(10),
            "RIGHT",
        ),
        // Goal (5,8) sits left of the new head (6,5); the raw food
        // direction (Left) would reverse into the neck, so avoidance
        // corrects it to Down
        entry(
            2,
            Coordinate { x: 6, y: 5 }.to_index(10),
            Coordinate { x: 5, y: 5 }.to_index(10),
            "DOWN",
        ),
    ];

    let engine = ReplayEngine::new(config, false);
    let results = engine.replay_all(&entries).expect("replay succeeds");

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.matches), "{:?}", results);
}
