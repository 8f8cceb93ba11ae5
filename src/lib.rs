// Library exports for the A* snake engine
// This allows the replay tool and integration tests to use the core logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod game;
pub mod pathfinding;
pub mod replay;
pub mod safety;
pub mod simple_profiler;
pub mod tail_chase;
pub mod types;
