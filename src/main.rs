// Headless autoplay runner
//
// Drives the engine tick by tick until the game ends or the tick cap is
// hit: decide, optionally record the tick, advance. Rendering and
// keyboard control are deliberately absent; this binary only consumes
// the engine's outputs (direction, path, score, terminal flags).

use log::{debug, info};
use std::env;
use std::process;
use std::time::Instant;

use ai_snake_rust::bot::Bot;
use ai_snake_rust::config::Config;
use ai_snake_rust::debug_logger::DebugLogger;
use ai_snake_rust::game::Game;
use ai_snake_rust::simple_profiler;

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment
    // variable is set, we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting AI snake run...");

    // Load configuration once at startup
    let config = Config::load_or_default();

    let mut game = match Game::from_config(&config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid board configuration: {}", e);
            process::exit(1);
        }
    };
    let bot = Bot::new(config.clone());
    let mut logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);

    info!(
        "Board {}x{}, snake length {}, food at {:?}",
        game.width(),
        game.height(),
        game.snake().len(),
        game.food()
    );

    let start = Instant::now();
    let mut tick: u64 = 0;

    while !game.game_over() {
        if config.run.max_ticks > 0 && tick >= config.run.max_ticks {
            info!("Tick cap {} reached, stopping run", config.run.max_ticks);
            break;
        }

        let snapshot = game.snapshot();
        let direction = bot.decide(&mut game);
        logger.log_tick(tick, &snapshot, direction);

        if game.show_path() {
            if let Some(path) = game.current_path() {
                debug!(
                    "Tick {}: {} along a {}-cell path",
                    tick,
                    direction.as_str(),
                    path.len()
                );
            }
        }

        let score_before = game.score();
        game.advance(direction);
        if game.score() > score_before {
            info!("Tick {}: food eaten, score {}", tick, game.score());
        }

        tick += 1;
    }

    let elapsed_ms = start.elapsed().as_millis() as u64;

    if game.win() {
        info!(
            "Board filled after {} ticks: you win! (score {})",
            tick,
            game.score()
        );
    } else if game.game_over() {
        info!("Game over after {} ticks (score {})", tick, game.score());
    } else {
        info!("Run stopped at tick {} (score {})", tick, game.score());
    }

    simple_profiler::merge_thread_local();
    simple_profiler::print_report(elapsed_ms);
}
