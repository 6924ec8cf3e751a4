//! Marble Race entry point
//!
//! Headless native driver: loads settings (first CLI argument, optional),
//! runs one race until a ball finishes or the tick limit is hit, and prints
//! the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use marble_race::renderer::VertexBatch;
    use marble_race::{PhysicsEngine, Settings};

    env_logger::init();
    log::info!("Marble Race (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let mut engine = PhysicsEngine::from_settings(&settings);
    engine.spawn_balls(settings.ball_count, settings.ball_radius);
    log::info!(
        "{} course with {} obstacles, {} balls",
        engine.mode(),
        engine.obstacles().len(),
        engine.balls().len()
    );

    let mut batch = VertexBatch::new();
    while !engine.is_finished() && engine.frame_count() < settings.tick_limit {
        engine.update();

        // Exercise the draw pass once a second of race time
        if engine.frame_count() % 60 == 0 {
            batch.clear();
            engine.draw(&mut batch);
            log::debug!(
                "frame {}: camera {:.0}, {} triangles",
                engine.frame_count(),
                engine.camera_y(),
                batch.triangle_count()
            );
        }
    }

    match engine.goal_ball() {
        Some(ball) => println!(
            "Winner: ball {} after {} frames",
            ball.number,
            engine.frame_count()
        ),
        None => {
            log::warn!("No ball finished within {} frames", settings.tick_limit);
            println!("No winner after {} frames", engine.frame_count());
        }
    }

    println!("\nOrder:");
    let order = engine.standings().provisional(engine.balls());
    for (place, number) in order.iter().enumerate() {
        let status = match engine.standings().rank_of(*number) {
            Some(_) => "finished",
            None => "racing",
        };
        println!("  {:>2}. ball {:>2} ({})", place + 1, number, status);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page on the web
}
