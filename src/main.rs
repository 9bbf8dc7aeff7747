//! Hotdog Vendor entry point
//!
//! On the web the page's game engine drives `platform::web::WasmSession`.
//! Natively this runs a headless autopilot session and logs what happens.
//!
//! Usage: hotdog-vendor [seed] [seconds] [tuning.json]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hotdog_vendor::HighScores;
    use hotdog_vendor::sim::{LogPresentation, Session, SessionEvent, TickInput, tick};
    use hotdog_vendor::tuning::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(12345);
    let seconds: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(120);
    let tuning = match args.get(3) {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    log::info!("Hotdog Vendor (native) - autopilot for {}s, seed {}", seconds, seed);

    // 60 Hz frames
    const FRAME_MS: u64 = 16;
    let mut session = Session::new(tuning, seed, 0);
    let mut presentation = LogPresentation;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut deliveries = 0u32;
    let mut mis_throws = 0u32;
    let mut now = 0;
    while now < seconds * 1000 && !session.is_game_over() {
        now += FRAME_MS;
        tick(&mut session, &input, now);
        for event in session.drain_events() {
            match event {
                SessionEvent::DeliverySucceeded { .. } => deliveries += 1,
                SessionEvent::MisThrow { .. } => mis_throws += 1,
                _ => {}
            }
            event.dispatch(&mut presentation);
        }
    }

    println!("\nRun summary");
    println!("  time:       {:.1}s", now as f64 / 1000.0);
    println!("  score:      {}", session.score());
    println!("  lives:      {}", session.lives());
    println!("  set:        {}", session.set_number());
    println!("  hotdogs:    {}", session.ammo());
    println!("  deliveries: {}", deliveries);
    println!("  mis-throws: {}", mis_throws);
    println!("  game over:  {}", session.is_game_over());

    let mut high_scores = HighScores::load();
    if let Some(rank) = high_scores.record_session(&session, now as f64) {
        println!("  leaderboard rank: {}", rank);
        high_scores.save();
    }
    match high_scores.top_score() {
        Some(best) => println!("  best score: {}", best),
        None => println!("  best score: none yet"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
