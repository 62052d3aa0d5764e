/*
 * Hunger
 *
 * Steer a growing trail around a bowl and eat whatever lands on it. Running
 * into your own trail ends the round.
 *
 * Controls: Left/Right (or A/D) turn, R restarts, Escape quits. An optional
 * JSON config path can be passed as the first argument.
 */

use hunger::app;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_tracing();

    nannou::app(app::model)
        .update(app::update)
        .run();
}
