use clap::Parser;

mod app;
mod args;
mod config;
mod loader;
mod math;
mod render;
mod resources;

use app::App;
use args::Args;
use config::Settings;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let settings = match Settings::resolve(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let app = match App::new(settings) {
        Ok(app) => app,
        Err(e) => {
            log::error!("cannot start renderer: {e}");
            std::process::exit(1);
        }
    };

    app.run();
}
