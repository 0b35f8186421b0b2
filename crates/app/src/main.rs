mod frame_input;
mod render;
mod window_config;

use clap::Parser;
use macroquad::prelude::{get_frame_time, next_frame, screen_width};
use macroquad::window::Conf;
use maze_app::{
    app_loop::AppState,
    seed::{ViewerArgs, fresh_session_seed},
    settings_file::ViewSettingsFile,
};
use maze_core::MazeConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::frame_input::capture_frame_input;
use crate::render::draw_frame;
use crate::window_config::{build_window_conf, column_count};

fn window_conf() -> Conf {
    build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = match ViewerArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };
    let seed = args.first_seed(fresh_session_seed).value();

    let settings_path = ViewSettingsFile::get_default_path();
    let settings = settings_path
        .as_deref()
        .and_then(|path| ViewSettingsFile::load(path).ok())
        .unwrap_or_default();

    let mut app = match AppState::new(
        MazeConfig::default(),
        seed,
        settings,
        column_count(screen_width()),
    ) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("invalid maze configuration: {err}");
            return;
        }
    };
    info!(target: "maze::session", seed, "viewer started");

    loop {
        let input = capture_frame_input();
        if input.quit {
            break;
        }
        app.resize_columns(column_count(screen_width()));

        let outcome = app.tick(&input.keys_held, &input.keys_pressed, f64::from(get_frame_time()));
        if outcome.new_session_requested {
            app.start_session(fresh_session_seed());
        }
        if outcome.settings_changed
            && let Some(path) = settings_path.as_deref()
            && let Err(err) = app.settings.write_atomic(path)
        {
            warn!(path = %path.display(), error = %err, "failed to save view settings");
        }

        draw_frame(&app);
        next_frame().await
    }
}
