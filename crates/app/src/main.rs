use std::env;
use std::path::Path;
use std::process;

use app::palette::{self, GRID_LINE, cell_color};
use app::seed::{generate_runtime_seed, parse_launch_args};
use app::settings_file::ViewerSettingsFile;
use app::viewer::{ViewerMode, ViewerState};
use app::{format_fingerprint, format_seed};
use dungeon_core::GeneratorConfig;
use macroquad::prelude::*;
use macroquad::window::Conf;

mod frame_input;
mod window_config;

const FONT_SIZE: f32 = 24.0;

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(2);
}

fn persist_settings(path: Option<&Path>, viewer: &ViewerState) {
    let Some(path) = path else {
        return;
    };
    let settings = ViewerSettingsFile::new(viewer.seed(), viewer.config().clone());
    if let Err(err) = settings.write_atomic(path) {
        log::warn!("could not save viewer settings to {}: {err}", path.display());
    }
}

fn draw_map(viewer: &ViewerState) {
    let canvas = viewer.canvas();
    let (width, height) = (canvas.width(), canvas.height());
    let (cell, origin_x, origin_y) =
        window_config::map_layout(screen_width(), screen_height(), width, height);

    draw_rectangle(origin_x, origin_y, cell * width as f32, cell * height as f32, GRID_LINE);
    let gap = if cell >= 4.0 { 1.0 } else { 0.0 };
    for (pos, state) in canvas.iter() {
        // Higher y is further up the screen.
        let x = origin_x + pos.x as f32 * cell;
        let y = origin_y + (height as i32 - 1 - pos.y) as f32 * cell;
        draw_rectangle(x, y, cell - gap, cell - gap, cell_color(state));
    }
}

fn draw_hud(viewer: &ViewerState) {
    let config = viewer.config();
    let (revealed, total) = viewer.progress();
    let mode = match viewer.mode {
        ViewerMode::Animating => "animating",
        ViewerMode::Paused => "paused",
        ViewerMode::Revealed => "done",
    };

    draw_text(
        &format!(
            "Seed {}  {}x{}  fill {:.0}%  walkers {}",
            format_seed(viewer.seed()),
            config.width,
            config.height,
            config.fill_percentage * 100.0,
            config.max_walkers
        ),
        16.0,
        28.0,
        FONT_SIZE,
        WHITE,
    );

    let status = match (viewer.outcome(), viewer.fingerprint()) {
        (Err(err), _) => format!("Stopped early: {err}"),
        (Ok(_), Some(fingerprint)) if viewer.mode == ViewerMode::Revealed => format!(
            "Painted {revealed}/{total}  fingerprint {}",
            format_fingerprint(fingerprint)
        ),
        (Ok(_), _) => format!("Painted {revealed}/{total}  ({mode})"),
    };
    let status_color = if viewer.outcome().is_err() { RED } else { LIGHTGRAY };
    draw_text(&status, 16.0, 54.0, FONT_SIZE, status_color);
    draw_text("R next seed   Space pause   Enter reveal all", 16.0, 80.0, FONT_SIZE, GRAY);

    let mut legend_x = screen_width() - 16.0;
    for (state, label) in palette::legend().iter().rev() {
        let label_w = measure_text(label, None, FONT_SIZE as u16, 1.0).width;
        legend_x -= label_w + 24.0;
        draw_rectangle(legend_x, 14.0, 16.0, 16.0, cell_color(*state));
        draw_text(label, legend_x + 20.0, 28.0, FONT_SIZE, LIGHTGRAY);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let launch = parse_launch_args(&args).unwrap_or_else(|err| exit_with(&err));

    let settings_path = ViewerSettingsFile::get_default_path();
    let saved = settings_path.as_deref().and_then(|path| {
        ViewerSettingsFile::load(path)
            .inspect_err(|err| {
                log::debug!("no saved viewer settings at {}: {err}", path.display());
            })
            .ok()
    });

    let config = match (&launch.config_path, &saved) {
        (Some(path), _) => GeneratorConfig::load(path).unwrap_or_else(|err| {
            exit_with(&format!("failed to read config file {}: {err}", path.display()))
        }),
        (None, Some(saved)) => saved.config.clone(),
        (None, None) => GeneratorConfig::default(),
    };
    let seed = launch.choose_seed(saved.map(|saved| saved.last_seed), generate_runtime_seed());
    log::info!("starting viewer with {seed:?}");

    let mut viewer = ViewerState::new(config, seed.value())
        .unwrap_or_else(|err| exit_with(&format!("invalid generator configuration: {err}")));
    persist_settings(settings_path.as_deref(), &viewer);

    loop {
        let keys_pressed = frame_input::capture_keys_pressed();
        viewer.tick(&keys_pressed);
        if viewer.regenerated {
            persist_settings(settings_path.as_deref(), &viewer);
        }

        clear_background(palette::BACKGROUND);
        draw_map(&viewer);
        draw_hud(&viewer);
        next_frame().await
    }
}
