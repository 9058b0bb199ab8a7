//! Window configuration and cell layout for the desktop viewer.

use app::APP_NAME;
use macroquad::window::Conf;

const DEFAULT_WINDOW_WIDTH: i32 = 900;
const DEFAULT_WINDOW_HEIGHT: i32 = 760;
/// Space above the map reserved for the status lines.
pub const HUD_HEIGHT: f32 = 96.0;
const MARGIN: f32 = 16.0;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Linux desktop sessions may not scale low-DPI framebuffers automatically.
        high_dpi: true,
        ..Default::default()
    }
}

/// Square cell size and top-left origin that fit a `width` x `height` map
/// below the HUD, centred horizontally.
pub fn map_layout(screen_w: f32, screen_h: f32, width: usize, height: usize) -> (f32, f32, f32) {
    let avail_w = (screen_w - 2.0 * MARGIN).max(1.0);
    let avail_h = (screen_h - HUD_HEIGHT - MARGIN).max(1.0);
    let cell = (avail_w / width as f32).min(avail_h / height as f32).floor().max(1.0);
    let origin_x = ((screen_w - cell * width as f32) / 2.0).max(0.0);
    (cell, origin_x, HUD_HEIGHT)
}
