use macroquad::prelude::*;
use simplelog::{ConfigBuilder, LevelFilter, SimpleLogger};
use tiled_gamemap::{MacroquadGraphics, Map, TileSprite, Viewport};

const SPEED: f32 = 0.2; // tiles per frame

fn window_conf() -> Conf {
    Conf {
        window_title: "Basic Map".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// Frees the previous map (if any) and loads `path` again.
fn reload(
    map: Option<Map<TileSprite>>,
    path: &str,
    gfx: &mut MacroquadGraphics,
) -> (Option<Map<TileSprite>>, String) {
    if let Some(old) = map {
        old.free(gfx);
    }
    match Map::load(path, gfx) {
        Ok(m) => {
            log::debug!("\n{}", m.summary());
            (Some(m), String::new())
        }
        Err(e) => (None, e.to_string()),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let _ = SimpleLogger::init(
        LevelFilter::Debug,
        ConfigBuilder::new().set_time_level(LevelFilter::Off).build(),
    );

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/map.json".to_owned());

    let mut gfx = MacroquadGraphics::new();
    let (mut map, mut err) = reload(None, &path, &mut gfx);
    let (mut mx, mut my) = (0.0f32, 0.0f32);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::R) {
            (map, err) = reload(map.take(), &path, &mut gfx);
        }
        if is_key_down(KeyCode::Down) {
            my += SPEED;
        }
        if is_key_down(KeyCode::Up) {
            my -= SPEED;
        }
        if is_key_down(KeyCode::Left) {
            mx -= SPEED;
        }
        if is_key_down(KeyCode::Right) {
            mx += SPEED;
        }

        clear_background(BLACK);

        let viewport = Viewport::new(screen_width() as i32, screen_height() as i32);
        if let Some(m) = &map {
            m.draw(&mut gfx, mx, my, viewport);
        } else {
            for (i, line) in err.lines().enumerate() {
                draw_text(line, 32.0, 64.0 + i as f32 * 16.0, 16.0, WHITE);
            }
        }

        draw_text(
            "[R] reload map   arrows: move",
            10.0,
            screen_height() - 20.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!("FPS: {}  pos ({mx:.1}, {my:.1})", get_fps()),
            screen_width() - 300.0,
            30.0,
            20.0,
            RED,
        );

        next_frame().await;
    }

    if let Some(m) = map {
        m.free(&mut gfx);
    }
}
