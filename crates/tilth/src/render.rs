//! Plain-text frames of the field.
//!
//! Glyphs: `D` drone, `B` base, `T` obstacle, `.` empty, `s` seed,
//! `g` growing, `F` ready.

use tilth_core::Position;
use tilth_engine::Environment;
use tilth_space::Field;

/// The field as newline-terminated rows, drone drawn over its tile.
pub fn render_field(field: &Field) -> String {
    let width = field.width() as usize;
    let mut out = String::with_capacity((width + 1) * field.height() as usize);
    let drone = field.drone();
    for (pos, tile) in field.iter() {
        out.push(if pos == drone {
            'D'
        } else {
            tile.terrain().symbol()
        });
        if pos.x as usize + 1 == width {
            out.push('\n');
        }
    }
    out
}

/// One status line followed by the field.
pub fn render_frame(env: &Environment) -> String {
    let m = env.metrics();
    let limit = env
        .config()
        .max_turns
        .map_or_else(|| "∞".to_string(), |max| max.to_string());
    let Position { x, y } = env.field().drone();
    let mut out = format!(
        "turn {}/{limit}  drone ({x},{y})  grown {}  coverage {}/{}\n",
        m.turns, m.ready_tiles, m.coverage, m.farmable_tiles
    );
    out.push_str(&render_field(env.field()));
    out
}
