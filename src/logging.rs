use std::io::Write;

use chrono::Utc;
use colored::{Color, Colorize as _};
use env_logger::{Builder, Env, Target};
use log::Level;

/// Logs go to stderr so they never mix with the preview on stdout.
pub fn init() {
    let mut builder = Builder::new();

    builder.parse_env(get_env());
    builder.target(Target::Stderr);

    builder.format(|f, record| {
        let time = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string().dimmed();
        let color = color_by_level(record.level());
        let level = level_to_str(record.level()).color(color);
        let target = short_target(record.target()).dimmed();
        let message = record.args().to_string().color(color);

        writeln!(f, "{time} [{level}@{target}] {message}")
    });

    builder.init();
}

fn get_env() -> Env<'static> {
    let default_filter = if cfg!(debug_assertions) {
        "info,embed_editor=debug"
    } else {
        "warn,embed_editor=info"
    };
    Env::default().default_filter_or(default_filter)
}

/// `embed_editor::session` -> `session`
fn short_target(target: &str) -> &str {
    target
        .strip_prefix("embed_editor::")
        .unwrap_or(target)
}

const fn color_by_level(level: Level) -> Color {
    match level {
        Level::Trace => Color::Magenta,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

const fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::Trace => "T",
        Level::Debug => "D",
        Level::Info => "I",
        Level::Warn => "W",
        Level::Error => "E",
    }
}
