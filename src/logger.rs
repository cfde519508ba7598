use chrono::Local;
use env_logger::Builder;
use log::Level;
use std::io::{IsTerminal, Write};

use crate::config::LoggingConfig;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m\x1b[1m", // 红色
        Level::Warn => "\x1b[33m\x1b[1m",  // 黄色
        Level::Info => "\x1b[32m\x1b[1m",  // 绿色
        Level::Debug => "\x1b[36m\x1b[1m", // 青色
        Level::Trace => "\x1b[90m\x1b[1m", // 灰色
    }
}

/// `RUST_LOG` wins over the configured level.
pub fn init_logger(config: &LoggingConfig) {
    let use_color = config.color && std::io::stderr().is_terminal();

    let result = Builder::from_env(env_logger::Env::default().default_filter_or(config.level.as_str()))
        .format(move |buf, record| {
            let time = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let (color, reset) = if use_color {
                (level_color(record.level()), "\x1b[0m")
            } else {
                ("", "")
            };
            writeln!(
                buf,
                "{} {}{}{} [{}:{}] {}",
                time,
                color,
                record.level(),
                reset,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}
