use std::fs;
use std::str::FromStr;

use anyhow::Context as _;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use crate::config::Config;

pub fn parse_level(level: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(level).with_context(|| format!("unknown log level {:?}", level))
}

/// Colored output on stdout plus one plain log file per day under
/// `config.log_file_path`.
pub fn setup_logger(config: &Config) -> anyhow::Result<()> {
    let level = parse_level(&config.log_level)?;

    fs::create_dir_all(&config.log_file_path).with_context(|| {
        format!(
            "unable to create log directory {}",
            config.log_file_path.display()
        )
    })?;

    let colors_level = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Blue)
        .debug(Color::White)
        .trace(Color::Magenta);

    let mut log_file_prefix = config.log_file_path.clone();
    log_file_prefix.push("hello-graphql.");

    fern::Dispatch::new()
        .level(level)
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{}][{}][{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.target(),
                        colors_level.color(record.level()),
                        message
                    ))
                })
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{}][{}][{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.target(),
                        record.level(),
                        message
                    ))
                })
                .chain(fern::DateBased::new(log_file_prefix, "%Y-%m-%d.log")),
        )
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }
}
