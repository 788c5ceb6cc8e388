//! Console logging through log4rs.
//!
//! The level comes from `EPI_LOG` (`error` … `trace`); default `info`.

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}";

pub fn init() -> Result<()> {
    let level = match std::env::var("EPI_LOG") {
        Ok(s) => s.parse::<LevelFilter>().with_context(|| format!("EPI_LOG={s}"))?,
        Err(_) => LevelFilter::Info,
    };

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
