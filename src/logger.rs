use anyhow::{anyhow, bail, Result};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::{Arc, RwLock};

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

static HANDLE: Lazy<Arc<RwLock<Option<Handle>>>> = Lazy::new(|| Arc::new(RwLock::new(None)));

const PATTERN: &str = "[{d(%Y-%m-%dT%H:%M:%S.%fZ)(utc)} {h({l:5.5})} {M}] {m}{n}";
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)(utc)} {l:5.5} {m}{n}";

fn parse_level(level: &str) -> Result<LevelFilter> {
    match level {
        "off" => Ok(LevelFilter::Off),
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        _ => bail!("invalid level `{level}`"),
    }
}

fn parse_filter(filter: &str) -> Result<(LevelFilter, Vec<(&str, LevelFilter)>)> {
    let mut root_level: LevelFilter = LevelFilter::Off;
    let mut pairs: Vec<(&str, LevelFilter)> = Vec::new();

    if filter.is_empty() {
        return Ok((root_level, pairs));
    }

    for (index, word) in filter.split(',').enumerate() {
        if !word.contains('=') {
            if index == 0 {
                root_level = parse_level(word)?;
                continue;
            } else {
                bail!("invalid filter: `{word}` has no `=` but is not the first word");
            }
        }

        let word_split: Vec<&str> = word.split('=').collect();
        if word_split.len() == 2 {
            let name = word_split[0];
            let level = parse_level(word_split[1])?;
            pairs.push((name, level));
        } else {
            bail!("invalid filter: `{word}` contains multiple `=`");
        }
    }

    Ok((root_level, pairs))
}

fn set_config(config: Config) -> Result<()> {
    let mut guard = HANDLE
        .write()
        .map_err(|_| anyhow!("logger handle poisoned"))?;
    if let Some(handle) = guard.as_ref() {
        handle.set_config(config);
    } else {
        *guard = Some(log4rs::init_config(config)?);
    }
    Ok(())
}

/// Console logging, mirrored to `log_file` when given.
pub fn setup(filter: &str, log_file: Option<&Path>) -> Result<()> {
    let (root_level, pairs) = parse_filter(filter)?;

    let console_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let mut builder = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)));
    let mut root = Root::builder().appender("console");

    if let Some(path) = log_file {
        let file_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
    }

    for (name, level) in pairs {
        builder = builder.logger(Logger::builder().build(name, level));
    }

    let config = builder
        .build(root.build(root_level))
        .map_err(|e| anyhow!("invalid logger config: {e}"))?;

    set_config(config)
}
