//! Plays a game of chess between two players at a terminal.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::io::{stdin, stdout};
use std::path::PathBuf;
use clap::{App, Arg, crate_version};
use log::info;
use simplelog::{WriteLogger, LevelFilter, Config};
use arbiter::config::{self, Settings, ConfigError};
use arbiter::protocol::Session;

fn main() -> Result<(), Error> {
    let matches =
        App::new("Arbiter")
            .version(crate_version!())
            .about("Referees a game of chess between two players typing moves such as e2e4.")
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .value_name("FILE")
                .takes_value(true)
                .help("Reads settings from FILE instead of ~/.arbiter/config.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .value_name("LOG_FILE")
                .takes_value(true)
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on"))
            .get_matches();

    let config_path = matches.value_of_os("config")
        .map(PathBuf::from)
        .unwrap_or_else(config::default_path);
    let mut settings = Settings::load(&config_path)?;

    if matches.is_present("log") {
        settings.log.enabled = true;
    }
    if let Some(file) = matches.value_of_os("log-file") {
        settings.log.file = PathBuf::from(file);
    }
    if let Some(level) = matches.value_of("log-level") {
        settings.log.level = level.to_string();
    }

    let log_level = settings.log.level_filter()?;
    let _logger = if settings.log.enabled {
        let log_file = &settings.log.file;
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };
    info!("settings from {}: {:?}", config_path.display(), settings);

    let stdin = stdin();
    let stdout = stdout();
    Session::new(stdin.lock(), stdout.lock(), settings.display).run()?;

    Ok(())
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(err.to_string())
    }
}
