use std::{
    fs::{self, File},
    time::{SystemTime, UNIX_EPOCH},
};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use minigames::Result;

/// Debug log to `logs/<unix-time>.log`. The terminal belongs to the games,
/// so nothing is logged there.
pub fn init() -> Result<()> {
    fs::create_dir_all("logs")?;
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let file = File::create(format!("logs/{}.log", time))?;
    WriteLogger::init(LevelFilter::Debug, config, file)?;
    Ok(())
}
