//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise create, save, list and load against a real save directory.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `chronicle_cli [save_dir] [log_level]`

use chronicle_core::{
    core_version, default_log_level, init_logging, standard_classes, CharacterService,
    JsonFileCharacterRepository, DEFAULT_SAVE_DIR,
};
use std::path::PathBuf;
use std::process::ExitCode;

const SMOKE_CHARACTER_NAME: &str = "Test";
const SMOKE_CHARACTER_CLASS: &str = "Warrior";

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let save_dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_SAVE_DIR.to_string()));
    let level = args.next().unwrap_or_else(|| default_log_level().to_string());

    match run(save_dir, &level) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(save_dir: PathBuf, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let save_dir = std::path::absolute(save_dir)?;
    let log_dir = save_dir.join("logs");
    init_logging(level, &log_dir.to_string_lossy())?;
    log::info!("event=cli_start module=cli status=ok version={}", core_version());

    let service = CharacterService::new(
        standard_classes(),
        JsonFileCharacterRepository::new(&save_dir),
    );

    let created = service.create_and_save(SMOKE_CHARACTER_NAME, SMOKE_CHARACTER_CLASS)?;
    println!("chronicle_core version={}", core_version());
    println!("saved={}", service.list()?.join(","));

    let loaded = service.load(&created.name)?;
    println!(
        "loaded name={} class={} level={} health={}/{} gold={}",
        loaded.name, loaded.class, loaded.level, loaded.health, loaded.max_health, loaded.gold
    );
    Ok(())
}
