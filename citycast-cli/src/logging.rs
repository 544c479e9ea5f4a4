use std::fs::{self, OpenOptions};

use anyhow::Context;
use citycast_core::Config;
use env_logger::{Builder, Env, Target};

const DEFAULT_FILTER: &str = "citycast=info,citycast_core=info";

fn builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
}

/// Log to stderr; used by the one-shot commands.
pub fn init_to_stderr() {
    let _ = builder().target(Target::Stderr).try_init();
}

/// Log to `citycast.log` in the data dir so output does not land on the UI.
pub fn init_to_file() -> anyhow::Result<()> {
    let dir = Config::project_dirs()?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let path = dir.join("citycast.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let _ = builder().target(Target::Pipe(Box::new(file))).try_init();
    log::info!("logging to {}", path.display());
    Ok(())
}
