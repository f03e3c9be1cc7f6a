// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context, Result};
use hearth_core::command::QUIT_COMMAND;
use hearth_core::lifecycle::NoHooks;
use hearth_core::SystemConfig;
use hearth_platform::{fs, now_milliseconds, sleep_nanoseconds, System};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "hearth.toml";
const FRAME_NANOS: u64 = 16_000_000;

fn load_config() -> Result<SystemConfig> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    if !fs::is_file(&path) {
        log::info!("No configuration at '{}', using defaults", path.display());
        return Ok(SystemConfig::default());
    }
    SystemConfig::from_file(&path)
        .with_context(|| format!("loading configuration from '{}'", path.display()))
}

fn list_configs(system: &mut System<NoHooks>) {
    let mut next = system.find_first("./*.toml");
    while let Some(path) = next {
        log::info!("Found config file: {}", path.display());
        next = system.find_next();
    }
    system.find_close();
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut system = System::new(config, NoHooks);
    system.init().context("installing platform signal handlers")?;

    if let Some(home) = system.home_dir() {
        log::info!("Home directory: {}", home.display());
    }
    list_configs(&mut system);

    let start = now_milliseconds();
    log::info!("Running. Press Ctrl+C to quit.");

    loop {
        if let Some(line) = system.console_input() {
            system.commands().add_text(line);
        }

        let commands = system.commands().drain();
        for command in commands {
            if command == QUIT_COMMAND {
                log::info!("Quit after {} ms", now_milliseconds() - start);
                system.quit();
            }
            system.console_output(&format!("] {command}\n"));
        }

        sleep_nanoseconds(FRAME_NANOS);
    }
}
