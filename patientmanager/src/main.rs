use anyhow::Result;
use flatbit::settings::DEFAULT_SETTINGS_PATH;
use flatbit::{Registry, Settings};
use patientmanager::console::Console;
use std::io;

fn main() -> Result<()> {
    let settings_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&settings_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), settings.max_input_attempts);
    let mut registry = Registry::new(settings);
    patientmanager::run(&mut console, &mut registry)?;
    Ok(())
}
