pub mod console;
pub mod controller;
pub mod error;
pub mod hash;
pub mod view;

pub use error::AppError;

use console::Console;
use controller::{LoginController, PatientController};
use flatbit::{info, Registry};
use std::io::{BufRead, Write};
use view::{LoginView, PatientView};

/// Login followed by the main menu. A store that fails to load is reported on the console and ends the session.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &mut Registry) -> Result<(), AppError> {
    let login = match LoginController::new(registry) {
        Ok(controller) => controller,
        Err(e) => return console.print_error(e),
    };
    if !LoginView::new(console, login).render()? {
        info!("Session ended without login");
        return Ok(());
    }
    let patients = match PatientController::new(registry) {
        Ok(controller) => controller,
        Err(e) => return console.print_error(e),
    };
    PatientView::new(console, patients).render()
}
