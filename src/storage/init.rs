//! First-run setup

use crate::config::paths::SharetabPaths;
use crate::config::settings::Settings;
use crate::error::SharetabError;

use super::expenses::ExpenseData;
use super::file_io::write_json_atomic;
use super::payments::PaymentData;
use super::trips::TripData;

/// Create the directory layout, default settings and empty data files
///
/// Existing files are left untouched, so running this twice is harmless.
/// Returns `true` if anything was created.
pub fn initialize_storage(paths: &SharetabPaths) -> Result<bool, SharetabError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }
    if !paths.trips_file().exists() {
        write_json_atomic(paths.trips_file(), &TripData::default())?;
        created = true;
    }
    if !paths.expenses_file().exists() {
        write_json_atomic(paths.expenses_file(), &ExpenseData::default())?;
        created = true;
    }
    if !paths.payments_file().exists() {
        write_json_atomic(paths.payments_file(), &PaymentData::default())?;
        created = true;
    }

    Ok(created)
}
