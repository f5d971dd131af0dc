//! Settlement CLI command

use crate::config::Settings;
use crate::display::format_settlement_report;
use crate::error::SharetabResult;
use crate::services::SettlementService;
use crate::storage::Storage;

/// Handle `sharetab settle`
///
/// Recorded payments are applied unless disabled in settings or with
/// `--ignore-payments`.
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    code: &str,
    json: bool,
    ignore_payments: bool,
) -> SharetabResult<()> {
    let apply_payments = settings.apply_recorded_payments && !ignore_payments;
    let report = SettlementService::new(storage).calculate(code, apply_payments)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_settlement_report(&report, settings));
    }

    Ok(())
}
