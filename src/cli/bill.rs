//! Standalone bill calculation
//!
//! `sharetab bill dinner.json` prints what each person owes for one bill
//! without recording anything. The same file format feeds
//! `sharetab expense add-items`.

use std::path::Path;

use serde::Deserialize;

use crate::config::Settings;
use crate::display::format_bill;
use crate::error::{SharetabError, SharetabResult};
use crate::models::{ExtraCharges, Item};
use crate::services::calculate_single_bill;

/// An itemized bill read from a JSON file
///
/// ```json
/// {
///   "description": "Dinner",
///   "items": [
///     {"description": "Pizza", "unitPrice": 12.5, "quantity": 2,
///      "paidBy": "ann", "consumers": ["ann", "bo"]}
///   ],
///   "tax": 2.5, "serviceCharge": 1.25, "totalDiscount": 0
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BillFile {
    #[serde(default)]
    pub description: String,
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub extras: ExtraCharges,
}

impl BillFile {
    /// Read and parse a bill file
    pub fn load(path: &Path) -> SharetabResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SharetabError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            SharetabError::Json(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Handle `sharetab bill`
pub fn handle_bill_command(path: &Path, json: bool, settings: &Settings) -> SharetabResult<()> {
    let bill = BillFile::load(path)?;
    let calculation = calculate_single_bill(&bill.items, &bill.extras)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&calculation)?);
    } else {
        if !bill.description.is_empty() {
            println!("{}\n", bill.description);
        }
        print!("{}", format_bill(&calculation, settings));
    }

    Ok(())
}
