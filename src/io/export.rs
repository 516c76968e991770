//! Ledger export to disk

use crate::core::Ledger;
use crate::io::csv_format::write_ledger_csv;
use crate::types::LibraryError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Write the whole ledger to a CSV file, replacing any existing file
pub fn export_ledger(path: &Path, ledger: &Ledger) -> Result<(), LibraryError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_ledger_csv(ledger.transactions(), &mut file)?;

    info!(path = %path.display(), entries = ledger.len(), "Ledger exported");
    Ok(())
}
