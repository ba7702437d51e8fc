//! Screen result export — JSON and CSV artifact generation.
//!
//! Both formats carry the content-addressed screen id in the filename so
//! re-running an identical config overwrites its own artifacts. JSON
//! round-trips through `import_json`, which rejects artifacts written by
//! a newer schema.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::screen::{ScreenResult, SCHEMA_VERSION};

/// Serialize a `ScreenResult` to pretty JSON.
pub fn export_json(result: &ScreenResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize ScreenResult to JSON")
}

/// Deserialize a `ScreenResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ScreenResult> {
    let result: ScreenResult =
        serde_json::from_str(json).context("failed to deserialize ScreenResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

/// Export the matched listing as CSV.
///
/// Columns: id, name, score, min_deposit, eurusd_spread, max_leverage.
/// An unknown deposit floor is left as an empty field.
pub fn export_csv(result: &ScreenResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "name",
        "score",
        "min_deposit",
        "eurusd_spread",
        "max_leverage",
    ])
    .context("failed to write CSV header")?;

    for entry in &result.matched {
        wtr.write_record(&[
            entry.id.clone(),
            entry.name.clone(),
            entry.score.to_string(),
            entry.min_deposit.map(|d| d.to_string()).unwrap_or_default(),
            entry.eurusd_spread.to_string(),
            entry.max_leverage.to_string(),
        ])
        .context("failed to write CSV row")?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Write `screen-{id}.json` and `screen-{id}.csv` under `out_dir`.
///
/// Returns the written paths (json, csv).
pub fn save_artifacts(result: &ScreenResult, out_dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output dir {}", out_dir.display()))?;

    let json_path = out_dir.join(format!("screen-{}.json", result.screen_id));
    let csv_path = out_dir.join(format!("screen-{}.csv", result.screen_id));

    fs::write(&json_path, export_json(result)?)
        .with_context(|| format!("failed to write {}", json_path.display()))?;
    fs::write(&csv_path, export_csv(result)?)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    Ok((json_path, csv_path))
}
