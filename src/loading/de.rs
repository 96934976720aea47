use std::fs::File;
use std::path::Path;

use serde::Deserialize;

/// Reads a whole CSV table into typed rows.
///
/// Rows that fail to deserialize are skipped rather than failing the load;
/// structural problems they cause (a segment referencing a skipped station)
/// surface in the integrity checks afterwards.
pub(super) fn deserialize_table<T>(path: &Path) -> Result<Vec<T>, std::io::Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;

    let mut skipped = 0usize;
    let rows = csv::Reader::from_reader(file)
        .deserialize()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        log::warn!(
            "Skipped {} malformed rows in '{}'",
            skipped,
            path.display()
        );
    }
    Ok(rows)
}

/// The topology pipeline writes the `endpoint` column as Python booleans
/// (`True`/`False`); accept those alongside the usual encodings.
pub(super) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "1" | "true" | "True" | "TRUE" => Ok(true),
        "" | "0" | "false" | "False" | "FALSE" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean flag: {other:?}"
        ))),
    }
}
