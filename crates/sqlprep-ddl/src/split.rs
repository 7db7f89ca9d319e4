//! Schema / seed data split

/// A DDL file cut at the first seed marker
///
/// `schema` and `seed` borrow from the input and concatenate back to it
/// exactly; `seed` starts with the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSplit<'a> {
    /// Everything before the marker
    pub schema: &'a str,

    /// The marker and everything after it
    pub seed: &'a str,
}

impl<'a> SeedSplit<'a> {
    /// Contents written back to the DDL file
    pub fn schema_file_contents(&self) -> String {
        format!("{}\n", self.schema.trim())
    }

    /// Contents written to the seed file
    ///
    /// The marker is trimmed together with the rest, so the space after
    /// `INSERT INTO ce_config` is kept rather than glued to the column list.
    pub fn seed_file_contents(&self) -> String {
        format!("{}\n", self.seed.trim())
    }
}

/// Split at the first occurrence of `marker`
///
/// Returns `None` when the marker does not occur or is empty.
pub fn split_seed<'a>(sql: &'a str, marker: &str) -> Option<SeedSplit<'a>> {
    if marker.is_empty() {
        return None;
    }

    let at = sql.find(marker)?;
    let (schema, seed) = sql.split_at(at);
    Some(SeedSplit { schema, seed })
}
