use serde::{Deserialize, Serialize};

/// A run of placeholders with a shared prefix and consecutive numeric
/// suffixes (`$1..$13`), offered to the editor as a merge candidate.
///
/// Computed from the placeholder list every time the editor opens and never
/// persisted; accepting it rewrites the affected field definitions instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeableGroup {
    /// Range signature such as `"$1-$13"`, stored as the merged field's `mergePattern`.
    pub pattern: String,
    pub prefix: String,
    pub start_num: u64,
    pub end_num: u64,
    /// Member placeholders in numeric order.
    pub fields: Vec<String>,
    pub suggested_label: String,
    pub suggested_separator: String,
}

impl MergeableGroup {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
