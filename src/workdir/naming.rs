//! Branch naming and item-name validation.

use crate::error::{GroveError, Result};

/// Derive the local branch name for an item.
///
/// Format: `{prefix}-{item}`, e.g. `grove-6.1`. Deterministic, so add and
/// remove agree on the name without persisted state.
pub fn local_branch_name(prefix: &str, item: &str) -> String {
    format!("{prefix}-{item}")
}

/// Validate an item name before it is used as a remote name, branch
/// component, and directory name.
pub fn validate_item(item: &str) -> Result<()> {
    if item.is_empty() {
        return Err(GroveError::UserError("item name is empty".to_string()));
    }
    if item.starts_with('-') {
        return Err(GroveError::UserError(format!(
            "item name '{item}' must not start with '-'"
        )));
    }
    if !item
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(GroveError::UserError(format!(
            "item name '{item}' may only contain letters, digits, '.', '_' and '-'"
        )));
    }
    Ok(())
}
