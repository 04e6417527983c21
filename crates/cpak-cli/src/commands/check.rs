//! Handler for `cpak check`.

use std::path::Path;

use miette::Result;

use cpak_util::errors::CpakError;
use cpak_util::progress;

use crate::commands::resolve_project;

pub fn exec(registry: &Path, manifest: &Path) -> Result<()> {
    let scope = resolve_project(registry, manifest)?;

    let failed = scope.unresolvable_references();
    if !failed.is_empty() {
        let lines: Vec<String> = failed
            .iter()
            .map(|name| {
                let reason = scope
                    .unresolvable_reason(name)
                    .map(|r| r.to_string())
                    .unwrap_or_default();
                format!("{name} ({reason})")
            })
            .collect();
        return Err(CpakError::Resolution {
            message: format!(
                "{} reference(s) could not be resolved:\n  {}",
                lines.len(),
                lines.join("\n  ")
            ),
        }
        .into());
    }

    let order = scope.resolutions()?;
    let plural = if order.len() == 1 { "" } else { "s" };
    progress::status(
        "Checked",
        &format!("{} package{plural} resolve cleanly", order.len()),
    );
    Ok(())
}
