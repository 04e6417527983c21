//! Handler for `cpak resolve`.

use std::path::Path;

use miette::Result;

use cpak_resolver::scope::ResolutionScope;
use cpak_util::errors::CpakError;
use cpak_util::progress;

use crate::cli::OutputFormat;
use crate::commands::resolve_project;

pub fn exec(registry: &Path, manifest: &Path, format: OutputFormat) -> Result<()> {
    let scope = resolve_project(registry, manifest)?;
    let order = scope.resolutions()?;

    match format {
        OutputFormat::Text => print_text(&scope, &order),
        OutputFormat::Json => print_json(&scope, &order)?,
    }
    Ok(())
}

fn print_text(scope: &ResolutionScope, order: &[String]) {
    let plural = if order.len() == 1 { "" } else { "s" };
    progress::status("Resolved", &format!("{} package{plural}", order.len()));

    for key in order {
        if let Some(resolved) = scope.resolution(key) {
            println!("{}", resolved.coordinate);
        }
    }

    if !scope.unification_winners().is_empty() {
        println!();
        print!("{}", scope.unification());
    }

    for name in scope.unresolvable_references() {
        let reason = scope
            .unresolvable_reason(&name)
            .map(|r| r.to_string())
            .unwrap_or_default();
        progress::status_warn("Unresolved", &format!("{name} ({reason})"));
    }
}

fn print_json(scope: &ResolutionScope, order: &[String]) -> Result<()> {
    let packages: Vec<serde_json::Value> = order
        .iter()
        .filter_map(|key| scope.resolution(key))
        .map(|resolved| {
            serde_json::json!({
                "group": resolved.manifest.package.group,
                "name": resolved.manifest.package.name,
                "version": resolved.manifest.package.version,
                "coordinate": resolved.coordinate.to_string(),
            })
        })
        .collect();

    let overrides: Vec<serde_json::Value> = scope
        .unification_winners()
        .iter()
        .map(|winner| {
            let superseded: Vec<String> = scope
                .unification()
                .losses_of(winner)
                .iter()
                .map(|loser| loser.to_string())
                .collect();
            serde_json::json!({
                "winner": winner.to_string(),
                "superseded": superseded,
            })
        })
        .collect();

    let unresolvable: serde_json::Map<String, serde_json::Value> = scope
        .unresolvable_references()
        .into_iter()
        .map(|name| {
            let reason = serde_json::json!(scope.unresolvable_reason(&name));
            (name, reason)
        })
        .collect();

    let report = serde_json::json!({
        "order": packages,
        "overrides": overrides,
        "unresolvable": unresolvable,
    });
    let rendered = serde_json::to_string_pretty(&report).map_err(|e| CpakError::Internal {
        message: format!("Failed to serialize report: {e}"),
    })?;
    println!("{rendered}");
    Ok(())
}
