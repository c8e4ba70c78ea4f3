//! CLI command implementations.
//!
//! Each command renders its answer to a string; `main` prints it.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use portcullis::AccessControl;

/// List every declared role with its label.
pub fn cmd_roles(access: &AccessControl, json: bool) -> Result<String> {
    if json {
        #[derive(Serialize)]
        struct RoleRow<'a> {
            role: &'a str,
            label: String,
        }
        let rows: Vec<_> = access
            .roles()
            .iter()
            .map(|r| RoleRow {
                role: r.as_str(),
                label: r.human_name(),
            })
            .collect();
        return to_json(&rows);
    }

    if access.roles().is_empty() {
        return Ok("No roles declared.".to_string());
    }

    let mut out = String::new();
    writeln!(out, "{:<24} {}", "ROLE", "LABEL")?;
    writeln!(out, "{}", "-".repeat(48))?;
    for (role, label) in access.roles().iter().zip(access.human_roles()) {
        writeln!(out, "{:<24} {label}", role.as_str())?;
    }
    Ok(out.trim_end().to_string())
}

/// List the project modules (and their menus) available to a role.
pub fn cmd_modules(access: &AccessControl, role: &str, json: bool) -> Result<String> {
    let modules = access.project_modules(role);

    if json {
        return to_json(&modules);
    }

    if modules.is_empty() {
        return Ok(format!("No project modules for role '{role}'."));
    }

    let mut out = String::new();
    for module in modules {
        writeln!(
            out,
            "{} ({}) [{}]",
            module.human_name(),
            module.uid(),
            module.controllers().join(", ")
        )?;
        for menu in module.menus() {
            let destination = menu.controller().unwrap_or("url");
            writeln!(
                out,
                "  - {:<20} {:<20} {destination}",
                menu.human_name(),
                menu.uid()
            )?;
        }
    }
    Ok(out.trim_end().to_string())
}

/// List the controllers a role may access with the given modules selected.
pub fn cmd_controllers(
    access: &AccessControl,
    role: &str,
    modules: &[String],
    json: bool,
) -> Result<String> {
    let selected: Vec<&str> = modules.iter().map(String::as_str).collect();
    let controllers = access
        .allowed_controllers(role, &selected)
        .with_context(|| format!("cannot resolve controllers for role '{role}'"))?;

    if json {
        return to_json(&controllers);
    }
    Ok(controllers.join("\n"))
}

/// Summarize a loaded access map.
pub fn cmd_check(access: &AccessControl, path: &Path, json: bool) -> Result<String> {
    let module_count: usize = access
        .mappers()
        .iter()
        .map(|m| m.project_modules().len())
        .sum();
    let menu_count: usize = access
        .mappers()
        .iter()
        .flat_map(|m| m.project_modules())
        .map(|p| p.menus().len())
        .sum();

    if json {
        return to_json(&serde_json::json!({
            "path": path.display().to_string(),
            "mappers": access.mapper_count(),
            "roles": access.roles().len(),
            "project_modules": module_count,
            "menus": menu_count,
        }));
    }

    Ok(format!(
        "{}: OK ({} mappers, {} roles, {module_count} project modules, {menu_count} menus)",
        path.display(),
        access.mapper_count(),
        access.roles().len(),
    ))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
