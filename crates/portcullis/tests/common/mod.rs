#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common helpers for integration tests.
//!
//! Fixtures themselves live in `portcullis-test-utils`; these helpers only
//! flatten query results into plain values for assertions.

#![allow(dead_code)]

use portcullis::{AccessControl, ProjectModule};

pub use portcullis_test_utils::{
    SAMPLE_ACCESS_MAP_TOML, SAMPLE_ACCESS_MAP_YAML, access_map_file, back_office, css_class,
    register_back_office,
};

/// Names of the project modules available to `role`, in query order.
pub fn module_names(access: &AccessControl, role: &str) -> Vec<String> {
    access
        .project_modules(role)
        .iter()
        .map(|p| p.name().to_string())
        .collect()
}

/// Names of a module's menus, in display order.
pub fn menu_names(module: &ProjectModule) -> Vec<String> {
    module.menus().iter().map(|m| m.name().to_string()).collect()
}

/// Owned copy of `allowed_controllers`, panicking on error.
pub fn allowed(access: &AccessControl, role: &str, modules: &[&str]) -> Vec<String> {
    access
        .allowed_controllers(role, modules)
        .expect("allowed_controllers failed")
        .into_iter()
        .map(str::to_string)
        .collect()
}
