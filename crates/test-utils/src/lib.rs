//! Portcullis test utilities.
//!
//! Helpers for integration testing: sample access maps, fixture builders,
//! and temporary access map files.

use std::io::Write;

use portcullis::{AccessControl, AccessControlBuilder, MenuOptions, Route};
use tempfile::NamedTempFile;

/// The back-office sample map, as YAML.
pub const SAMPLE_ACCESS_MAP_YAML: &str = r#"
mappers:
  - require: [administrator, manager, customer]
    permissions: [backend/base]
    modules:
      - name: accounts
        controller: backend/accounts
        menus:
          - name: list
            target: { action: index }
            options: { class: icon-no-group }
          - name: new
            target: { action: new }
            options: { class: icon-new }
  - require: customer
    permissions: [frontend/cart]
    modules:
      - name: store
        controller: frontend/store
        menus:
          - name: add
            target: { cart: add }
            options: { class: icon-no-group }
          - name: list
            target: { cart: list }
            options: { class: icon-no-group }
"#;

/// The back-office sample map, as TOML.
pub const SAMPLE_ACCESS_MAP_TOML: &str = r#"
[[mappers]]
require = ["administrator", "manager", "customer"]
permissions = ["backend/base"]

[[mappers.modules]]
name = "accounts"
controller = "backend/accounts"

[[mappers.modules.menus]]
name = "list"
target = { action = "index" }
options = { class = "icon-no-group" }

[[mappers.modules.menus]]
name = "new"
target = { action = "new" }
options = { class = "icon-new" }

[[mappers]]
require = "customer"
permissions = ["frontend/cart"]

[[mappers.modules]]
name = "store"
controller = "frontend/store"

[[mappers.modules.menus]]
name = "add"
target = { cart = "add" }
options = { class = "icon-no-group" }

[[mappers.modules.menus]]
name = "list"
target = { cart = "list" }
options = { class = "icon-no-group" }
"#;

/// Menu options with a single CSS class.
pub fn css_class(class: &str) -> MenuOptions {
    [("class".to_string(), serde_json::json!(class))].into()
}

/// Register the back-office sample map into a builder.
///
/// Same content as [`SAMPLE_ACCESS_MAP_YAML`]: administrators, managers and
/// customers share the accounts module; customers also get the store.
#[allow(clippy::expect_used)]
pub fn register_back_office(builder: &mut AccessControlBuilder) {
    builder
        .register(["administrator", "manager", "customer"], |map| {
            map.permission("backend/base");
            map.project_module("accounts", "backend/accounts", |project| {
                project
                    .menu("list", Route::action("index"), css_class("icon-no-group"))
                    .menu("new", Route::action("new"), css_class("icon-new"));
            });
        })
        .and_then(|builder| {
            builder.register("customer", |map| {
                map.permission("frontend/cart");
                map.project_module("store", "frontend/store", |project| {
                    let add = Route::new().param("cart", "add");
                    let list = Route::new().param("cart", "list");
                    project
                        .menu("add", add, css_class("icon-no-group"))
                        .menu("list", list, css_class("icon-no-group"));
                });
            })
        })
        .expect("sample access map must register");
}

/// The back-office sample map, frozen.
pub fn back_office() -> AccessControl {
    let mut builder = AccessControl::builder();
    register_back_office(&mut builder);
    builder.freeze()
}

/// Write `contents` to a temporary file with the given extension.
///
/// The file is removed when the returned handle is dropped.
#[allow(clippy::expect_used)]
pub fn access_map_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("access_map")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("failed to create temporary access map");
    file.write_all(contents.as_bytes())
        .expect("failed to write temporary access map");
    file
}
