//! Portcullis access map library.
//!
//! Roles are granted controllers, either directly (shared permissions) or
//! through project modules that group controllers with navigation menus.
//! The map is declared once at startup through [`AccessControlBuilder`],
//! frozen into an [`AccessControl`], and then queried concurrently.
//!
//! ```
//! use portcullis::{AccessControl, MenuOptions, Route};
//!
//! let mut builder = AccessControl::builder();
//! builder
//!     .register(["administrator", "manager"], |map| {
//!         map.permission("backend/base");
//!         map.project_module("accounts", "backend/accounts", |project| {
//!             project.menu("list", Route::action("index"), MenuOptions::new());
//!         });
//!     })
//!     .map_err(|e| e.to_string())?;
//! let access = builder.freeze();
//!
//! let allowed = access
//!     .allowed_controllers("Manager", &["accounts"])
//!     .map_err(|e| e.to_string())?;
//! assert_eq!(allowed, vec!["backend/base", "backend/accounts"]);
//! # Ok::<(), String>(())
//! ```

pub mod access;
pub mod access_map;
pub mod config;
pub mod error;
pub mod naming;

pub use access::{
    AccessControl, AccessControlBuilder, Mapper, MapperBuilder, Menu, MenuOptions, ProjectModule,
    ProjectModuleBuilder, ResolvedTarget, Role, RoleRequirement, Route, RouteParams, Target,
};
pub use access_map::AccessMap;
pub use config::Config;
pub use error::{AccessError, AccessResult};
