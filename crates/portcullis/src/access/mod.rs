//! Access map: roles, shared permissions, project modules and menus.
//!
//! The map is declared at startup and provides:
//! - The controllers a role may reach, given its selected modules
//! - Navigation structure (project modules and their menus) per role
//! - Labels and URL-safe identifiers for navigation rendering

mod mapper;
mod menu;
mod project_module;
mod registry;
mod role;

pub use mapper::{Mapper, MapperBuilder};
pub use menu::{CONTROLLER_KEY, Menu, MenuOptions, ResolvedTarget, Route, RouteParams, Target};
pub use project_module::{ProjectModule, ProjectModuleBuilder};
pub use registry::{AccessControl, AccessControlBuilder};
pub use role::{Role, RoleRequirement};
