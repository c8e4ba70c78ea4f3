//! Access registry - collects mappers at startup and answers access queries.
//!
//! Registration happens on an [`AccessControlBuilder`]. Once every mapper is
//! declared, [`AccessControlBuilder::freeze`] yields an immutable
//! [`AccessControl`] that can be cloned into request handlers and queried
//! concurrently.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::mapper::{Mapper, MapperBuilder};
use super::project_module::ProjectModule;
use super::role::{self, Role, RoleRequirement};
use crate::error::{AccessError, AccessResult};

/// Collects mappers during the startup phase.
#[derive(Debug, Default)]
pub struct AccessControlBuilder {
    mappers: Vec<Mapper>,
    roles: Vec<Role>,
}

impl AccessControlBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one permission group.
    ///
    /// `build` is called exactly once with a fresh [`MapperBuilder`] for the
    /// normalized roles of `requirement`. Fails with
    /// [`AccessError::Configuration`] if the requirement names no roles, in
    /// which case `build` is not called, or if `build` declared a blank
    /// controller. A failed registration leaves the builder unchanged.
    pub fn register<R, F>(&mut self, requirement: R, build: F) -> AccessResult<&mut Self>
    where
        R: Into<RoleRequirement>,
        F: FnOnce(&mut MapperBuilder),
    {
        let mut mapper = MapperBuilder::new(requirement.into())?;
        build(&mut mapper);
        let mapper = mapper.build()?;

        debug!(
            roles = ?mapper.roles(),
            controllers = mapper.controllers().len(),
            project_modules = mapper.project_modules().len(),
            "registered access mapper"
        );

        for role in mapper.roles() {
            if !self.roles.contains(role) {
                self.roles.push(role.clone());
            }
        }
        self.mappers.push(mapper);

        Ok(self)
    }

    /// Number of mappers registered so far.
    pub fn mapper_count(&self) -> usize {
        self.mappers.len()
    }

    /// Finish registration.
    pub fn freeze(self) -> AccessControl {
        info!(
            mappers = self.mappers.len(),
            roles = self.roles.len(),
            "access map frozen"
        );

        AccessControl {
            inner: Arc::new(AccessControlInner {
                mappers: self.mappers,
                roles: self.roles,
            }),
        }
    }
}

/// Frozen access map.
///
/// Every query is a pure read; clones share the same map.
#[derive(Debug, Clone)]
pub struct AccessControl {
    inner: Arc<AccessControlInner>,
}

#[derive(Debug)]
struct AccessControlInner {
    /// Mappers in registration order.
    mappers: Vec<Mapper>,
    /// Every declared role, first-declared first.
    roles: Vec<Role>,
}

impl AccessControl {
    /// Start declaring a new access map.
    pub fn builder() -> AccessControlBuilder {
        AccessControlBuilder::new()
    }

    /// Every declared role, each exactly once.
    pub fn roles(&self) -> &[Role] {
        &self.inner.roles
    }

    /// Human-readable labels of [`roles`](Self::roles), in the same order.
    pub fn human_roles(&self) -> Vec<String> {
        self.inner.roles.iter().map(Role::human_name).collect()
    }

    /// All mappers in registration order.
    pub fn mappers(&self) -> &[Mapper] {
        &self.inner.mappers
    }

    pub fn mapper_count(&self) -> usize {
        self.inner.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.mappers.is_empty()
    }

    /// Mappers that apply to `role` (any casing), in registration order.
    fn mappers_for(&self, role: &str) -> impl Iterator<Item = &Mapper> {
        let canonical = role::canonicalize(role);
        self.inner
            .mappers
            .iter()
            .filter(move |m| m.applies_to(&canonical))
    }

    /// Project modules available to `role`, in registration order.
    ///
    /// Empty for an unknown role.
    pub fn project_modules(&self, role: &str) -> Vec<&ProjectModule> {
        self.mappers_for(role)
            .flat_map(|m| m.project_modules())
            .collect()
    }

    /// First project module available to `role` whose name is exactly `name`.
    pub fn project_module(&self, role: &str, name: &str) -> Option<&ProjectModule> {
        self.mappers_for(role)
            .flat_map(|m| m.project_modules())
            .find(|p| p.name() == name)
    }

    /// Controllers `role` may access with the given modules selected.
    ///
    /// Shared controllers of every matching mapper come first, then the
    /// controllers of each selected module. Duplicates are dropped, keeping
    /// the first occurrence. Fails with [`AccessError::UnknownModule`] if a
    /// selected module is not available to the role.
    pub fn allowed_controllers(&self, role: &str, modules: &[&str]) -> AccessResult<Vec<&str>> {
        let mut seen = HashSet::new();
        let mut controllers = Vec::new();

        for mapper in self.mappers_for(role) {
            extend_unique(&mut seen, &mut controllers, mapper.controllers());
        }

        for &name in modules {
            let Some(module) = self.project_module(role, name) else {
                warn!(role = %role, module = %name, "module not granted to role");
                return Err(AccessError::UnknownModule {
                    role: role::canonicalize(role),
                    module: name.to_string(),
                });
            };
            extend_unique(&mut seen, &mut controllers, module.controllers());
        }

        Ok(controllers)
    }

    /// Whether `controller` is allowed for `role` with the given modules selected.
    pub fn permits(&self, role: &str, modules: &[&str], controller: &str) -> AccessResult<bool> {
        Ok(self
            .allowed_controllers(role, modules)?
            .contains(&controller))
    }
}

/// Append controllers not seen before, keeping first-seen order.
fn extend_unique<'a>(
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<&'a str>,
    controllers: &'a [String],
) {
    for controller in controllers {
        if seen.insert(controller.as_str()) {
            out.push(controller.as_str());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::access::menu::{MenuOptions, Route};

    fn back_office() -> AccessControl {
        let mut builder = AccessControl::builder();
        builder
            .register(["administrator", "manager", "customer"], |map| {
                map.permission("backend/base");
                map.project_module("accounts", "backend/accounts", |project| {
                    project
                        .menu("list", Route::action("index"), MenuOptions::new())
                        .menu("new", Route::action("new"), MenuOptions::new());
                });
            })
            .unwrap()
            .register("customer", |map| {
                map.permission("frontend/cart");
                map.project_module("store", "frontend/store", |project| {
                    project
                        .menu("add", Route::new().param("cart", "add"), MenuOptions::new())
                        .menu("list", Route::new().param("cart", "list"), MenuOptions::new());
                });
            })
            .unwrap();
        builder.freeze()
    }

    #[test]
    fn access_control_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<AccessControl>();
    }

    #[test]
    fn roles_are_flattened_once() {
        let access = back_office();
        let roles: Vec<_> = access.roles().iter().map(Role::as_str).collect();
        assert_eq!(roles, vec!["administrator", "manager", "customer"]);
        assert_eq!(access.human_roles(), vec!["Administrator", "Manager", "Customer"]);
    }

    #[test]
    fn empty_requirement_fails_without_calling_builder() {
        let mut builder = AccessControl::builder();
        let mut called = false;
        let result = builder.register(Vec::<String>::new(), |_| called = true);

        assert!(matches!(result, Err(AccessError::Configuration(_))));
        assert!(!called);
        assert_eq!(builder.mapper_count(), 0);
    }

    #[test]
    fn project_modules_follow_registration_order() {
        let access = back_office();
        let names: Vec<_> = access
            .project_modules("customer")
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["accounts", "store"]);

        let names: Vec<_> = access
            .project_modules("manager")
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["accounts"]);
    }

    #[test]
    fn unknown_role_sees_nothing() {
        let access = back_office();
        assert!(access.project_modules("guest").is_empty());
        assert!(access.project_module("guest", "accounts").is_none());
        assert!(access.allowed_controllers("guest", &[]).unwrap().is_empty());
    }

    #[test]
    fn project_module_lookup_is_exact() {
        let access = back_office();
        assert!(access.project_module("manager", "accounts").is_some());
        assert!(access.project_module("manager", "Accounts").is_none());
        assert!(access.project_module("manager", "store").is_none());
    }

    #[test]
    fn role_queries_ignore_case() {
        let access = back_office();
        assert_eq!(access.project_modules("Customer").len(), 2);
        assert_eq!(
            access.allowed_controllers("CUSTOMER", &[]).unwrap(),
            vec!["backend/base", "frontend/cart"]
        );
    }

    #[test]
    fn allowed_controllers_with_modules() {
        let access = back_office();
        let allowed = access
            .allowed_controllers("customer", &["accounts", "store"])
            .unwrap();
        assert_eq!(
            allowed,
            vec![
                "backend/base",
                "frontend/cart",
                "backend/accounts",
                "frontend/store"
            ]
        );
    }

    #[test]
    fn allowed_controllers_rejects_ungranted_module() {
        let access = back_office();
        let err = access
            .allowed_controllers("manager", &["store"])
            .unwrap_err();
        match err {
            AccessError::UnknownModule { role, module } => {
                assert_eq!(role, "manager");
                assert_eq!(module, "store");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn permits_checks_membership() {
        let access = back_office();
        assert!(access.permits("manager", &["accounts"], "backend/accounts").unwrap());
        assert!(!access.permits("manager", &[], "backend/accounts").unwrap());
        assert!(access.permits("manager", &["nope"], "backend/base").is_err());
    }

    #[test]
    fn clones_share_the_map() {
        let access = back_office();
        let clone = access.clone();
        assert!(Arc::ptr_eq(&access.inner, &clone.inner));
        assert_eq!(clone.mapper_count(), 2);
        assert!(!clone.is_empty());
    }
}
