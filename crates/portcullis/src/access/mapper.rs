//! Mappers: one registration unit binding roles to controllers and modules.

use serde::Serialize;

use super::project_module::{ProjectModule, ProjectModuleBuilder};
use super::role::{Role, RoleRequirement};
use crate::error::{AccessError, AccessResult};

/// Roles bound to shared controllers and project modules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapper {
    roles: Vec<Role>,
    controllers: Vec<String>,
    project_modules: Vec<ProjectModule>,
}

impl Mapper {
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Shared controllers in declaration order (duplicates possible).
    pub fn controllers(&self) -> &[String] {
        &self.controllers
    }

    pub fn project_modules(&self) -> &[ProjectModule] {
        &self.project_modules
    }

    /// Whether this mapper applies to a role in canonical form.
    pub(crate) fn applies_to(&self, canonical_role: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == canonical_role)
    }
}

/// Populates a [`Mapper`] inside a registration callback.
///
/// Problems found while populating are collected and reported by `build`,
/// so the callback itself stays infallible.
#[derive(Debug)]
pub struct MapperBuilder {
    mapper: Mapper,
    problems: Vec<String>,
}

impl MapperBuilder {
    pub(crate) fn new(requirement: RoleRequirement) -> AccessResult<Self> {
        Ok(Self {
            mapper: Mapper {
                roles: requirement.into_roles()?,
                controllers: Vec::new(),
                project_modules: Vec::new(),
            },
            problems: Vec::new(),
        })
    }

    /// Grant a controller to every role of this mapper, independent of modules.
    ///
    /// A blank controller fails the registration.
    pub fn permission(&mut self, controller: impl Into<String>) -> &mut Self {
        let controller = controller.into();
        if controller.trim().is_empty() {
            self.problems.push("blank permission controller".to_string());
        } else {
            self.mapper.controllers.push(controller);
        }
        self
    }

    /// Declare a project module and populate its menus.
    pub fn project_module<F>(
        &mut self,
        name: impl Into<String>,
        primary_controller: impl Into<String>,
        build: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut ProjectModuleBuilder),
    {
        let name = name.into();
        let primary_controller = primary_controller.into();
        if primary_controller.trim().is_empty() {
            self.problems
                .push(format!("project module '{name}' has a blank primary controller"));
            return self;
        }

        let mut module = ProjectModuleBuilder::new(name, primary_controller);
        build(&mut module);
        self.mapper.project_modules.push(module.build());
        self
    }

    pub(crate) fn build(self) -> AccessResult<Mapper> {
        if self.problems.is_empty() {
            Ok(self.mapper)
        } else {
            Err(AccessError::Configuration(self.problems.join("; ")))
        }
    }
}
