//! Project modules: named groups of controllers with ordered menus.

use serde::Serialize;

use super::menu::{Menu, MenuOptions, Target};
use crate::naming;

/// A functional area: its controllers and navigation menus.
///
/// The first controller is the primary one given at creation; menus that
/// route to other controllers append them (once) after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectModule {
    name: String,
    controllers: Vec<String>,
    menus: Vec<Menu>,
}

impl ProjectModule {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Controllers granted by selecting this module, primary first.
    pub fn controllers(&self) -> &[String] {
        &self.controllers
    }

    pub fn primary_controller(&self) -> &str {
        // Always present: set in ProjectModuleBuilder::new.
        self.controllers.first().map(String::as_str).unwrap_or_default()
    }

    /// Menus in declaration (display) order.
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Find a menu by exact name.
    pub fn menu(&self, name: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.name() == name)
    }

    pub fn human_name(&self) -> String {
        naming::humanize(&self.name)
    }

    pub fn uid(&self) -> String {
        naming::slugify(&self.name)
    }
}

/// Populates a [`ProjectModule`] during registration.
#[derive(Debug)]
pub struct ProjectModuleBuilder {
    module: ProjectModule,
}

impl ProjectModuleBuilder {
    pub(crate) fn new(name: String, primary_controller: String) -> Self {
        Self {
            module: ProjectModule {
                name,
                controllers: vec![primary_controller],
                menus: Vec::new(),
            },
        }
    }

    /// Append a menu entry.
    ///
    /// A route target without a controller is resolved to this module's
    /// primary controller. A route naming another controller grants that
    /// controller through this module as well.
    pub fn menu(
        &mut self,
        name: impl Into<String>,
        target: impl Into<Target>,
        options: impl Into<MenuOptions>,
    ) -> &mut Self {
        let target = target.into().resolve(self.module.primary_controller());

        if let Some(controller) = target.controller()
            && !self.module.controllers.iter().any(|c| c == controller)
        {
            self.module.controllers.push(controller.to_string());
        }

        self.module
            .menus
            .push(Menu::new(name.into(), target, options.into()));
        self
    }

    pub(crate) fn build(self) -> ProjectModule {
        self.module
    }
}
