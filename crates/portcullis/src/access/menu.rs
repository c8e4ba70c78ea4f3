//! Menu entries and their destinations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::naming;

/// Target key naming the controller a route points at.
pub const CONTROLLER_KEY: &str = "controller";

/// Free-form display metadata attached to a menu (CSS class, icon, ...).
///
/// Opaque to the registry; carried through to navigation rendering.
pub type MenuOptions = BTreeMap<String, serde_json::Value>;

/// Route keys and their values (strings, numbers, booleans, ...).
pub type RouteParams = BTreeMap<String, serde_json::Value>;

/// Symbolic route parameters, e.g. `{action: index, page: 2}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    params: RouteParams,
}

impl Route {
    /// Create an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a route with only an `action` key.
    pub fn action(action: impl Into<String>) -> Self {
        Self::new().param("action", action.into())
    }

    /// Set the controller key explicitly.
    pub fn controller(self, controller: impl Into<String>) -> Self {
        self.param(CONTROLLER_KEY, controller.into())
    }

    /// Set an arbitrary key.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get a parameter by key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }

    /// The explicitly requested controller, if any.
    ///
    /// Only a non-blank string names a controller; anything else counts as absent.
    pub fn requested_controller(&self) -> Option<&str> {
        self.get(CONTROLLER_KEY)
            .and_then(serde_json::Value::as_str)
            .filter(|c| !c.trim().is_empty())
    }
}

/// A menu destination as supplied at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    /// Literal URL, stored verbatim.
    Url(String),
    /// Symbolic route, resolved against the owning module's primary controller.
    Route(Route),
}

impl Target {
    /// Resolve into a destination with a concrete controller.
    ///
    /// Routes without a controller key inherit `primary_controller`.
    /// The input is left untouched; the result is a new value.
    pub fn resolve(&self, primary_controller: &str) -> ResolvedTarget {
        match self {
            Target::Url(url) => ResolvedTarget::Url(url.clone()),
            Target::Route(route) => {
                let controller = route
                    .requested_controller()
                    .unwrap_or(primary_controller)
                    .to_string();
                let params = route
                    .params
                    .iter()
                    .filter(|(key, _)| key.as_str() != CONTROLLER_KEY)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                ResolvedTarget::Route { controller, params }
            }
        }
    }
}

impl From<Route> for Target {
    fn from(route: Route) -> Self {
        Target::Route(route)
    }
}

impl From<&str> for Target {
    fn from(url: &str) -> Self {
        Target::Url(url.to_string())
    }
}

impl From<String> for Target {
    fn from(url: String) -> Self {
        Target::Url(url)
    }
}

/// A menu destination after controller resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedTarget {
    Url(String),
    Route {
        controller: String,
        params: RouteParams,
    },
}

impl ResolvedTarget {
    /// The controller this destination points at; `None` for literal URLs.
    pub fn controller(&self) -> Option<&str> {
        match self {
            ResolvedTarget::Url(_) => None,
            ResolvedTarget::Route { controller, .. } => Some(controller),
        }
    }

    /// A route parameter other than the controller.
    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        match self {
            ResolvedTarget::Url(_) => None,
            ResolvedTarget::Route { params, .. } => params.get(key),
        }
    }

    /// A route parameter holding a string.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param(key).and_then(serde_json::Value::as_str)
    }
}

/// One navigable entry within a project module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Menu {
    name: String,
    target: ResolvedTarget,
    options: MenuOptions,
}

impl Menu {
    pub(crate) fn new(name: String, target: ResolvedTarget, options: MenuOptions) -> Self {
        Self {
            name,
            target,
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &ResolvedTarget {
        &self.target
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Shortcut for `target().controller()`.
    pub fn controller(&self) -> Option<&str> {
        self.target.controller()
    }

    pub fn human_name(&self) -> String {
        naming::humanize(&self.name)
    }

    pub fn uid(&self) -> String {
        naming::slugify(&self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn route_without_controller_inherits_primary() {
        let target = Target::from(Route::action("index"));
        let resolved = target.resolve("backend/accounts");

        assert_eq!(resolved.controller(), Some("backend/accounts"));
        assert_eq!(resolved.param_str("action"), Some("index"));
    }

    #[test]
    fn route_with_controller_keeps_it() {
        let target = Target::from(Route::action("list").controller("frontend/cart"));
        let resolved = target.resolve("frontend/store");

        assert_eq!(resolved.controller(), Some("frontend/cart"));
        assert_eq!(resolved.param(CONTROLLER_KEY), None);
    }

    #[test]
    fn blank_controller_counts_as_absent() {
        let target = Target::from(Route::action("index").controller(" "));
        assert_eq!(target.resolve("backend/base").controller(), Some("backend/base"));
    }

    #[test]
    fn route_params_keep_their_json_type() {
        let route = Route::action("index").param("page", 2).param("archived", false);
        let resolved = Target::from(route).resolve("backend/orders");

        assert_eq!(resolved.param("page"), Some(&serde_json::json!(2)));
        assert_eq!(resolved.param("archived"), Some(&serde_json::json!(false)));
        assert_eq!(resolved.param_str("page"), None);
    }

    #[test]
    fn non_string_controller_counts_as_absent() {
        let route: Route = serde_json::from_str(r#"{"controller": 7, "action": "index"}"#).unwrap();
        assert_eq!(route.requested_controller(), None);

        let resolved = Target::from(route).resolve("backend/base");
        assert_eq!(resolved.controller(), Some("backend/base"));
        assert_eq!(resolved.param(CONTROLLER_KEY), None);
    }

    #[test]
    fn resolve_does_not_touch_input() {
        let target = Target::from(Route::action("index"));
        let before = target.clone();
        let _ = target.resolve("backend/accounts");
        assert_eq!(target, before);
    }

    #[test]
    fn url_target_is_verbatim() {
        let resolved = Target::from("/help").resolve("backend/help");
        assert_eq!(resolved, ResolvedTarget::Url("/help".to_string()));
        assert_eq!(resolved.controller(), None);
    }

    #[test]
    fn target_deserializes_untagged() {
        let url: Target = serde_json::from_str(r#""/help""#).unwrap();
        assert_eq!(url, Target::Url("/help".to_string()));

        let route: Target = serde_json::from_str(r#"{"action": "new"}"#).unwrap();
        assert_eq!(route, Target::Route(Route::action("new")));

        let paged: Target = serde_json::from_str(r#"{"action": "index", "page": 3}"#).unwrap();
        assert_eq!(paged, Target::Route(Route::action("index").param("page", 3)));
    }

    #[test]
    fn menu_name_derivations() {
        let menu = Menu::new(
            "new_account".to_string(),
            ResolvedTarget::Url("/accounts/new".to_string()),
            MenuOptions::new(),
        );
        assert_eq!(menu.human_name(), "New account");
        assert_eq!(menu.uid(), "new-account");
    }
}
