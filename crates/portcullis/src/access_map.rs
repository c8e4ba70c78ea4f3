//! Declarative access map files.
//!
//! The same map that code declares through [`AccessControlBuilder::register`]
//! can be written as YAML or TOML. Every entry is fed through `register` in
//! file order, so the registration rules and errors are identical.
//!
//! ```yaml
//! mappers:
//!   - require: [administrator, manager]
//!     permissions: [backend/base]
//!     modules:
//!       - name: accounts
//!         controller: backend/accounts
//!         menus:
//!           - name: list
//!             target: { action: index }
//!             options: { class: icon-no-group }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::access::{AccessControl, AccessControlBuilder, MenuOptions, RoleRequirement, Target};
use crate::error::{AccessError, AccessResult};

/// Maximum access map file size (10 MB).
const MAX_ACCESS_MAP_SIZE: u64 = 10 * 1024 * 1024;

/// File formats accepted by [`AccessMap::load`], chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFormat {
    Yaml,
    Toml,
}

impl MapFormat {
    /// Pick a format from the file extension (`.yml`, `.yaml`, `.toml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(MapFormat::Yaml),
            "toml" => Some(MapFormat::Toml),
            _ => None,
        }
    }
}

/// A whole access map as declared in a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessMap {
    #[serde(default)]
    pub mappers: Vec<MapperDefinition>,
}

/// One registration: roles, shared permissions and modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperDefinition {
    pub require: RoleRequirement,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub modules: Vec<ModuleDefinition>,
}

/// A project module and its primary controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub name: String,
    pub controller: String,
    #[serde(default)]
    pub menus: Vec<MenuDefinition>,
}

/// A menu entry; `target` is a literal URL or a key/value route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDefinition {
    pub name: String,
    pub target: Target,
    #[serde(default)]
    pub options: MenuOptions,
}

impl AccessMap {
    /// Parse a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(source)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Read and parse an access map file.
    pub fn load(path: &Path) -> AccessResult<Self> {
        let format = MapFormat::from_path(path).ok_or_else(|| {
            AccessError::definition(path, "unsupported extension (expected .yml, .yaml or .toml)")
        })?;

        let metadata = fs::metadata(path).map_err(|e| AccessError::definition(path, e))?;
        if metadata.len() > MAX_ACCESS_MAP_SIZE {
            return Err(AccessError::definition(
                path,
                format!(
                    "file is {} bytes, limit is {MAX_ACCESS_MAP_SIZE}",
                    metadata.len()
                ),
            ));
        }

        let source = fs::read_to_string(path).map_err(|e| AccessError::definition(path, e))?;
        let map = match format {
            MapFormat::Yaml => {
                Self::from_yaml_str(&source).map_err(|e| AccessError::definition(path, e))?
            }
            MapFormat::Toml => {
                Self::from_toml_str(&source).map_err(|e| AccessError::definition(path, e))?
            }
        };

        debug!(path = %path.display(), mappers = map.mappers.len(), "access map parsed");
        Ok(map)
    }

    /// Register every mapper into `builder`, in file order.
    pub fn register_into(&self, builder: &mut AccessControlBuilder) -> AccessResult<()> {
        for definition in &self.mappers {
            builder.register(definition.require.clone(), |map| {
                for controller in &definition.permissions {
                    map.permission(controller);
                }
                for module in &definition.modules {
                    map.project_module(&module.name, &module.controller, |project| {
                        for menu in &module.menus {
                            project.menu(&menu.name, menu.target.clone(), menu.options.clone());
                        }
                    });
                }
            })?;
        }
        Ok(())
    }

    /// Build and freeze an access map holding only this file's entries.
    pub fn into_access_control(self) -> AccessResult<AccessControl> {
        let mut builder = AccessControl::builder();
        self.register_into(&mut builder)?;
        Ok(builder.freeze())
    }
}

/// Load a file and freeze it into a ready-to-query [`AccessControl`].
pub fn load_access_control(path: &Path) -> AccessResult<AccessControl> {
    let access = AccessMap::load(path)?.into_access_control()?;
    info!(
        path = %path.display(),
        mappers = access.mapper_count(),
        roles = access.roles().len(),
        "access map loaded"
    );
    Ok(access)
}
