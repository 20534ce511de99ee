//! Generator configuration

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Configuration of a generation run, usually read from `apigen.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Root base type; objects deriving from it are object types.
    #[serde(default = "default_root_object")]
    pub root_object: String,

    /// Ancestor whose descendants are constructed with a floating reference.
    #[serde(default = "default_floating_root")]
    pub floating_root: String,

    /// Prefix of generated module names.
    #[serde(default = "default_module_prefix")]
    pub module_prefix: String,

    /// C type prefixes stripped when naming target types, tried in order.
    #[serde(default = "default_type_prefixes")]
    pub type_prefixes: Vec<String>,

    #[serde(default = "default_version_macro")]
    pub version_macro: String,

    #[serde(default = "default_deprecation_macro")]
    pub deprecation_macro: String,

    /// Product name used in "Available since" notes.
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Wrap width of documentation comments.
    #[serde(default = "default_line_width")]
    pub line_width: usize,

    #[serde(default)]
    pub nullability: NullabilityConfig,

    #[serde(default)]
    pub imports: ImportsConfig,
}

/// Functions and parameters that accept or return null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullabilityConfig {
    /// C functions whose result may be null.
    #[serde(default)]
    pub results: BTreeSet<String>,

    /// C function name to target parameter names that accept null.
    #[serde(default)]
    pub params: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportsConfig {
    /// Module names emitted first, in this order.
    #[serde(default = "default_well_known")]
    pub well_known: Vec<String>,

    /// Import lines used when the existing module has no import list.
    #[serde(default = "default_import_lines")]
    pub defaults: Vec<String>,
}

/// Smallest wrap width that leaves room for comment markers.
const MIN_LINE_WIDTH: usize = 40;

fn default_root_object() -> String {
    "GObject".to_string()
}

fn default_floating_root() -> String {
    "GtkObject".to_string()
}

fn default_module_prefix() -> String {
    "Graphics.UI.Gtk".to_string()
}

fn default_type_prefixes() -> Vec<String> {
    ["Gtk", "Gdk", "Pango", "Atk", "G"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_version_macro() -> String {
    "GTK_CHECK_VERSION".to_string()
}

fn default_deprecation_macro() -> String {
    "DISABLE_DEPRECATED".to_string()
}

fn default_product_name() -> String {
    "Gtk+".to_string()
}

fn default_line_width() -> usize {
    80
}

fn default_well_known() -> Vec<String> {
    [
        "Control.Monad",
        "System.Glib.FFI",
        "System.Glib.UTFString",
        "System.Glib.Attributes",
        "System.Glib.Properties",
        "Graphics.UI.Gtk.Abstract.Object",
        "Graphics.UI.Gtk.Types",
        "Graphics.UI.Gtk.Signals",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_import_lines() -> Vec<String> {
    [
        "import Control.Monad\t(liftM)",
        "import System.Glib.FFI",
        "import System.Glib.UTFString",
        "import System.Glib.Attributes",
        "import System.Glib.Properties",
        "import Graphics.UI.Gtk.Abstract.Object\t(makeNewObject)",
        "{#import Graphics.UI.Gtk.Types#}",
        "{#import Graphics.UI.Gtk.Signals#}",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            well_known: default_well_known(),
            defaults: default_import_lines(),
        }
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            root_object: default_root_object(),
            floating_root: default_floating_root(),
            module_prefix: default_module_prefix(),
            type_prefixes: default_type_prefixes(),
            version_macro: default_version_macro(),
            deprecation_macro: default_deprecation_macro(),
            product_name: default_product_name(),
            line_width: default_line_width(),
            nullability: NullabilityConfig::default(),
            imports: ImportsConfig::default(),
        }
    }
}

impl GenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML. Empty input yields the defaults.
    pub fn from_toml_str(content: &str) -> GenResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Check the configuration for values the generator cannot work with.
    pub fn validate(&self) -> GenResult<()> {
        if self.root_object.is_empty() {
            return Err(GenError::ConfigError("root_object cannot be empty".into()));
        }
        if self.version_macro.is_empty() {
            return Err(GenError::ConfigError("version_macro cannot be empty".into()));
        }
        if self.deprecation_macro.is_empty() {
            return Err(GenError::ConfigError(
                "deprecation_macro cannot be empty".into(),
            ));
        }
        if self.line_width < MIN_LINE_WIDTH {
            return Err(GenError::ConfigError(format!(
                "line_width must be at least {MIN_LINE_WIDTH}, got {}",
                self.line_width
            )));
        }
        if self.type_prefixes.iter().any(String::is_empty) {
            return Err(GenError::ConfigError(
                "type_prefixes cannot contain an empty prefix".into(),
            ));
        }
        Ok(())
    }
}
