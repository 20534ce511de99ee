//! Hints recovered from a previously generated module
//!
//! Regeneration keeps the member order, names and call safety that an
//! existing module already committed to.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A previously generated module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingModule {
    #[serde(default)]
    pub module_name: Option<String>,

    /// C prefix declared in the module's context hook.
    #[serde(default)]
    pub context_prefix: Option<String>,

    /// Bound functions in body order.
    #[serde(default)]
    pub members: Vec<MemberInfo>,

    /// Exported names in export-list order.
    #[serde(default)]
    pub exports: Vec<String>,

    /// Import lines, or `None` when the module had no import block.
    #[serde(default)]
    pub imports: Option<Vec<String>>,
}

/// Per-function hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// Full C name of the called function.
    pub cname: String,

    /// Target name the binding was given, when it differs from the derived one.
    #[serde(default)]
    pub rename: Option<String>,

    /// Call hook spelled with the C prefix omitted.
    #[serde(default)]
    pub short_cname: Option<String>,

    #[serde(default)]
    pub unsafe_call: bool,
}

impl ExistingModule {
    /// Position and info of every member, keyed by C name. The first
    /// occurrence of a name wins.
    pub fn member_positions(&self) -> HashMap<&str, (usize, &MemberInfo)> {
        let mut map = HashMap::new();
        for (index, info) in self.members.iter().enumerate() {
            map.entry(info.cname.as_str()).or_insert((index, info));
        }
        map
    }

    /// Position of every exported name.
    pub fn export_positions(&self) -> HashMap<&str, usize> {
        let mut map = HashMap::new();
        for (index, name) in self.exports.iter().enumerate() {
            map.entry(name.as_str()).or_insert(index);
        }
        map
    }
}

#[cfg(test)]
#[path = "existing/existing_tests.rs"]
mod existing_tests;
