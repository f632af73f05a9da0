//! Option catalog
//!
//! The menu structure and the text shown for each entry. The built-in
//! catalog covers the hardening recipes shipped with the binary; an
//! operator can replace it with a TOML file:
//!
//! ```toml
//! [[option]]
//! kind = "group"
//! label = "Harden Firewall"
//!
//! [[option.children]]
//! kind = "radio"
//! label = "Use UFW"
//! description = "Enable UFW with a deny-incoming policy."
//! ```

mod builtin;
mod descriptions;
pub mod labels;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::selection::{OptionSpec, SelectionTree};
use crate::error::{ArchsecureError, ArchsecureResult};

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(rename = "option", default)]
    options: Vec<OptionSpec>,
}

/// Menu structure plus description lookup
#[derive(Debug, Clone)]
pub struct Catalog {
    options: Vec<OptionSpec>,
    descriptions: HashMap<String, String>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self::new(builtin::options())
    }

    /// Catalog over `options`; descriptions they carry override built-in text
    pub fn new(options: Vec<OptionSpec>) -> Self {
        let mut descriptions: HashMap<String, String> = descriptions::builtin()
            .iter()
            .map(|(label, text)| (label.to_string(), text.to_string()))
            .collect();
        collect_descriptions(&options, &mut descriptions);
        Self {
            options,
            descriptions,
        }
    }

    /// Parse a TOML catalog. The option tree is validated here.
    pub fn from_toml_str(content: &str, file: &Path) -> ArchsecureResult<Self> {
        let parsed: CatalogFile =
            toml::from_str(content).map_err(|e| ArchsecureError::InvalidCatalog {
                file: file.to_path_buf(),
                message: e.to_string(),
            })?;
        if parsed.options.is_empty() {
            return Err(ArchsecureError::InvalidCatalog {
                file: file.to_path_buf(),
                message: "no [[option]] entries".to_string(),
            });
        }
        SelectionTree::build(&parsed.options).map_err(|e| ArchsecureError::InvalidCatalog {
            file: file.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::new(parsed.options))
    }

    pub fn load(path: &Path) -> ArchsecureResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }

    /// The catalog at `path`, or the built-in one
    pub fn load_or_builtin(path: Option<&Path>) -> ArchsecureResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Serialize options as a TOML catalog
    pub fn to_toml(options: &[OptionSpec]) -> Result<String, toml::ser::Error> {
        toml::to_string(&CatalogFile {
            options: options.to_vec(),
        })
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Description for `label`; empty for unknown labels
    pub fn describe(&self, label: &str) -> &str {
        self.descriptions.get(label).map(String::as_str).unwrap_or("")
    }

    /// `tree` as option specs with every known description filled in
    pub fn export(&self, tree: &SelectionTree) -> Vec<OptionSpec> {
        self.describe_all(tree.to_specs())
    }

    fn describe_all(&self, specs: Vec<OptionSpec>) -> Vec<OptionSpec> {
        specs
            .into_iter()
            .map(|mut spec| {
                if let OptionSpec::Group { children, .. } = &mut spec {
                    *children = self.describe_all(std::mem::take(children));
                }
                match self.describe(spec.label()) {
                    "" => spec,
                    text => spec.described(text),
                }
            })
            .collect()
    }

    /// Build the selection tree and check every `preselect` leaf
    pub fn build_tree(&self, preselect: &[String]) -> ArchsecureResult<SelectionTree> {
        let mut tree = SelectionTree::build(&self.options)?;
        for label in preselect {
            tree.check(label)?;
        }
        Ok(tree)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn collect_descriptions(options: &[OptionSpec], out: &mut HashMap<String, String>) {
    for option in options {
        if let Some(text) = option.description() {
            out.insert(option.label().to_string(), text.to_string());
        }
        collect_descriptions(option.children(), out);
    }
}
