//! Caller-supplied option descriptions.
//!
//! An [`OptionSpec`] list is what a catalog hands to
//! [`SelectionTree::build`](super::SelectionTree::build). It never contains
//! the synthesized navigation nodes, so rebuilding a tree from its own
//! [`to_specs`](super::SelectionTree::to_specs) export cannot duplicate them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::tree::RESERVED_LABELS;
use crate::error::{ArchsecureError, ArchsecureResult};

/// One option as declared by a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptionSpec {
    Checkbox {
        label: String,
        #[serde(default, skip_serializing_if = "is_false")]
        checked: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Radio {
        label: String,
        #[serde(default, skip_serializing_if = "is_false")]
        checked: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Group {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        children: Vec<OptionSpec>,
    },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl OptionSpec {
    pub fn checkbox(label: impl Into<String>) -> Self {
        Self::Checkbox {
            label: label.into(),
            checked: false,
            description: None,
        }
    }

    pub fn radio(label: impl Into<String>) -> Self {
        Self::Radio {
            label: label.into(),
            checked: false,
            description: None,
        }
    }

    pub fn group(label: impl Into<String>, children: Vec<OptionSpec>) -> Self {
        Self::Group {
            label: label.into(),
            description: None,
            children,
        }
    }

    /// Mark a checkbox or radio as initially checked. No effect on groups.
    pub fn checked(mut self) -> Self {
        match &mut self {
            Self::Checkbox { checked, .. } | Self::Radio { checked, .. } => *checked = true,
            Self::Group { .. } => {}
        }
        self
    }

    pub fn described(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Checkbox { description, .. }
            | Self::Radio { description, .. }
            | Self::Group { description, .. } => *description = Some(text.into()),
        }
        self
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Checkbox { label, .. } | Self::Radio { label, .. } | Self::Group { label, .. } => {
                label
            }
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Checkbox { description, .. }
            | Self::Radio { description, .. }
            | Self::Group { description, .. } => description.as_deref(),
        }
    }

    pub fn children(&self) -> &[OptionSpec] {
        match self {
            Self::Group { children, .. } => children,
            _ => &[],
        }
    }
}

/// Check the structural rules a catalog must satisfy before a tree is built.
pub(crate) fn validate(specs: &[OptionSpec]) -> ArchsecureResult<()> {
    let mut seen = HashSet::new();
    validate_level(specs, &mut seen)
}

fn validate_level<'a>(
    specs: &'a [OptionSpec],
    seen: &mut HashSet<&'a str>,
) -> ArchsecureResult<()> {
    let mut checked_radio: Option<&str> = None;

    for spec in specs {
        let label = spec.label();
        if RESERVED_LABELS.contains(&label) {
            return Err(ArchsecureError::ReservedLabel {
                label: label.to_string(),
            });
        }
        if !seen.insert(label) {
            return Err(ArchsecureError::DuplicateLabel {
                label: label.to_string(),
            });
        }

        match spec {
            OptionSpec::Radio { checked: true, .. } => {
                if let Some(first) = checked_radio {
                    return Err(ArchsecureError::ConflictingRadios {
                        first: first.to_string(),
                        second: label.to_string(),
                    });
                }
                checked_radio = Some(label);
            }
            OptionSpec::Group { children, .. } => {
                if children.is_empty() {
                    return Err(ArchsecureError::EmptyGroup {
                        label: label.to_string(),
                    });
                }
                validate_level(children, seen)?;
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_duplicate_labels_across_levels() {
        let specs = vec![
            OptionSpec::checkbox("Harden Xorg"),
            OptionSpec::group("Nested", vec![OptionSpec::checkbox("Harden Xorg")]),
        ];
        let err = validate(&specs).unwrap_err();
        assert!(matches!(err, ArchsecureError::DuplicateLabel { label } if label == "Harden Xorg"));
    }

    #[test]
    fn validate_rejects_reserved_labels() {
        let specs = vec![OptionSpec::checkbox("Abort")];
        assert!(matches!(
            validate(&specs),
            Err(ArchsecureError::ReservedLabel { .. })
        ));
    }

    #[test]
    fn validate_rejects_two_checked_radios() {
        let specs = vec![OptionSpec::group(
            "Harden Firewall",
            vec![
                OptionSpec::radio("Use UFW").checked(),
                OptionSpec::radio("Use NFtables").checked(),
            ],
        )];
        let err = validate(&specs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "radio options 'Use UFW' and 'Use NFtables' are both checked in the same group"
        );
    }

    #[test]
    fn validate_allows_checked_radios_in_different_groups() {
        let specs = vec![
            OptionSpec::group("A", vec![OptionSpec::radio("a1").checked()]),
            OptionSpec::group("B", vec![OptionSpec::radio("b1").checked()]),
        ];
        assert!(validate(&specs).is_ok());
    }

    #[test]
    fn validate_rejects_empty_group() {
        let specs = vec![OptionSpec::group("Empty", vec![])];
        assert!(matches!(
            validate(&specs),
            Err(ArchsecureError::EmptyGroup { .. })
        ));
    }

    #[test]
    fn option_spec_parses_from_tagged_toml() {
        let toml = r#"
kind = "group"
label = "Harden Firewall"

[[children]]
kind = "radio"
label = "Use UFW"
checked = true

[[children]]
kind = "radio"
label = "Use NFtables"
"#;
        let spec: OptionSpec = toml::from_str(toml).unwrap();
        assert_eq!(spec.label(), "Harden Firewall");
        assert_eq!(spec.children().len(), 2);
        assert_eq!(spec.children()[0], OptionSpec::radio("Use UFW").checked());
    }

    #[test]
    fn option_spec_json_omits_defaults() {
        let json = serde_json::to_string(&OptionSpec::checkbox("Harden Xorg")).unwrap();
        assert_eq!(json, r#"{"kind":"checkbox","label":"Harden Xorg"}"#);
    }
}
