//! Outward-facing entity views
//!
//! A view is the entity's intrinsic fields flattened together with its facet
//! state: attribute values grouped per attribute key, permission grants and
//! status flags. Views are what a transport layer built on top of the crate
//! serializes.

use crate::core::attribute::{
    CounterValue, DescriptionValue, FileValue, PointValue, StringValue,
};
use crate::core::flag::StatusFlag;
use crate::core::permission::{AccessMethod, Permission};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Read options for view assembly
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Requested language for localized strings and descriptions. `None`
    /// selects the configured default language.
    pub lang: Option<String>,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// A counter value in a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterView {
    pub count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
}

/// The values of one attribute key on one entity, across all five families
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttributeView {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub counters: Vec<CounterView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl AttributeView {
    fn is_empty(&self) -> bool {
        self.strings.is_empty()
            && self.points.is_empty()
            && self.descriptions.is_empty()
            && self.counters.is_empty()
            && self.files.is_empty()
    }
}

/// A permission grant in a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionView {
    pub group: String,
    pub method: AccessMethod,
}

/// An entity together with its facet state
#[derive(Debug, Clone, Serialize)]
pub struct EntityView<E> {
    #[serde(flatten)]
    pub entity: E,

    /// Attribute values grouped per attribute key, key-ordered
    pub attributes: IndexMap<String, AttributeView>,

    /// Permission grants, composite-key-ordered
    pub permissions: Vec<PermissionView>,

    /// Status flags, key-ordered
    pub flags: Vec<String>,
}

/// Select localized values for one attribute.
///
/// Language-neutral values are always included. Localized values come from
/// the requested language; when the attribute has none there, the default
/// language fills in.
fn select_localized(entries: &[(Option<String>, String)], lang: &str, default: &str) -> Vec<String> {
    let mut out: Vec<String> = entries
        .iter()
        .filter(|(l, _)| l.is_none())
        .map(|(_, v)| v.clone())
        .collect();

    let requested: Vec<&String> = entries
        .iter()
        .filter(|(l, _)| l.as_deref() == Some(lang))
        .map(|(_, v)| v)
        .collect();
    if !requested.is_empty() {
        out.extend(requested.into_iter().cloned());
    } else if lang != default {
        out.extend(
            entries
                .iter()
                .filter(|(l, _)| l.as_deref() == Some(default))
                .map(|(_, v)| v.clone()),
        );
    }

    out
}

impl<E> EntityView<E> {
    /// Assemble a view from an entity and its facet rows.
    ///
    /// Rows are expected in composite-key order, as the facet stores return
    /// them; grouping preserves that order within each attribute.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        entity: E,
        strings: Vec<StringValue>,
        points: Vec<PointValue>,
        descriptions: Vec<DescriptionValue>,
        counters: Vec<CounterValue>,
        files: Vec<FileValue>,
        permissions: Vec<Permission>,
        flags: Vec<StatusFlag>,
        options: &ViewOptions,
        default_language: &str,
    ) -> Self {
        let lang = options.lang.as_deref().unwrap_or(default_language);

        // BTreeMap gives key-ordered grouping before the final IndexMap.
        let mut grouped: BTreeMap<String, AttributeView> = BTreeMap::new();

        let mut localized_strings: BTreeMap<String, Vec<(Option<String>, String)>> =
            BTreeMap::new();
        for row in strings {
            localized_strings
                .entry(row.attribute)
                .or_default()
                .push((row.lang, row.value));
        }
        for (attribute, entries) in localized_strings {
            grouped.entry(attribute).or_default().strings =
                select_localized(&entries, lang, default_language);
        }

        let mut localized_descriptions: BTreeMap<String, Vec<(Option<String>, String)>> =
            BTreeMap::new();
        for row in descriptions {
            localized_descriptions
                .entry(row.attribute)
                .or_default()
                .push((row.lang, row.value));
        }
        for (attribute, entries) in localized_descriptions {
            grouped.entry(attribute).or_default().descriptions =
                select_localized(&entries, lang, default_language);
        }

        for row in points {
            grouped.entry(row.attribute).or_default().points.push(row.point);
        }
        for row in counters {
            grouped
                .entry(row.attribute)
                .or_default()
                .counters
                .push(CounterView {
                    count: row.count,
                    measure: row.measure,
                });
        }
        for row in files {
            grouped.entry(row.attribute).or_default().files.push(row.file);
        }

        // Attributes whose only values fell out of the language selection
        // disappear from the view entirely.
        let attributes: IndexMap<String, AttributeView> = grouped
            .into_iter()
            .filter(|(_, view)| !view.is_empty())
            .collect();

        Self {
            entity,
            attributes,
            permissions: permissions
                .into_iter()
                .map(|grant| PermissionView {
                    group: grant.group,
                    method: grant.method,
                })
                .collect(),
            flags: flags.into_iter().map(|flag| flag.status).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::{CounterInput, PointInput, StringInput};
    use crate::core::entity::EntityRef;
    use crate::core::flag::FlagInput;
    use crate::core::permission::PermissionInput;
    use crate::core::reconcile::FacetRow;
    use crate::entities::Directory;
    use uuid::Uuid;

    fn owner() -> EntityRef {
        EntityRef::new("directory", "CITIES")
    }

    fn string_row(attribute: &str, lang: Option<&str>, value: &str) -> StringValue {
        let mut input = StringInput::new(attribute, value);
        if let Some(lang) = lang {
            input = input.with_lang(lang);
        }
        StringValue::from_input(Uuid::new_v4(), &owner(), input)
    }

    fn assemble_strings(strings: Vec<StringValue>, options: &ViewOptions) -> EntityView<Directory> {
        EntityView::assemble(
            Directory::new(Uuid::new_v4(), "CITIES"),
            strings,
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            options,
            "EN",
        )
    }

    #[test]
    fn test_requested_language_selected() {
        let view = assemble_strings(
            vec![
                string_row("NAME", Some("EN"), "London"),
                string_row("NAME", Some("FR"), "Londres"),
            ],
            &ViewOptions::new().with_lang("FR"),
        );

        assert_eq!(view.attributes["NAME"].strings, vec!["Londres"]);
    }

    #[test]
    fn test_falls_back_to_default_language() {
        let view = assemble_strings(
            vec![string_row("NAME", Some("EN"), "London")],
            &ViewOptions::new().with_lang("FR"),
        );

        assert_eq!(view.attributes["NAME"].strings, vec!["London"]);
    }

    #[test]
    fn test_neutral_values_always_included() {
        let view = assemble_strings(
            vec![
                string_row("CODE", None, "LDN"),
                string_row("CODE", Some("FR"), "LDR"),
            ],
            &ViewOptions::new().with_lang("DE"),
        );

        // No DE value and no EN fallback value; neutral survives
        assert_eq!(view.attributes["CODE"].strings, vec!["LDN"]);
    }

    #[test]
    fn test_no_lang_option_uses_default_language() {
        let view = assemble_strings(
            vec![
                string_row("NAME", Some("EN"), "London"),
                string_row("NAME", Some("FR"), "Londres"),
            ],
            &ViewOptions::new(),
        );

        assert_eq!(view.attributes["NAME"].strings, vec!["London"]);
    }

    #[test]
    fn test_attribute_with_no_visible_values_is_dropped() {
        let view = assemble_strings(
            vec![string_row("NAME", Some("FR"), "Londres")],
            &ViewOptions::new().with_lang("DE"),
        );

        assert!(view.attributes.is_empty());
    }

    #[test]
    fn test_families_grouped_under_one_attribute_key() {
        let tenant_id = Uuid::new_v4();
        let view = EntityView::assemble(
            Directory::new(tenant_id, "CITIES"),
            vec![string_row("NAME", None, "Cities")],
            vec![PointValue::from_input(
                tenant_id,
                &owner(),
                PointInput::new("CAPITAL", "LONDON"),
            )],
            vec![],
            vec![CounterValue::from_input(
                tenant_id,
                &owner(),
                CounterInput::new("CAPITAL", 1),
            )],
            vec![],
            vec![Permission::from_input(
                tenant_id,
                &owner(),
                PermissionInput::new("admin", AccessMethod::All),
            )],
            vec![StatusFlag::from_input(
                tenant_id,
                &owner(),
                FlagInput::new("PUBLISHED"),
            )],
            &ViewOptions::new(),
            "EN",
        );

        // Key-ordered attribute map
        let keys: Vec<&String> = view.attributes.keys().collect();
        assert_eq!(keys, vec!["CAPITAL", "NAME"]);

        let capital = &view.attributes["CAPITAL"];
        assert_eq!(capital.points, vec!["LONDON"]);
        assert_eq!(capital.counters, vec![CounterView { count: 1, measure: None }]);

        assert_eq!(view.permissions.len(), 1);
        assert_eq!(view.flags, vec!["PUBLISHED"]);
    }

    #[test]
    fn test_view_serialization_flattens_entity() {
        let view = assemble_strings(
            vec![string_row("NAME", None, "Cities")],
            &ViewOptions::new(),
        );

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["key"], "CITIES");
        assert_eq!(json["attributes"]["NAME"]["strings"][0], "Cities");
        // Empty families are omitted from the attribute object
        assert!(json["attributes"]["NAME"].get("points").is_none());
    }
}
