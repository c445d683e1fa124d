//! Sub-model name collision resolution.
//!
//! Resolution is a pure function of an [`Extraction`]: it returns a
//! [`NameResolution`] mapping every sub-model path to its final name, and
//! applying that map yields a renamed copy of the tree. Paths never change.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::case::to_upper_camel_case;
use crate::schema::{Extraction, Field, Model, ModelPath};

/// Final name of every sub-model, keyed by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameResolution {
    names: IndexMap<ModelPath, String>,
}

impl NameResolution {
    pub fn get(&self, path: &ModelPath) -> Option<&str> {
        self.names.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModelPath, &str)> {
        self.names.iter().map(|(p, n)| (p, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Copy of `extraction` with model names and field references rewritten
    pub fn apply(&self, extraction: &Extraction) -> Extraction {
        Extraction {
            fields: self.rename_fields(&extraction.fields),
            enum_fields: extraction.enum_fields.clone(),
            sub_models: extraction
                .sub_models
                .iter()
                .map(|m| self.rename_model(m))
                .collect(),
        }
    }

    fn rename_model(&self, model: &Model) -> Model {
        Model {
            name: self
                .get(&model.path)
                .map_or_else(|| model.name.clone(), String::from),
            path: model.path.clone(),
            fields: self.rename_fields(&model.fields),
            enum_fields: model.enum_fields.clone(),
            sub_models: model
                .sub_models
                .iter()
                .map(|m| self.rename_model(m))
                .collect(),
        }
    }

    fn rename_fields(&self, fields: &[Field]) -> Vec<Field> {
        fields
            .iter()
            .map(|field| {
                let mut field = field.clone();
                let renamed = field
                    .type_
                    .sub_model_path()
                    .and_then(|path| self.get(path))
                    .map(String::from);
                if let Some(name) = renamed {
                    field.type_.rename_sub_model(&name);
                }
                field
            })
            .collect()
    }
}

/// Assign distinct names to the sub-models of one artifact.
///
/// Sub-models are grouped by name in first-seen order. Names held by a single
/// model are reserved first. In a larger group the first model keeps the name
/// when it is still free, the others try `Module + Name`, then
/// `Module + Parent + Name`, then that last candidate with a numeric suffix
/// starting at 2.
pub fn resolve(extraction: &Extraction, module: &str) -> NameResolution {
    let models = extraction.all_sub_models();
    let mut groups: IndexMap<&str, Vec<&ModelPath>> = IndexMap::new();
    for model in &models {
        groups
            .entry(model.name.as_str())
            .or_default()
            .push(&model.path);
    }

    let mut used: HashSet<String> = HashSet::new();
    let mut names: IndexMap<ModelPath, String> = IndexMap::new();
    for (name, paths) in &groups {
        if let [path] = paths.as_slice() {
            used.insert(name.to_string());
            names.insert((*path).clone(), name.to_string());
        }
    }

    let module = to_upper_camel_case(module);
    for (name, paths) in groups.iter().filter(|(_, paths)| paths.len() > 1) {
        for (index, path) in paths.iter().enumerate() {
            let final_name = if index == 0 && !used.contains(*name) {
                name.to_string()
            } else {
                disambiguate(name, path, &module, &used)
            };
            if final_name != *name {
                log::debug!("Renamed sub-model '{}' at '{}' to '{}'", name, path, final_name);
            }
            used.insert(final_name.clone());
            names.insert((*path).clone(), final_name);
        }
    }

    // Keep the map in tree order
    let names = models
        .iter()
        .filter_map(|m| names.get(&m.path).map(|n| (m.path.clone(), n.clone())))
        .collect();
    NameResolution { names }
}

fn disambiguate(name: &str, path: &ModelPath, module: &str, used: &HashSet<String>) -> String {
    let mut candidate = format!("{module}{name}");
    if !used.contains(&candidate) {
        return candidate;
    }
    if let Some(parent) = path.parent_segment() {
        candidate = format!("{module}{}{name}", to_upper_camel_case(parent));
        if !used.contains(&candidate) {
            return candidate;
        }
    }
    // `used` is finite, so this terminates
    let mut suffix = 2;
    loop {
        let numbered = format!("{candidate}{suffix}");
        if !used.contains(&numbered) {
            return numbered;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeDescriptor;

    fn model(path: &[&str], name: &str, sub_models: Vec<Model>) -> Model {
        let path: ModelPath = path.iter().collect();
        let fields = sub_models
            .iter()
            .map(|m| {
                let segment = m.path.segments().last().cloned().unwrap_or_default();
                Field::new(segment, sub_model_type(m))
            })
            .collect();
        Model {
            name: name.into(),
            path,
            fields,
            enum_fields: Vec::new(),
            sub_models,
        }
    }

    fn sub_model_type(m: &Model) -> TypeDescriptor {
        TypeDescriptor::SubModel {
            path: m.path.clone(),
            name: m.name.clone(),
        }
    }

    fn extraction(sub_models: Vec<Model>) -> Extraction {
        Extraction {
            fields: sub_models
                .iter()
                .map(|m| Field::new(m.path.to_string(), sub_model_type(m)))
                .collect(),
            enum_fields: Vec::new(),
            sub_models,
        }
    }

    #[test]
    fn test_module_prefix_for_second_member() {
        let tree = extraction(vec![
            model(&["billing_address"], "BillingAddress", vec![]),
            model(
                &["card"],
                "Card",
                vec![model(&["card", "billing_address"], "BillingAddress", vec![])],
            ),
        ]);
        let resolution = resolve(&tree, "customer");
        let first: ModelPath = ["billing_address"].into_iter().collect();
        let second: ModelPath = ["card", "billing_address"].into_iter().collect();
        assert_eq!(resolution.get(&first), Some("BillingAddress"));
        assert_eq!(resolution.get(&second), Some("CustomerBillingAddress"));
        assert_eq!(resolution.len(), 3);
    }

    #[test]
    fn test_parent_segment_then_numeric_suffix() {
        let tree = extraction(vec![
            model(&["address"], "Address", vec![]),
            model(&["shipping"], "Shipping", vec![model(&["shipping", "address"], "Address", vec![])]),
            model(&["billing"], "Billing", vec![model(&["billing", "address"], "Address", vec![])]),
            model(
                &["other"],
                "Other",
                vec![model(
                    &["other", "billing"],
                    "OtherBilling",
                    vec![model(&["other", "billing", "address"], "Address", vec![])],
                )],
            ),
        ]);
        let resolution = resolve(&tree, "order");
        let names: Vec<&str> = ["address", "shipping_address", "billing_address", "other_billing_address"]
            .iter()
            .map(|joined| {
                resolution
                    .iter()
                    .find(|(p, _)| p.to_string() == *joined)
                    .map(|(_, n)| n)
                    .unwrap()
            })
            .collect();
        assert_eq!(
            names,
            vec!["Address", "OrderAddress", "OrderBillingAddress", "OrderBillingAddress2"]
        );
    }

    #[test]
    fn test_singletons_are_reserved_before_groups() {
        // "CustomerItem" already exists, so the second "Item" skips that candidate
        let tree = extraction(vec![
            model(&["item"], "Item", vec![]),
            model(&["bundle"], "Bundle", vec![model(&["bundle", "item"], "Item", vec![])]),
            model(&["customer_item"], "CustomerItem", vec![]),
        ]);
        let resolution = resolve(&tree, "customer");
        let nested: ModelPath = ["bundle", "item"].into_iter().collect();
        assert_eq!(resolution.get(&nested), Some("CustomerBundleItem"));
    }

    #[test]
    fn test_large_groups_get_distinct_names() {
        let subs: Vec<Model> = (0..25)
            .map(|i| {
                let parent = format!("p{i}");
                model(
                    &[parent.as_str()],
                    &format!("P{i}"),
                    vec![model(&[parent.as_str(), "meta"], "Meta", vec![])],
                )
            })
            .collect();
        let tree = extraction(subs);
        let resolution = resolve(&tree, "");
        let metas: HashSet<&str> = resolution
            .iter()
            .filter(|(p, _)| p.segments().last().map(String::as_str) == Some("meta"))
            .map(|(_, n)| n)
            .collect();
        assert_eq!(metas.len(), 25);
    }

    #[test]
    fn test_apply_rewrites_references_and_keeps_paths() {
        let tree = extraction(vec![
            model(&["billing_address"], "BillingAddress", vec![]),
            model(
                &["card"],
                "Card",
                vec![model(&["card", "billing_address"], "BillingAddress", vec![])],
            ),
        ]);
        let renamed = resolve(&tree, "customer").apply(&tree);

        let card = &renamed.sub_models[1];
        let nested = &card.sub_models[0];
        assert_eq!(nested.name, "CustomerBillingAddress");
        assert_eq!(nested.path, tree.sub_models[1].sub_models[0].path);
        assert_eq!(
            card.fields[0].type_,
            TypeDescriptor::SubModel {
                path: nested.path.clone(),
                name: "CustomerBillingAddress".into()
            }
        );

        // every reference points at an existing path
        let all = renamed.all_sub_models();
        let paths: HashSet<&ModelPath> = all.iter().map(|m| &m.path).collect();
        for model in &all {
            for field in &model.fields {
                if let Some(path) = field.type_.sub_model_path() {
                    assert!(paths.contains(path));
                }
            }
        }
    }
}
