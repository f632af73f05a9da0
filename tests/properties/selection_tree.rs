//! Property tests for the selection tree.

use std::collections::HashSet;

use proptest::prelude::*;

use archsecure::domain::selection::{LevelId, NodeId, NodeKind, OptionSpec, SelectionTree};

#[derive(Debug, Clone)]
enum Shape {
    Checkbox,
    Radio,
    Group(Vec<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![Just(Shape::Checkbox), Just(Shape::Radio)];
    leaf.prop_recursive(3, 24, 4, |inner| {
        proptest::collection::vec(inner, 1..4).prop_map(Shape::Group)
    })
}

fn forest() -> impl Strategy<Value = Vec<Shape>> {
    proptest::collection::vec(shape(), 1..5)
}

/// (level pick, position pick) pairs, reduced modulo the actual sizes
fn ops() -> impl Strategy<Value = Vec<(usize, usize)>> {
    proptest::collection::vec((0usize..64, 0usize..64), 0..40)
}

fn to_specs(shapes: &[Shape], next: &mut usize) -> Vec<OptionSpec> {
    shapes
        .iter()
        .map(|shape| {
            *next += 1;
            let label = format!("option {}", next);
            match shape {
                Shape::Checkbox => OptionSpec::checkbox(label),
                Shape::Radio => OptionSpec::radio(label),
                Shape::Group(children) => OptionSpec::group(label, to_specs(children, next)),
            }
        })
        .collect()
}

fn build(shapes: &[Shape]) -> SelectionTree {
    SelectionTree::build(&to_specs(shapes, &mut 0)).unwrap()
}

fn levels(tree: &SelectionTree) -> Vec<LevelId> {
    let mut out = vec![tree.root()];
    let mut i = 0;
    while i < out.len() {
        for &id in tree.level(out[i]).nodes() {
            if let NodeKind::Group(child) = tree.node(id).kind() {
                out.push(child);
            }
        }
        i += 1;
    }
    out
}

fn all_nodes(tree: &SelectionTree) -> Vec<NodeId> {
    levels(tree)
        .into_iter()
        .flat_map(|level| tree.level(level).nodes().to_vec())
        .collect()
}

fn apply_toggles(tree: &mut SelectionTree, ops: &[(usize, usize)]) {
    let levels = levels(tree);
    for &(l, p) in ops {
        let level = levels[l % levels.len()];
        let len = tree.level(level).len();
        tree.toggle(level, p % len);
    }
}

fn ancestors(tree: &SelectionTree, id: NodeId) -> HashSet<NodeId> {
    let mut out = HashSet::new();
    let mut level = Some(tree.node(id).level());
    while let Some(l) = level {
        if let Some(owner) = tree.level(l).owner() {
            out.insert(owner);
        }
        level = tree.level(l).parent();
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a group is effectively checked iff one of its non-terminal children is.
    #[test]
    fn property_group_is_or_of_children(shapes in forest(), ops in ops()) {
        let mut tree = build(&shapes);
        apply_toggles(&mut tree, &ops);

        for id in all_nodes(&tree) {
            if let NodeKind::Group(child) = tree.node(id).kind() {
                let any = tree
                    .level(child)
                    .nodes()
                    .iter()
                    .filter(|&&c| tree.node(c).kind() != NodeKind::Terminal)
                    .any(|&c| tree.effective_checked(c));
                prop_assert_eq!(tree.effective_checked(id), any);
            }
        }
    }

    /// PROPERTY: at most one radio is checked per level after any toggles.
    #[test]
    fn property_radio_exclusive(shapes in forest(), ops in ops()) {
        let mut tree = build(&shapes);
        apply_toggles(&mut tree, &ops);

        for level in levels(&tree) {
            let checked = tree
                .level(level)
                .nodes()
                .iter()
                .filter(|&&id| tree.node(id).kind() == NodeKind::Radio && tree.node(id).checked())
                .count();
            prop_assert!(checked <= 1);
        }
    }

    /// PROPERTY: toggling a checkbox changes only it and its ancestors.
    #[test]
    fn property_checkbox_toggle_is_local(shapes in forest(), ops in ops(), pick in 0usize..64) {
        let mut tree = build(&shapes);
        apply_toggles(&mut tree, &ops);

        let checkboxes: Vec<NodeId> = all_nodes(&tree)
            .into_iter()
            .filter(|&id| tree.node(id).kind() == NodeKind::Checkbox)
            .collect();
        prop_assume!(!checkboxes.is_empty());
        let target = checkboxes[pick % checkboxes.len()];
        let level = tree.node(target).level();
        let position = tree.level(level).nodes().iter().position(|&id| id == target).unwrap();

        let nodes = all_nodes(&tree);
        let before: Vec<bool> = nodes.iter().map(|&id| tree.effective_checked(id)).collect();
        tree.toggle(level, position);
        let allowed = ancestors(&tree, target);

        for (i, &id) in nodes.iter().enumerate() {
            if tree.effective_checked(id) != before[i] {
                prop_assert!(id == target || allowed.contains(&id));
            }
        }
        prop_assert_ne!(tree.effective_checked(target), before[nodes.iter().position(|&id| id == target).unwrap()]);
    }

    /// PROPERTY: the cursor never leaves the level.
    #[test]
    fn property_navigate_clamps(shapes in forest(), deltas in proptest::collection::vec(-5isize..=5, 0..30)) {
        let mut tree = build(&shapes);
        let root = tree.root();
        let len = tree.level(root).len();

        for delta in deltas {
            tree.navigate(root, delta);
            prop_assert!(tree.level(root).position() < len);
        }
        tree.navigate(root, isize::MIN);
        prop_assert_eq!(tree.level(root).position(), 0);
        tree.navigate(root, -1);
        prop_assert_eq!(tree.level(root).position(), 0);
        tree.navigate(root, isize::MAX);
        prop_assert_eq!(tree.level(root).position(), len - 1);
    }

    /// PROPERTY: rebuilding from an export never duplicates synthesized nodes.
    #[test]
    fn property_rebuild_is_stable(shapes in forest(), ops in ops()) {
        let mut tree = build(&shapes);
        apply_toggles(&mut tree, &ops);

        let exported = tree.to_specs();
        let rebuilt = SelectionTree::build(&exported).unwrap();
        prop_assert_eq!(rebuilt.to_specs(), exported);
        prop_assert_eq!(rebuilt.checked_labels(), tree.checked_labels());

        for level in levels(&rebuilt) {
            let nodes = rebuilt.level(level).nodes();
            let terminals = nodes
                .iter()
                .filter(|&&id| rebuilt.node(id).kind() == NodeKind::Terminal)
                .count();
            if rebuilt.level(level).is_root() {
                prop_assert_eq!(terminals, 0);
                prop_assert_eq!(nodes.len(), shapes.len() + 2);
            } else {
                prop_assert_eq!(terminals, 1);
                prop_assert_eq!(rebuilt.node(*nodes.last().unwrap()).kind(), NodeKind::Terminal);
            }
        }
    }
}
