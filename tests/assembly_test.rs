//! Tree assembly from flat entity lists, as handed over by a scraper.

use decl_tree::*;

fn entity_names(tree: &NamespaceTree, node: NodeId) -> Vec<String> {
    tree.node(node)
        .unwrap()
        .entities
        .iter()
        .map(|&id| tree.entity(id).unwrap().name.clone())
        .collect()
}

#[test]
fn test_root_level_entities() {
    let tree = NamespaceTree::assemble([Entity::class("A"), Entity::interface("IB")]);

    assert_eq!(entity_names(&tree, NodeId::ROOT), ["A", "IB"]);
    assert!(tree.root().children.is_empty());
}

#[test]
fn test_dotted_path_builds_chain() {
    let tree = NamespaceTree::assemble([Entity::class("C").in_namespace("A.B")]);

    let a = tree.find_child(NodeId::ROOT, "A").unwrap();
    let b = tree.find_child(a, "B").unwrap();
    assert_eq!(entity_names(&tree, b), ["C"]);
    assert_eq!(tree.node(b).unwrap().parent, Some(a));
    assert_eq!(tree.node(a).unwrap().parent, Some(NodeId::ROOT));
}

#[test]
fn test_reinserting_is_idempotent() {
    let mut tree = NamespaceTree::new();
    let entity = Entity::class("Same").in_namespace("Ns");

    tree.insert(entity.clone());
    tree.insert(entity.clone());
    tree.insert(entity);

    let ns = tree.node_by_path("Ns").unwrap();
    assert_eq!(tree.node(ns).unwrap().entities.len(), 1);
    assert_eq!(tree.root().children.len(), 1);
}

#[test]
fn test_parent_reference_is_resolved() {
    let tree = NamespaceTree::assemble([
        Entity::class("ParentClass"),
        Entity::class("ChildClass")
            .in_namespace("Ns")
            .extends("ParentClass"),
    ]);

    let parent = tree.find_entity(NodeId::ROOT, "ParentClass");
    assert!(parent.is_some(), "Parent class can't be inserted into proper namespace.");

    let ns = tree.find_child(NodeId::ROOT, "Ns").unwrap();
    let child = tree.find_entity(ns, "ChildClass");
    assert!(child.is_some(), "Child class can't be inserted into proper namespace.");

    assert_eq!(
        tree.parent_of(child.unwrap()),
        tree.entity(parent.unwrap()),
        "Child class doesn't have proper parent class"
    );
}

#[test]
fn test_entities_from_json() {
    let json = r#"[
        { "name": "Base" },
        { "name": "Widget", "namespace": "Ui", "parent": "Base" },
        { "name": "Widget", "namespace": "Ui" },
        { "name": "IClickable", "kind": "interface", "namespace": "Ui.Input" }
    ]"#;
    let entities: Vec<Entity> = serde_json::from_str(json).unwrap();
    let tree = NamespaceTree::assemble(entities);

    // The second Widget is a duplicate and dropped.
    assert_eq!(tree.len(), 3);
    let input = tree.node_by_path("Ui.Input").unwrap();
    let clickable = tree.find_entity(input, "IClickable").unwrap();
    assert_eq!(tree.entity(clickable).unwrap().kind, EntityKind::Interface);
    assert_eq!(
        tree.qualified_name(clickable).as_deref(),
        Some("Ui.Input.IClickable")
    );
}

#[test]
fn test_depth_is_tracked_per_node() {
    let tree = NamespaceTree::assemble([Entity::class("Leaf").in_namespace("L1.L2.L3")]);

    for (path, depth) in [("", 0), ("L1", 1), ("L1.L2", 2), ("L1.L2.L3", 3)] {
        let node = tree.node_by_path(path).unwrap();
        assert_eq!(tree.node(node).unwrap().depth, depth, "depth of '{}'", path);
    }
}
