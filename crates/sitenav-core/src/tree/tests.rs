use super::*;
use crate::config::{SortScope, UnpositionedOrder};
use crate::model::{find_in_forest, forest_len, PathRecord};
use std::collections::HashSet;

fn store_of(records: Vec<(&str, PathRecord)>) -> PageStore {
    records
        .into_iter()
        .map(|(k, r)| (k.to_string(), r))
        .collect()
}

fn page(path: &str, title: &str, position: f64) -> PathRecord {
    PathRecord::new(path)
        .with_title(title)
        .with_identifier(title.to_lowercase())
        .with_position(position)
}

fn root_titles(forest: &[TreeNode]) -> Vec<&str> {
    forest.iter().map(|n| n.title.as_str()).collect()
}

#[test]
fn test_empty_listing_builds_empty_forest() {
    let forest = build_forest(&PageStore::new(), 0);
    assert!(forest.is_empty());
}

#[test]
fn test_parent_and_child_with_start_depth() {
    let store = store_of(vec![
        ("a", page("/s/a", "A", 1.0)),
        ("b", page("/s/a/b", "B", 2.0)),
    ]);

    let forest = build_forest(&store, 1);

    assert_eq!(forest.len(), 1);
    let root = &forest[0];
    assert_eq!(root.path, "/s/a");
    assert_eq!(root.title, "A");
    assert_eq!(root.id, "a");
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].path, "/s/a/b");
    assert_eq!(root.children[0].title, "B");
    assert!(root.children[0].children.is_empty());
}

#[test]
fn test_reserved_container_segments_are_not_nodes() {
    let store = store_of(vec![
        ("about", page("/site/about", "About", 1.0)),
        ("team", page("/site/about/_pages/team", "Team", 1.0)),
        ("jobs", page("/site/about/_pages/jobs", "Jobs", 2.0)),
    ]);

    let forest = build_forest(&store, 1);

    assert_eq!(forest.len(), 1);
    let about = &forest[0];
    let children: Vec<&str> = about.children.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(
        children,
        vec!["/site/about/_pages/jobs", "/site/about/_pages/team"]
    );
    assert!(find_in_forest(&forest, "/site/about/_pages").is_none());
}

#[test]
fn test_every_segment_appears_exactly_once() {
    let store = store_of(vec![
        ("x", page("/s/a/_pages/b/_pages/c", "C", 3.0)),
        ("y", page("/s/a/_pages/b", "B", 2.0)),
        ("z", page("/s/a", "A", 1.0)),
        ("w", page("/s/d/_pages/e", "E", 4.0)),
    ]);

    let forest = build_forest(&store, 1);

    let mut seen = Vec::new();
    for root in &forest {
        root.walk(&mut |n| seen.push(n.path.clone()));
    }
    let unique: HashSet<&String> = seen.iter().collect();
    assert_eq!(seen.len(), unique.len(), "duplicate nodes: {:?}", seen);

    let expected: HashSet<String> = [
        "/s/a",
        "/s/a/_pages/b",
        "/s/a/_pages/b/_pages/c",
        "/s/d",
        "/s/d/_pages/e",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(unique.into_iter().cloned().collect::<HashSet<_>>(), expected);
    assert_eq!(forest_len(&forest), 5);
}

#[test]
fn test_missing_intermediate_record_yields_empty_node() {
    let store = store_of(vec![("deep", page("/s/ghost/_pages/deep", "Deep", 1.0))]);

    let forest = build_forest(&store, 1);

    assert_eq!(forest.len(), 1);
    let ghost = &forest[0];
    assert_eq!(ghost.path, "/s/ghost");
    assert_eq!(ghost.title, "");
    assert_eq!(ghost.id, "");
    assert_eq!(ghost.position, None);
    assert_eq!(ghost.children[0].title, "Deep");
}

#[test]
fn test_roots_are_exactly_parentless_nodes() {
    let store = store_of(vec![
        ("a", page("/s/a", "A", 2.0)),
        ("b", page("/s/a/_pages/b", "B", 1.0)),
        ("c", page("/s/c", "C", 1.0)),
    ]);
    let config = NavigationConfig::default().with_start_depth(1);
    let resolver = PagesResolver::from_config(&config.hierarchy);
    let builder = ForestBuilder::from_config(&resolver, &config);

    let sequences = builder.prefix_sequences(&store);
    let (arena, diagnostics) = builder.arena(&sequences);
    assert!(diagnostics.is_empty());

    let child_of_someone: HashSet<NodeIdx> = (0..arena.len())
        .flat_map(|idx| arena.children(idx).to_vec())
        .collect();
    for idx in 0..arena.len() {
        let is_root = arena.roots().contains(&idx);
        assert_eq!(is_root, !child_of_someone.contains(&idx), "{}", arena.prefix(idx));
    }
    let b = arena.lookup("/s/a/_pages/b").unwrap();
    assert_eq!(arena.parent(b), arena.lookup("/s/a"));
}

#[test]
fn test_roots_sorted_by_position_children_by_registration() {
    let store = store_of(vec![
        ("late", page("/s/late", "Late", 30.0)),
        ("early", page("/s/early", "Early", 10.0)),
        ("mid", page("/s/mid", "Mid", 20.0)),
        ("z", page("/s/mid/_pages/z", "Z", 1.0)),
        ("y", page("/s/mid/_pages/y", "Y", 2.0)),
    ]);

    let forest = build_forest(&store, 1);

    assert_eq!(root_titles(&forest), vec!["Early", "Mid", "Late"]);
    // Default scope leaves children in sequence order
    assert_eq!(root_titles(&forest[1].children), vec!["Y", "Z"]);
}

#[test]
fn test_recursive_scope_sorts_children() {
    let store = store_of(vec![
        ("mid", page("/s/mid", "Mid", 20.0)),
        ("z", page("/s/mid/_pages/z", "Z", 1.0)),
        ("y", page("/s/mid/_pages/y", "Y", 2.0)),
    ]);
    let config = NavigationConfig::default()
        .with_start_depth(1)
        .with_sort(SortScope::Recursive, UnpositionedOrder::Anchored);
    let resolver = PagesResolver::from_config(&config.hierarchy);

    let report = ForestBuilder::from_config(&resolver, &config).build(&store);

    assert_eq!(root_titles(&report.forest[0].children), vec!["Z", "Y"]);
}

#[test]
fn test_titles_are_sanitized() {
    let store = store_of(vec![(
        "x",
        PathRecord::new("/s/x").with_title("<img src=x onerror=alert(1)>"),
    )]);

    let forest = build_forest(&store, 1);

    assert!(!forest[0].title.contains('<'));
    assert!(forest[0].title.starts_with("&lt;img"));
}

#[test]
fn test_records_without_path_are_skipped() {
    let store = store_of(vec![
        ("nopath", PathRecord::default().with_title("Lost")),
        ("empty", PathRecord::new("").with_title("Empty")),
        ("ok", page("/s/ok", "Ok", 1.0)),
    ]);

    let forest = build_forest(&store, 1);

    assert_eq!(root_titles(&forest), vec!["Ok"]);
}

#[test]
fn test_start_depth_past_path_contributes_nothing() {
    let store = store_of(vec![
        ("short", page("/s", "Short", 1.0)),
        ("long", page("/s/a/b", "B", 1.0)),
    ]);

    let forest = build_forest(&store, 2);

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].path, "/s/a/b");
}

/// Resolver returning hand-written sequences, for malformed hierarchies
struct ScriptedResolver;

impl PathResolver for ScriptedResolver {
    fn node_prefixes(&self, path: &str) -> Vec<PathPrefix> {
        path.split(' ').map(str::to_string).collect()
    }

    fn reserved_segment(&self) -> &str {
        "_pages"
    }
}

#[test]
fn test_cycle_is_reported_and_edge_dropped() {
    let store = store_of(vec![
        ("1", PathRecord::new("a b")),
        ("2", PathRecord::new("b c")),
        ("3", PathRecord::new("c a")),
    ]);
    let builder = ForestBuilder::new(&ScriptedResolver, SortConfig::default());

    let report = builder.build(&store);

    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0],
        NavError::CycleDetected { parent, child } if parent == "c" && child == "a"
    ));
    assert_eq!(report.forest.len(), 1);
    assert_eq!(report.forest[0].path, "a");
    assert_eq!(forest_len(&report.forest), 3);
}

#[test]
fn test_self_parent_is_a_cycle() {
    let mut arena = PrefixArena::new();
    let a = arena.intern("a");
    assert!(matches!(
        arena.link(a, a),
        Err(NavError::CycleDetected { .. })
    ));
}

#[test]
fn test_second_parent_is_reported() {
    let store = store_of(vec![
        ("1", PathRecord::new("a c")),
        ("2", PathRecord::new("b c")),
    ]);
    let builder = ForestBuilder::new(&ScriptedResolver, SortConfig::default());

    let report = builder.build(&store);

    assert!(matches!(
        &report.diagnostics[..],
        [NavError::ConflictingParent { child, existing, parent }]
            if child == "c" && existing == "a" && parent == "b"
    ));
    assert_eq!(root_titles(&report.forest).len(), 2);
    let a = find_in_forest(&report.forest, "a").unwrap();
    assert_eq!(a.children.len(), 1);
    assert!(find_in_forest(&report.forest, "b").unwrap().children.is_empty());
}

#[test]
fn test_duplicate_edges_are_noops() {
    let mut arena = PrefixArena::new();
    let a = arena.intern("a");
    let b = arena.intern("b");
    arena.link(a, b).unwrap();
    arena.link(a, b).unwrap();
    assert_eq!(arena.intern("b"), b);
    assert_eq!(arena.children(a), &[b]);
}

#[test]
fn test_deep_path_builds_full_chain() {
    let depth = 2000;
    let path = format!("/s{}", "/d".repeat(depth));
    let store = store_of(vec![("deep", page(&path, "Deep", 1.0))]);

    let forest = build_forest(&store, 1);

    assert_eq!(forest.len(), 1);
    let mut node = &forest[0];
    let mut levels = 1;
    while let Some(child) = node.children.first() {
        assert_eq!(node.children.len(), 1);
        node = child;
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(node.title, "Deep");
    assert_eq!(node.path, path);
}
