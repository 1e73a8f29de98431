//! Reachability over the undirected join graph.

use std::collections::HashSet;

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;

use crate::model::Join;

/// Tables reachable from `root` over `joins`, including `root` itself.
pub(super) fn reachable_from<'a, I>(root: &'a str, joins: I) -> HashSet<&'a str>
where
    I: IntoIterator<Item = &'a Join>,
{
    let mut graph: UnGraphMap<&str, ()> = UnGraphMap::new();
    graph.add_node(root);
    for join in joins {
        graph.add_edge(join.left_table.as_str(), join.right_table.as_str(), ());
    }

    let mut bfs = Bfs::new(&graph, root);
    let mut seen = HashSet::new();
    while let Some(node) = bfs.next(&graph) {
        seen.insert(node);
    }
    seen
}

/// Tables that lose their path to `root` when moving from `before` to `after`.
///
/// `order` fixes the output order (table insertion order).
pub(super) fn detached<'a>(
    order: impl IntoIterator<Item = &'a str>,
    before: &HashSet<&str>,
    after: &HashSet<&str>,
) -> Vec<String> {
    order
        .into_iter()
        .filter(|t| before.contains(t) && !after.contains(t))
        .map(str::to_string)
        .collect()
}
