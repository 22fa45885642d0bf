//! Reconstruction of every shortest path from a predecessor structure.

use crate::graph::NodeIndex;
use crate::path::ShortestPaths;

/// Paths recovered from a shortest-path DAG.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    /// Paths ordered from origin to destination.
    pub paths: Vec<Vec<NodeIndex>>,
    /// Set when enumeration stopped at the configured cap.
    pub truncated: bool,
}

impl PathSet {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

/// Enumerate every shortest path from `origin` to `destination`.
///
/// Walks the predecessor sets of `search` backwards from `destination`,
/// branching wherever a node has several predecessors. Branches that run out
/// of predecessors before reaching `origin` are dropped. A predecessor already
/// on the current branch is skipped, which keeps paths simple even when
/// zero-weight edges put cycles into the predecessor relation.
///
/// `search` does not need to originate at `origin`; the router uses a search
/// rooted at the destination to enumerate backward sub-paths.
///
/// With `limit = Some(n)` at most `n` paths are returned and
/// [`PathSet::truncated`] reports whether more existed.
pub fn enumerate_paths(
    search: &ShortestPaths,
    origin: NodeIndex,
    destination: NodeIndex,
    limit: Option<usize>,
) -> PathSet {
    let mut result = PathSet::default();
    if limit == Some(0) {
        result.truncated = true;
        return result;
    }

    if destination == origin {
        result.paths.push(vec![origin]);
        return result;
    }

    let node_count = search.distances().len();
    if destination >= node_count || origin >= node_count {
        return result;
    }

    // Each frame is a node on the current branch plus the next predecessor to try.
    let mut stack: Vec<(NodeIndex, usize)> = vec![(destination, 0)];
    let mut on_branch = vec![false; node_count];
    on_branch[destination] = true;

    while let Some(frame) = stack.last_mut() {
        let (node, next_pred) = *frame;

        if node == origin {
            if limit.is_some_and(|cap| result.paths.len() >= cap) {
                result.truncated = true;
                break;
            }
            result
                .paths
                .push(stack.iter().rev().map(|(n, _)| *n).collect());
            on_branch[node] = false;
            stack.pop();
            continue;
        }

        match search.predecessors(node).get(next_pred) {
            Some(&pred) => {
                frame.1 += 1;
                if !on_branch[pred] {
                    on_branch[pred] = true;
                    stack.push((pred, 0));
                }
            }
            None => {
                on_branch[node] = false;
                stack.pop();
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, Graph};
    use crate::path::shortest_paths;
    use crate::topology::{Connection, Node, NodeId, Topology};

    fn graph(nodes: &[&str], links: &[(&str, &str)]) -> Graph {
        let topology = Topology {
            nodes: nodes.iter().map(|id| Node::new(*id)).collect(),
            connections: links.iter().map(|(a, b)| Connection::new(*a, *b)).collect(),
        };
        build_graph(&topology).unwrap().0
    }

    fn idx(graph: &Graph, id: &str) -> NodeIndex {
        graph.index_of(&NodeId::from(id)).unwrap()
    }

    fn names(graph: &Graph, set: &PathSet) -> Vec<Vec<String>> {
        set.paths
            .iter()
            .map(|path| graph.ids_of(path).into_iter().map(|id| id.to_string()).collect())
            .collect()
    }

    #[test]
    fn linear_graph_has_single_path() {
        let g = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "d")]);
        let search = shortest_paths(&g, idx(&g, "a"));
        let set = enumerate_paths(&search, idx(&g, "a"), idx(&g, "d"), None);

        assert_eq!(names(&g, &set), vec![vec!["a", "b", "c", "d"]]);
        assert!(!set.truncated);
    }

    #[test]
    fn branches_at_every_tie() {
        // Two diamonds in series: 4 shortest paths.
        let g = graph(
            &["a", "b1", "b2", "c", "d1", "d2", "e"],
            &[
                ("a", "b1"),
                ("a", "b2"),
                ("b1", "c"),
                ("b2", "c"),
                ("c", "d1"),
                ("c", "d2"),
                ("d1", "e"),
                ("d2", "e"),
            ],
        );
        let search = shortest_paths(&g, idx(&g, "a"));
        let set = enumerate_paths(&search, idx(&g, "a"), idx(&g, "e"), None);

        let mut paths = names(&g, &set);
        paths.sort();
        assert_eq!(
            paths,
            vec![
                vec!["a", "b1", "c", "d1", "e"],
                vec!["a", "b1", "c", "d2", "e"],
                vec!["a", "b2", "c", "d1", "e"],
                vec!["a", "b2", "c", "d2", "e"],
            ]
        );
    }

    #[test]
    fn origin_equal_to_destination_is_a_single_node_path() {
        let g = graph(&["a", "b"], &[("a", "b")]);
        let search = shortest_paths(&g, idx(&g, "a"));
        let set = enumerate_paths(&search, idx(&g, "a"), idx(&g, "a"), None);
        assert_eq!(names(&g, &set), vec![vec!["a"]]);
    }

    #[test]
    fn disconnected_destination_yields_nothing() {
        let g = graph(&["a", "b", "z"], &[("a", "b")]);
        let search = shortest_paths(&g, idx(&g, "a"));
        let set = enumerate_paths(&search, idx(&g, "a"), idx(&g, "z"), None);
        assert!(set.is_empty());
        assert!(!set.truncated);
    }

    #[test]
    fn dead_end_branches_are_discarded() {
        // Walking from "b" towards "x" in a search rooted at "a" never reaches "x".
        let g = graph(&["a", "b", "x"], &[("a", "b"), ("a", "x")]);
        let search = shortest_paths(&g, idx(&g, "a"));
        let set = enumerate_paths(&search, idx(&g, "x"), idx(&g, "b"), None);
        assert!(set.is_empty());
    }

    #[test]
    fn limit_truncates_and_flags() {
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let search = shortest_paths(&g, idx(&g, "a"));

        let capped = enumerate_paths(&search, idx(&g, "a"), idx(&g, "d"), Some(1));
        assert_eq!(capped.len(), 1);
        assert!(capped.truncated);

        let exact = enumerate_paths(&search, idx(&g, "a"), idx(&g, "d"), Some(2));
        assert_eq!(exact.len(), 2);
        assert!(!exact.truncated);
    }

    #[test]
    fn zero_weight_cycles_terminate() {
        let topology = Topology {
            nodes: ["a", "b", "c"].iter().map(|id| Node::new(*id)).collect(),
            connections: vec![
                Connection::weighted("a", "b", 0.0),
                Connection::weighted("b", "c", 0.0),
                Connection::weighted("a", "c", 0.0),
            ],
        };
        let g = build_graph(&topology).unwrap().0;
        let search = shortest_paths(&g, idx(&g, "a"));
        let set = enumerate_paths(&search, idx(&g, "a"), idx(&g, "c"), None);

        let mut paths = names(&g, &set);
        paths.sort();
        assert_eq!(paths, vec![vec!["a", "b", "c"], vec!["a", "c"]]);
    }
}
