use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::types::{Cycle, Dependency, DependencyKind, FanMetrics, GraphMetrics, Node};

/// Directed dependency graph over project files and synthetic targets.
///
/// Analyses are pure functions of the node and edge sets; traversal-based
/// ones (cycles, critical path) restrict themselves to the `Project`
/// subgraph so `[External]`, `[Missing]`, and `[DB:*]` targets never
/// participate in a walk.
pub struct DependencyGraph {
    graph: DiGraph<Node, DependencyKind>,
    index: HashMap<Node, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build from the flattened file paths and the deduplicated edge list.
    /// Every file becomes a node even if no edge touches it, so fully
    /// disconnected files are still visible to the analyses.
    pub fn build(file_paths: &[String], dependencies: &[Dependency]) -> Self {
        let mut graph = Self::new();
        for path in file_paths {
            graph.ensure_node(&Node::Project(path.clone()));
        }
        for dep in dependencies {
            graph.add_dependency(dep);
        }
        graph
    }

    pub fn ensure_node(&mut self, node: &Node) -> NodeIndex {
        if let Some(&idx) = self.index.get(node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.index.insert(node.clone(), idx);
        idx
    }

    pub fn add_dependency(&mut self, dep: &Dependency) {
        let from = self.ensure_node(&Node::Project(dep.from.clone()));
        let to = self.ensure_node(&dep.to);
        self.graph.add_edge(from, to, dep.kind);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Incoming edge count per node, keyed by the node's display form.
    pub fn reference_counts(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for node in self.graph.node_weights() {
            counts.insert(node.to_string(), 0);
        }
        for edge in self.graph.edge_references() {
            let target = &self.graph[edge.target()];
            *counts.entry(target.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Project paths that appear as either endpoint of any edge. A file
    /// outside this set is fully disconnected (`isUsed == false`).
    pub fn used_paths(&self) -> HashSet<String> {
        let mut used = HashSet::new();
        for edge in self.graph.edge_references() {
            if let Node::Project(p) = &self.graph[edge.source()] {
                used.insert(p.clone());
            }
            if let Node::Project(p) = &self.graph[edge.target()] {
                used.insert(p.clone());
            }
        }
        used
    }

    /// Enumerate cycles in the project subgraph.
    ///
    /// Each cycle is canonicalized by its unordered node set (sorted,
    /// `-`-joined); rotations of the same cycle collapse to one report.
    /// The reported sequence starts at the first revisited node.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let adjacency = self.project_adjacency();
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut cycles = Vec::new();

        for start in adjacency.keys() {
            let mut on_path: Vec<String> = Vec::new();
            let mut visited: HashSet<String> = HashSet::new();
            cycle_dfs(
                start,
                &adjacency,
                &mut on_path,
                &mut visited,
                &mut seen_keys,
                &mut cycles,
            );
        }
        cycles
    }

    /// Approximate longest simple path in the project subgraph.
    ///
    /// Runs a depth-first exploration from every node with a path-local
    /// visited set, updating the best path whenever the current one is
    /// strictly longer (first-found wins ties). This is a deliberate
    /// trade-off against the NP-hard exact problem and is not guaranteed
    /// optimal on arbitrary graphs.
    pub fn critical_path(&self) -> Vec<String> {
        let adjacency = self.project_adjacency();
        let mut starts: Vec<String> = self
            .graph
            .node_weights()
            .filter_map(|n| n.as_project().map(str::to_string))
            .collect();
        starts.sort();

        let mut best: Vec<String> = Vec::new();
        for start in starts {
            let mut path = vec![start.clone()];
            let mut visited: HashSet<String> = HashSet::new();
            visited.insert(start.clone());
            longest_dfs(&start, &adjacency, &mut path, &mut visited, &mut best);
        }
        best
    }

    /// Per-node fan-in/fan-out over the full edge set, for project and
    /// database nodes.
    pub fn fan_metrics(&self) -> BTreeMap<String, FanMetrics> {
        let mut fan: BTreeMap<String, FanMetrics> = BTreeMap::new();
        for node in self.graph.node_weights() {
            if matches!(node, Node::Project(_) | Node::Database(_)) {
                fan.insert(node.to_string(), FanMetrics::default());
            }
        }
        for edge in self.graph.edge_references() {
            let source = self.graph[edge.source()].to_string();
            let target = self.graph[edge.target()].to_string();
            if let Some(m) = fan.get_mut(&source) {
                m.fan_out += 1;
            }
            if let Some(m) = fan.get_mut(&target) {
                m.fan_in += 1;
            }
        }
        fan
    }

    /// All derived analyses bundled for the output model.
    pub fn metrics(&self) -> GraphMetrics {
        let fan = self.fan_metrics();
        let coupling: usize = fan.values().map(|m| m.fan_out).sum();
        let node_count = fan.len();
        let average_coupling = if node_count == 0 {
            0.0
        } else {
            coupling as f64 / node_count as f64
        };
        GraphMetrics {
            cycles: self.find_cycles(),
            critical_path: self.critical_path(),
            coupling,
            average_coupling,
            fan,
        }
    }

    /// Sorted adjacency restricted to project → project edges, with
    /// duplicate neighbors collapsed. Determinism of the DFS analyses
    /// hangs on this ordering.
    fn project_adjacency(&self) -> BTreeMap<String, Vec<String>> {
        let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for edge in self.graph.edge_references() {
            let (source, target) = (&self.graph[edge.source()], &self.graph[edge.target()]);
            if let (Node::Project(from), Node::Project(to)) = (source, target) {
                adjacency.entry(from.clone()).or_default().push(to.clone());
            }
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort();
            neighbors.dedup();
        }
        adjacency
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn cycle_dfs(
    node: &str,
    adjacency: &BTreeMap<String, Vec<String>>,
    on_path: &mut Vec<String>,
    visited: &mut HashSet<String>,
    seen_keys: &mut HashSet<String>,
    out: &mut Vec<Cycle>,
) {
    if let Some(pos) = on_path.iter().position(|n| n == node) {
        let nodes: Vec<String> = on_path[pos..].to_vec();
        let mut sorted = nodes.clone();
        sorted.sort();
        let key = sorted.join("-");
        if seen_keys.insert(key.clone()) {
            out.push(Cycle { nodes, key });
        }
        return;
    }
    if !visited.insert(node.to_string()) {
        return;
    }
    on_path.push(node.to_string());
    if let Some(neighbors) = adjacency.get(node) {
        for next in neighbors {
            cycle_dfs(next, adjacency, on_path, visited, seen_keys, out);
        }
    }
    on_path.pop();
}

fn longest_dfs(
    node: &str,
    adjacency: &BTreeMap<String, Vec<String>>,
    path: &mut Vec<String>,
    visited: &mut HashSet<String>,
    best: &mut Vec<String>,
) {
    if path.len() > best.len() {
        *best = path.clone();
    }
    if let Some(neighbors) = adjacency.get(node) {
        for next in neighbors {
            if visited.insert(next.clone()) {
                path.push(next.clone());
                longest_dfs(next, adjacency, path, visited, best);
                path.pop();
                visited.remove(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(from: &str, to: Node, kind: DependencyKind) -> Dependency {
        Dependency::new(from, to, kind)
    }

    fn import(from: &str, to: &str) -> Dependency {
        dep(from, Node::Project(to.to_string()), DependencyKind::Import)
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_counts() {
        let files = paths(&["a.ts", "b.ts", "c.ts"]);
        let deps = vec![import("a.ts", "c.ts"), import("b.ts", "c.ts")];
        let graph = DependencyGraph::build(&files, &deps);

        let counts = graph.reference_counts();
        assert_eq!(counts["c.ts"], 2);
        assert_eq!(counts["a.ts"], 0);
        assert_eq!(counts["b.ts"], 0);
    }

    #[test]
    fn test_used_paths_ignores_disconnected() {
        let files = paths(&["a.ts", "b.ts", "island.ts"]);
        let deps = vec![import("a.ts", "b.ts")];
        let graph = DependencyGraph::build(&files, &deps);

        let used = graph.used_paths();
        assert!(used.contains("a.ts"));
        assert!(used.contains("b.ts"));
        assert!(!used.contains("island.ts"));
    }

    #[test]
    fn test_file_with_only_external_edge_counts_as_used() {
        let files = paths(&["a.ts"]);
        let deps = vec![dep(
            "a.ts",
            Node::External("react".to_string()),
            DependencyKind::Import,
        )];
        let graph = DependencyGraph::build(&files, &deps);
        assert!(graph.used_paths().contains("a.ts"));
    }

    #[test]
    fn test_three_file_cycle_reported_once() {
        let files = paths(&["a.ts", "b.ts", "c.ts"]);
        let deps = vec![
            import("a.ts", "b.ts"),
            import("b.ts", "c.ts"),
            import("c.ts", "a.ts"),
        ];
        let graph = DependencyGraph::build(&files, &deps);

        let cycles = graph.find_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].key, "a.ts-b.ts-c.ts");
        assert_eq!(cycles[0].nodes.len(), 3);
        // The reported sequence starts at the first revisited node.
        assert_eq!(cycles[0].nodes[0], "a.ts");
    }

    #[test]
    fn test_two_node_cycle_rotations_collapse() {
        let files = paths(&["a.ts", "b.ts"]);
        let deps = vec![import("a.ts", "b.ts"), import("b.ts", "a.ts")];
        let graph = DependencyGraph::build(&files, &deps);

        let cycles = graph.find_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].key, "a.ts-b.ts");
    }

    #[test]
    fn test_cycles_ignore_synthetic_targets() {
        let files = paths(&["a.ts"]);
        let deps = vec![dep(
            "a.ts",
            Node::Missing("a.ts".to_string()),
            DependencyKind::Import,
        )];
        let graph = DependencyGraph::build(&files, &deps);
        assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let files = paths(&["a.ts", "b.ts", "c.ts"]);
        let deps = vec![import("a.ts", "b.ts"), import("b.ts", "c.ts")];
        let graph = DependencyGraph::build(&files, &deps);
        assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn test_critical_path_on_chain() {
        let files = paths(&["a.ts", "b.ts", "c.ts", "d.ts"]);
        let deps = vec![
            import("a.ts", "b.ts"),
            import("b.ts", "c.ts"),
            import("c.ts", "d.ts"),
        ];
        let graph = DependencyGraph::build(&files, &deps);

        let path = graph.critical_path();
        assert_eq!(path, paths(&["a.ts", "b.ts", "c.ts", "d.ts"]));
    }

    #[test]
    fn test_critical_path_handles_cycles_without_looping() {
        let files = paths(&["a.ts", "b.ts"]);
        let deps = vec![import("a.ts", "b.ts"), import("b.ts", "a.ts")];
        let graph = DependencyGraph::build(&files, &deps);

        // Path-local visited set: each node at most once per path.
        let path = graph.critical_path();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_fan_metrics_and_coupling() {
        let files = paths(&["a.ts", "b.ts", "c.ts"]);
        let deps = vec![
            import("a.ts", "c.ts"),
            import("b.ts", "c.ts"),
            dep(
                "a.ts",
                Node::External("react".to_string()),
                DependencyKind::Import,
            ),
        ];
        let graph = DependencyGraph::build(&files, &deps);

        let metrics = graph.metrics();
        assert_eq!(metrics.fan["a.ts"].fan_out, 2);
        assert_eq!(metrics.fan["c.ts"].fan_in, 2);
        assert_eq!(metrics.coupling, 3);
        assert!((metrics.average_coupling - 1.0).abs() < f64::EPSILON);
        // External targets are not part of the node set N.
        assert!(!metrics.fan.contains_key("[External] react"));
    }

    #[test]
    fn test_database_nodes_in_fan_set() {
        let files = paths(&["db.py"]);
        let deps = vec![dep(
            "db.py",
            Node::Database("mongodb".to_string()),
            DependencyKind::Database,
        )];
        let graph = DependencyGraph::build(&files, &deps);

        let metrics = graph.metrics();
        assert_eq!(metrics.fan["[DB:mongodb]"].fan_in, 1);
        assert_eq!(metrics.fan["db.py"].fan_out, 1);
    }

    #[test]
    fn test_duplicate_nodes_collapse() {
        let mut graph = DependencyGraph::new();
        graph.ensure_node(&Node::Project("a.ts".to_string()));
        graph.ensure_node(&Node::Project("a.ts".to_string()));
        assert_eq!(graph.node_count(), 1);
    }
}
