use std::collections::{HashMap, HashSet, VecDeque};

use url::Url;

use crate::graph::Page;

/// Directed reachability graph over pages
///
/// Node membership and adjacency membership are tracked separately: every
/// endpoint of a relation is a node with an adjacency entry, but a page added
/// on its own is a node with no adjacency entry at all. Queries use that
/// distinction to tell "unknown node" (`None`) apart from "known but
/// unconnected" (empty result).
///
/// The graph may contain cycles and grows monotonically during a crawl;
/// nodes and edges are only ever added.
#[derive(Debug, Default)]
pub struct WebGraph {
    /// Node set, keyed by normalized URL
    pages: HashMap<Url, Page>,

    /// Directed adjacency: URL -> set of successor URLs
    edges: HashMap<Url, HashSet<Url>>,
}

impl WebGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page to the graph, returning the stored node
    ///
    /// Idempotent: adding a URL that is already a node returns the existing
    /// node untouched. With `parent` given, also records the directed
    /// relation parent -> page.
    pub fn add_page(&mut self, page: Page, parent: Option<&Url>) -> &Page {
        let url = page.url().clone();
        self.pages.entry(url.clone()).or_insert(page);
        if let Some(parent) = parent {
            self.add_relation(parent, &url, true);
        }
        &self.pages[&url]
    }

    /// Inserts the relation `from -> to` (and `to -> from` when undirected)
    ///
    /// Both endpoints are registered as nodes and both receive adjacency
    /// entries, so a link target with no outgoing links of its own is still
    /// a connected node. Edges form a set; re-adding a relation is a no-op.
    pub fn add_relation(&mut self, from: &Url, to: &Url, directed: bool) {
        self.ensure_node(from);
        self.ensure_node(to);

        self.edges
            .entry(from.clone())
            .or_default()
            .insert(to.clone());

        let reverse = self.edges.entry(to.clone()).or_default();
        if !directed {
            reverse.insert(from.clone());
        }
    }

    fn ensure_node(&mut self, url: &Url) {
        if !self.pages.contains_key(url) {
            self.pages
                .insert(url.clone(), Page::from_url(url.clone()));
        }
    }

    /// Returns true if the URL is a node of the graph
    pub fn contains(&self, url: &Url) -> bool {
        self.pages.contains_key(url)
    }

    /// Looks up a node by URL
    pub fn page(&self, url: &Url) -> Option<&Page> {
        self.pages.get(url)
    }

    pub(crate) fn page_mut(&mut self, url: &Url) -> Option<&mut Page> {
        self.pages.get_mut(url)
    }

    /// Iterates over every node
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Number of nodes
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashSet::len).sum()
    }

    /// Successors of a node, if it has an adjacency entry
    pub fn successors(&self, url: &Url) -> Option<&HashSet<Url>> {
        self.edges.get(url)
    }

    /// Collects every node reachable from `root` in 1..=`max_dist` hops
    ///
    /// Returns `None` when `root` is not a node of the graph, and an empty
    /// map when `root` has no adjacency entry at all. Otherwise each
    /// reachable node maps to its minimum hop distance from `root`. Nodes
    /// first reached at exactly `max_dist` are reported but not expanded
    /// further, and `root` itself is never part of the result.
    pub fn neighbors_within_distance(
        &self,
        root: &Url,
        max_dist: u32,
    ) -> Option<HashMap<Url, u32>> {
        if !self.pages.contains_key(root) {
            return None;
        }

        let mut found = HashMap::new();
        if !self.edges.contains_key(root) {
            return Some(found);
        }

        // Breadth-first expansion: FIFO order discovers every node at its
        // minimum distance, cycles are cut by the distance map.
        let mut dists: HashMap<&Url, u32> = HashMap::new();
        let mut queue: VecDeque<&Url> = VecDeque::new();

        let (root_key, _) = self.pages.get_key_value(root)?;
        dists.insert(root_key, 0);
        queue.push_back(root_key);

        while let Some(current) = queue.pop_front() {
            let current_dist = dists[current];
            if current_dist >= max_dist {
                continue;
            }

            let Some(succs) = self.edges.get(current) else {
                continue;
            };
            for next in succs {
                if dists.contains_key(next) {
                    continue;
                }
                let dist = current_dist + 1;
                dists.insert(next, dist);
                found.insert(next.clone(), dist);
                queue.push_back(next);
            }
        }

        Some(found)
    }

    /// Finds a shortest path between two pages
    ///
    /// Returns `None` when either endpoint is not a node, when either has no
    /// adjacency entry, or when no path exists (including `start == end`
    /// without a self-loop). When the endpoints are directly connected in
    /// *either* direction the two-element path is returned without running
    /// the full search; callers that need strict edge-direction fidelity for
    /// that one-hop case should consult [`WebGraph::successors`] instead.
    ///
    /// Ties between equal-length paths break arbitrarily; callers must not
    /// rely on a specific path among equals.
    pub fn shortest_path(&self, start: &Url, end: &Url) -> Option<Vec<&Page>> {
        if !self.pages.contains_key(start) || !self.pages.contains_key(end) {
            return None;
        }

        let start_succs = self.edges.get(start)?;
        let end_succs = self.edges.get(end)?;

        if start_succs.contains(end) || end_succs.contains(start) {
            return Some(vec![&self.pages[start], &self.pages[end]]);
        }

        // Uniform-cost search over the whole node set. The linear min-scan
        // is O(V^2) overall, which is fine at crawl-graph sizes.
        let unreachable = self.pages.len() as u32 + 1;
        let mut dists: HashMap<&Url, u32> = HashMap::new();
        let mut prevs: HashMap<&Url, &Url> = HashMap::new();
        let mut unvisited: HashSet<&Url> = self.pages.keys().collect();

        let (start_key, _) = self.pages.get_key_value(start)?;
        let (end_key, _) = self.pages.get_key_value(end)?;
        dists.insert(start_key, 0);

        while !unvisited.is_empty() {
            let current = *unvisited
                .iter()
                .min_by_key(|url| dists.get(*url).copied().unwrap_or(unreachable))?;
            unvisited.remove(current);

            if current == end_key {
                break;
            }

            let current_dist = dists.get(current).copied().unwrap_or(unreachable);
            let Some(succs) = self.edges.get(current) else {
                continue;
            };
            for next in succs {
                let alt = current_dist.saturating_add(1);
                if alt < dists.get(next).copied().unwrap_or(unreachable) {
                    dists.insert(next, alt);
                    prevs.insert(next, current);
                }
            }
        }

        // Walk predecessor links back from the end; an empty walk means the
        // end was never reached.
        let mut path = Vec::new();
        let mut target = end_key;
        while let Some(&prev) = prevs.get(target) {
            path.push(target);
            target = prev;
        }
        if path.is_empty() {
            return None;
        }
        path.push(target);
        path.reverse();

        Some(path.into_iter().map(|url| &self.pages[url]).collect())
    }
}
