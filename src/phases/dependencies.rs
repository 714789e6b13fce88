//! Phase 2: Dependency Expansion
//!
//! Resources may declare that they need other resources, possibly from a
//! different category (a template needing a lint config, for example). This
//! phase takes the filtered records and adds the transitive closure of those
//! requirements.
//!
//! ## Graph
//!
//! [`DependencyGraph`] is a flat arena: every resource that takes part in an
//! edge is interned once and addressed by index, and edges are lists of
//! indices. Traversal state is a plain `Vec<bool>` of visited indices, which
//! makes cycle handling trivial and keeps traversal order deterministic.
//!
//! ## Policy
//!
//! A dependency is always materialized, even when its own category's rule
//! excludes it or does not match it. Such records are flipped to included
//! with [`Reason::DependencyOf`] naming the resource that first pulled them
//! in. Resources that are already included keep their original reason.

use log::debug;
use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::library::LibrarySnapshot;
use crate::pattern::normalize_path;
use crate::resource::{LibraryPath, Reason, ResourceCategory, ResourceRecord};

/// A dependency as written in a manifest: a category plus a name that may
/// omit the file extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRef {
    pub category: ResourceCategory,
    pub name: String,
}

impl DependencyRef {
    pub fn new(category: ResourceCategory, name: &str) -> Self {
        Self {
            category,
            name: normalize_path(name),
        }
    }
}

impl fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// Everything one resource declares it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub origin: LibraryPath,
    pub requires: Vec<DependencyRef>,
}

/// A declared dependency with no matching resource in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDependency {
    pub origin: LibraryPath,
    pub reference: DependencyRef,
}

/// Arena of resources and the dependency edges between them.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<LibraryPath>,
    index: HashMap<LibraryPath, usize>,
    edges: Vec<Vec<usize>>,
    unresolved: Vec<UnresolvedDependency>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every declaration against `snapshot` and build the graph.
    pub fn build(snapshot: &LibrarySnapshot, declarations: &[DependencyDeclaration]) -> Self {
        let mut graph = Self::new();
        for declaration in declarations {
            for reference in &declaration.requires {
                match resolve_reference(snapshot, reference) {
                    Some(target) => graph.add_edge(&declaration.origin, &target),
                    None => {
                        let missing = UnresolvedDependency {
                            origin: declaration.origin.clone(),
                            reference: reference.clone(),
                        };
                        if !graph.unresolved.contains(&missing) {
                            graph.unresolved.push(missing);
                        }
                    }
                }
            }
        }
        graph
    }

    /// Record that `from` requires `to`. Duplicate edges are ignored.
    pub fn add_edge(&mut self, from: &LibraryPath, to: &LibraryPath) {
        let from = self.intern(from);
        let to = self.intern(to);
        if !self.edges[from].contains(&to) {
            self.edges[from].push(to);
        }
    }

    fn intern(&mut self, path: &LibraryPath) -> usize {
        if let Some(&idx) = self.index.get(path) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(path.clone());
        self.index.insert(path.clone(), idx);
        self.edges.push(Vec::new());
        idx
    }

    /// Direct dependencies of `path`, in declaration order.
    pub fn dependencies_of(&self, path: &LibraryPath) -> Vec<&LibraryPath> {
        self.index
            .get(path)
            .map(|&idx| self.edges[idx].iter().map(|&dep| &self.nodes[dep]).collect())
            .unwrap_or_default()
    }

    pub fn unresolved(&self) -> &[UnresolvedDependency] {
        &self.unresolved
    }

    pub fn is_empty(&self) -> bool {
        self.edges.iter().all(Vec::is_empty)
    }
}

/// Find the snapshot entry a reference points to.
///
/// An exact path wins. Otherwise the first entry in the same directory whose
/// name minus its extension equals the reference's last segment is used, so
/// `eslint-config` finds `eslint-config.json`.
pub fn resolve_reference(
    snapshot: &LibrarySnapshot,
    reference: &DependencyRef,
) -> Option<LibraryPath> {
    let exact = LibraryPath::new(reference.category, &reference.name);
    if snapshot.contains(&exact) {
        return Some(exact);
    }

    let (parent, stem) = match reference.name.rsplit_once('/') {
        Some((parent, stem)) => (parent, stem),
        None => ("", reference.name.as_str()),
    };

    snapshot
        .paths(reference.category)
        .iter()
        .find(|candidate| candidate.parent() == parent && strip_extension(candidate.file_name()) == stem)
        .cloned()
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Add the dependency closure of every included record.
///
/// Records keep their positions; dependencies without a record are appended.
/// Running `expand` on its own output changes nothing.
pub fn expand(records: Vec<ResourceRecord>, graph: &DependencyGraph) -> Vec<ResourceRecord> {
    let mut records = records;
    if graph.is_empty() {
        return records;
    }

    let mut position: HashMap<LibraryPath, usize> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| (record.path.clone(), idx))
        .collect();

    let mut visited = vec![false; graph.nodes.len()];
    let mut queue = VecDeque::new();

    for record in records.iter().filter(|r| r.included) {
        if let Some(&idx) = graph.index.get(&record.path) {
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back(idx);
            }
        }
    }

    while let Some(node) = queue.pop_front() {
        let origin = &graph.nodes[node];
        for &dep in &graph.edges[node] {
            let dep_path = &graph.nodes[dep];
            let reason = Reason::DependencyOf {
                origin: origin.clone(),
            };

            match position.get(dep_path) {
                Some(&pos) if records[pos].included => {}
                Some(&pos) => {
                    debug!("Including {} as a dependency of {}", dep_path, origin);
                    records[pos].included = true;
                    records[pos].reason = reason;
                }
                None => {
                    debug!("Adding {} as a dependency of {}", dep_path, origin);
                    position.insert(dep_path.clone(), records.len());
                    records.push(ResourceRecord::included(dep_path.clone(), reason));
                }
            }

            if !visited[dep] {
                visited[dep] = true;
                queue.push_back(dep);
            }
        }
    }

    records
}
