//! Unlock tree for track exercises
//!
//! Core exercises are the roots; an exercise with `unlocked_by` hangs under
//! its parent. Bonus exercises (non-core, no unlock) are listed flat after
//! the tree. Uses petgraph to detect reference cycles up front so rendering
//! can never loop.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;

use super::config::ExerciseMetadata;

/// Spacing and connectors for the tree output.
const INDENT: usize = 2;
const TRUNK: &str = "│";
const BRANCH: &str = "─";
const FORK: &str = "├";
const TERMINATOR: &str = "└";

/// Appended to warnings about structure the unlock configuration is
/// expected to have but does not.
const CONFIGURATION_HINT: &str = ", the track configuration may be incomplete";

/// Non-fatal anomalies found while building or describing the tree.
///
/// Warnings are diagnostics only; they never fail the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphWarning {
    #[error("Exercise '{slug}' has an invalid unlocked_by slug: '{reference}'{CONFIGURATION_HINT}")]
    InvalidUnlockReference { slug: String, reference: String },

    #[error("The unlocked_by references form a cycle involving '{slug}'")]
    UnlockCycle { slug: String },

    #[error("Cannot find any unlockable exercises{CONFIGURATION_HINT}")]
    NoUnlockableExercises,

    #[error("Cannot find any core exercises{CONFIGURATION_HINT}")]
    NoCoreExercises,

    #[error("Cannot find any bonus exercises{CONFIGURATION_HINT}")]
    NoBonusExercises,
}

/// An exercise plus the slugs it unlocks, in manifest order.
#[derive(Debug, Clone)]
struct ExerciseNode {
    slug: String,
    difficulty: u32,
    children: Vec<String>,
}

impl ExerciseNode {
    fn description(&self, with_difficulty: bool) -> String {
        if with_difficulty {
            format!("{} [{}]", self.slug, self.difficulty)
        } else {
            self.slug.clone()
        }
    }
}

/// The unlock structure of a track's non-deprecated exercises.
///
/// The slug lookup table is owned by the tree, so building one tree per
/// track keeps slugs from leaking between tracks processed in one run.
#[derive(Debug)]
pub struct UnlockTree {
    nodes: HashMap<String, ExerciseNode>,
    core: Vec<String>,
    bonus: Vec<String>,
    warnings: Vec<GraphWarning>,
}

impl UnlockTree {
    /// Builds the tree from the ordered manifest list, collecting warnings
    /// for dangling references, cycles, and empty sections.
    pub fn build(exercises: &[ExerciseMetadata]) -> Self {
        let mut tree = Self {
            nodes: HashMap::new(),
            core: Vec::new(),
            bonus: Vec::new(),
            warnings: Vec::new(),
        };

        // First pass: wrap every live exercise and classify roots.
        let live: Vec<&ExerciseMetadata> = exercises
            .iter()
            .filter(|e| !e.is_deprecated)
            .collect();

        for meta in &live {
            tree.nodes.insert(
                meta.slug.clone(),
                ExerciseNode {
                    slug: meta.slug.clone(),
                    difficulty: meta.difficulty,
                    children: Vec::new(),
                },
            );

            if meta.is_core {
                tree.core.push(meta.slug.clone());
            } else if meta.unlock_slug().is_none() {
                tree.bonus.push(meta.slug.clone());
            }
        }

        // Second pass: resolve unlock references into child links. An
        // unresolved reference is warned about and dropped from the tree.
        let mut unlocks_present = false;
        let mut edges: Vec<(String, String)> = Vec::new();

        for meta in &live {
            let Some(parent_slug) = meta.unlock_slug() else {
                continue;
            };

            if !tree.nodes.contains_key(parent_slug) {
                tree.warnings.push(GraphWarning::InvalidUnlockReference {
                    slug: meta.slug.clone(),
                    reference: parent_slug.to_string(),
                });
                continue;
            }

            unlocks_present = true;
            edges.push((parent_slug.to_string(), meta.slug.clone()));
            if let Some(parent) = tree.nodes.get_mut(parent_slug) {
                parent.children.push(meta.slug.clone());
            }
        }

        if let Some(slug) = find_cycle(&edges) {
            tree.warnings.push(GraphWarning::UnlockCycle { slug });
        }

        if !unlocks_present {
            tree.warnings.push(GraphWarning::NoUnlockableExercises);
        }
        if tree.core.is_empty() {
            tree.warnings.push(GraphWarning::NoCoreExercises);
        }
        if tree.bonus.is_empty() {
            tree.warnings.push(GraphWarning::NoBonusExercises);
        }

        tree
    }

    /// Warnings collected while building the tree.
    pub fn warnings(&self) -> &[GraphWarning] {
        &self.warnings
    }

    /// Writes the tree: a language header, the core section rendered with
    /// box-drawing connectors, then the flat bonus list. Empty sections are
    /// skipped (their absence is already in `warnings`).
    pub fn render(
        &self,
        w: &mut impl Write,
        language: &str,
        with_difficulty: bool,
    ) -> io::Result<()> {
        writeln!(w, "{}", language)?;
        writeln!(w, "{}", "=".repeat(language.chars().count()))?;

        if !self.core.is_empty() {
            writeln!(w, "\ncore\n----")?;

            let mut visited = HashSet::new();
            let last = self.core.len() - 1;
            for (i, slug) in self.core.iter().enumerate() {
                self.render_node(w, slug, 0, i == last, with_difficulty, &mut visited)?;
            }
        }

        if !self.bonus.is_empty() {
            writeln!(w, "\nbonus\n-----")?;

            for slug in &self.bonus {
                if let Some(node) = self.nodes.get(slug) {
                    writeln!(w, "{}", node.description(with_difficulty))?;
                }
            }
        }

        Ok(())
    }

    /// Depth-first pre-order rendering of one node and its unlocks.
    ///
    /// `is_last` picks the terminal connector for a childless final sibling
    /// and controls the spacer line between roots. The visited set makes
    /// traversal terminate even when the manifest contains a cycle.
    fn render_node(
        &self,
        w: &mut impl Write,
        slug: &str,
        depth: usize,
        is_last: bool,
        with_difficulty: bool,
        visited: &mut HashSet<String>,
    ) -> io::Result<()> {
        let Some(node) = self.nodes.get(slug) else {
            return Ok(());
        };
        if !visited.insert(slug.to_string()) {
            return Ok(());
        }

        let mut line = String::new();
        for _ in 0..depth {
            line.push_str(TRUNK);
            line.push_str(&" ".repeat(INDENT));
        }

        let has_children = !node.children.is_empty();
        if !has_children && is_last {
            line.push_str(TERMINATOR);
        } else {
            line.push_str(FORK);
        }
        line.push_str(&BRANCH.repeat(INDENT - 1));
        line.push(' ');
        line.push_str(&node.description(with_difficulty));
        writeln!(w, "{}", line)?;

        let num_children = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.render_node(w, child, depth + 1, i == num_children - 1, with_difficulty, visited)?;
        }

        // Space out the root exercises, except after the final one.
        if depth == 0 && !is_last {
            writeln!(w, "{}", TRUNK)?;
        }

        Ok(())
    }
}

/// Returns a slug involved in an unlock cycle, if any exists.
fn find_cycle(edges: &[(String, String)]) -> Option<String> {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for (parent, child) in edges {
        for slug in [parent, child] {
            if !indices.contains_key(slug.as_str()) {
                indices.insert(slug, graph.add_node(slug.clone()));
            }
        }
        graph.add_edge(indices[parent.as_str()], indices[child.as_str()], ());
    }

    match toposort(&graph, None) {
        Ok(_) => None,
        Err(cycle) => graph.node_weight(cycle.node_id()).cloned(),
    }
}
