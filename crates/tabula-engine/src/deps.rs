use std::collections::{HashMap, HashSet, VecDeque};

use tabula_core::CellCoord;

/// Reverse dependency edges between cells.
///
/// For each referent cell the graph stores the set of formula cells reading
/// it. Forward edges are not duplicated here: a formula's own references
/// live in its parsed handle, and cycle checking walks those directly.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Maps a cell to the formula cells that depend on it
    /// e.g., if A1 = B1 + C1, then dependents[B1] contains A1
    dependents: HashMap<CellCoord, HashSet<CellCoord>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent` reads `referent`.
    pub fn add_dependent(&mut self, referent: CellCoord, dependent: CellCoord) {
        self.dependents.entry(referent).or_default().insert(dependent);
    }

    /// Forget that `dependent` reads `referent`, dropping empty entries.
    pub fn remove_dependent(&mut self, referent: CellCoord, dependent: CellCoord) {
        if let Some(dependents) = self.dependents.get_mut(&referent) {
            dependents.remove(&dependent);
            if dependents.is_empty() {
                self.dependents.remove(&referent);
            }
        }
    }

    /// Cells that directly read the given cell.
    pub fn direct_dependents(&self, referent: CellCoord) -> Option<&HashSet<CellCoord>> {
        self.dependents.get(&referent)
    }

    /// All cells whose value transitively depends on the given cell,
    /// excluding the cell itself. BFS with a visited set; terminates on any
    /// graph and visits each affected cell once.
    pub fn transitive_dependents(&self, changed: CellCoord) -> Vec<CellCoord> {
        let mut affected = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(changed);
        if let Some(dependents) = self.dependents.get(&changed) {
            queue.extend(dependents.iter().copied());
        }

        while let Some(cell) = queue.pop_front() {
            if !visited.insert(cell) {
                continue;
            }
            affected.push(cell);

            if let Some(dependents) = self.dependents.get(&cell) {
                queue.extend(dependents.iter().copied());
            }
        }

        affected
    }
}
