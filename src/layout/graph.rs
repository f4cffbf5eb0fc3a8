use std::collections::{HashMap, HashSet, VecDeque};

use crate::ir::{Relationship, Table};

/// Undirected adjacency view over tables and their relationships.
///
/// Relationships referencing a table that does not exist are ignored; a
/// half-written schema still produces a graph over the tables it does have.
#[derive(Debug)]
pub struct SchemaGraph {
    adjacency: HashMap<String, HashSet<String>>,
    input_order: HashMap<String, usize>,
    table_ids: Vec<String>,
}

impl SchemaGraph {
    pub fn build(tables: &[Table], relationships: &[Relationship]) -> Self {
        let mut adjacency: HashMap<String, HashSet<String>> = HashMap::new();
        let mut input_order = HashMap::new();
        let mut table_ids = Vec::with_capacity(tables.len());
        for (idx, table) in tables.iter().enumerate() {
            adjacency.entry(table.id.clone()).or_default();
            input_order.insert(table.id.clone(), idx);
            table_ids.push(table.id.clone());
        }
        for rel in relationships {
            if adjacency.contains_key(&rel.source_table_id)
                && adjacency.contains_key(&rel.target_table_id)
            {
                adjacency
                    .get_mut(&rel.source_table_id)
                    .unwrap()
                    .insert(rel.target_table_id.clone());
                adjacency
                    .get_mut(&rel.target_table_id)
                    .unwrap()
                    .insert(rel.source_table_id.clone());
            }
        }
        Self {
            adjacency,
            input_order,
            table_ids,
        }
    }

    pub fn degree(&self, id: &str) -> usize {
        self.adjacency.get(id).map(|n| n.len()).unwrap_or(0)
    }

    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &String> {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// Position of the table in the caller-supplied input; the deterministic
    /// tie-breaker for root choice and column ordering.
    pub fn input_index(&self, id: &str) -> usize {
        self.input_order.get(id).copied().unwrap_or(usize::MAX)
    }

    /// Connected components, each listed in BFS discovery order with seeds
    /// taken in input order. Isolated tables form singleton components.
    pub fn components(&self) -> Vec<Vec<String>> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut components = Vec::new();
        for id in &self.table_ids {
            if visited.contains(id) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            visited.insert(id.clone());
            queue.push_back(id.clone());
            while let Some(current) = queue.pop_front() {
                for next in self.neighbors(&current) {
                    if visited.insert(next.clone()) {
                        queue.push_back(next.clone());
                    }
                }
                component.push(current);
            }
            components.push(component);
        }
        components
    }

    /// BFS hop-distance of every component member from `root`.
    pub fn levels_from(&self, root: &str) -> HashMap<String, usize> {
        let mut level = HashMap::new();
        level.insert(root.to_string(), 0usize);
        let mut queue = VecDeque::new();
        queue.push_back(root.to_string());
        while let Some(current) = queue.pop_front() {
            let next_level = level[&current] + 1;
            for next in self.neighbors(&current) {
                if !level.contains_key(next) {
                    level.insert(next.clone(), next_level);
                    queue.push_back(next.clone());
                }
            }
        }
        level
    }
}
