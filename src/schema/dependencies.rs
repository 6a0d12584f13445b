use super::tables::{get_entity, ALL_ENTITIES};
use super::types::EntitySchema;
use std::collections::{HashMap, HashSet, VecDeque};

/// Resolves entity load order from foreign-key dependencies
pub struct DependencyResolver {
    /// Map of entity name -> entities it depends on
    deps: HashMap<&'static str, HashSet<&'static str>>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        let mut deps: HashMap<&'static str, HashSet<&'static str>> = HashMap::new();

        for entity in ALL_ENTITIES {
            deps.insert(entity.name, entity.dependencies());
        }

        Self { deps }
    }

    /// Given a set of requested entities, resolve all required FK parents.
    /// Returns entities in load order (parents before children).
    pub fn resolve_includes(
        &self,
        requested: &[&str],
    ) -> Result<Vec<&'static EntitySchema>, String> {
        let mut included: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = requested.iter().copied().collect();

        while let Some(entity_name) = queue.pop_front() {
            if included.contains(entity_name) {
                continue;
            }

            if get_entity(entity_name).is_none() {
                return Err(format!("Unknown entity: {}", entity_name));
            }

            included.insert(entity_name);

            // A child cannot load without its FK parents committed first
            if let Some(entity_deps) = self.deps.get(entity_name) {
                for dep in entity_deps {
                    if !included.contains(dep) {
                        queue.push_back(dep);
                    }
                }
            }
        }

        Ok(self.in_load_order(&included))
    }

    /// Given a set of entities to exclude, return the remaining entities in
    /// load order. Excluding an entity also excludes everything that depends
    /// on it, transitively; those rows could never satisfy their FK checks.
    pub fn resolve_excludes(
        &self,
        excluded: &[&str],
    ) -> Result<Vec<&'static EntitySchema>, String> {
        for name in excluded {
            if get_entity(name).is_none() {
                return Err(format!("Unknown entity: {}", name));
            }
        }

        let mut excluded_set: HashSet<&str> = excluded.iter().copied().collect();

        // Propagate exclusion to dependents until no entity changes
        loop {
            let mut changed = false;
            for entity in ALL_ENTITIES {
                if excluded_set.contains(entity.name) {
                    continue;
                }
                let parent_excluded = entity
                    .foreign_keys
                    .iter()
                    .any(|fk| excluded_set.contains(fk.references_table));
                if parent_excluded {
                    excluded_set.insert(entity.name);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let included: HashSet<&str> = ALL_ENTITIES
            .iter()
            .map(|e| e.name)
            .filter(|n| !excluded_set.contains(n))
            .collect();

        Ok(self.in_load_order(&included))
    }

    /// Return all entities in load order
    pub fn all_entities_ordered(&self) -> Vec<&'static EntitySchema> {
        ALL_ENTITIES.to_vec()
    }

    /// Order a set of entity names so that FK parents precede children.
    /// `ALL_ENTITIES` is already topologically sorted, so filtering it
    /// preserves the order.
    fn in_load_order(&self, included: &HashSet<&str>) -> Vec<&'static EntitySchema> {
        ALL_ENTITIES
            .iter()
            .filter(|e| included.contains(e.name))
            .copied()
            .collect()
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}
