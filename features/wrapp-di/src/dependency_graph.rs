use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::{
    builder::DiBuilder,
    types::{DependencyInfo, Key},
};

/// Graph of the entire application
/// Used to check circular dependencies and enables visualization of APP
pub struct DependencyGraph {
    map: BTreeMap<Key, DependencyGraphEntry>,
}
impl DependencyGraph {
    /// Builds the graph of all providers and validates the module exports
    ///
    /// Collects every error instead of stopping on the first one
    pub fn new(builder: &DiBuilder) -> Result<Self, DependencyGraphErrors> {
        let mut graph = Self {
            map: Default::default(),
        };
        let mut errors = Vec::new();

        for instance in &builder.registered_instances {
            if let Err(error) = graph.add(instance.key, vec![]) {
                errors.push(error);
            }
        }

        for factory in &builder.registered_factories {
            if let Err(error) = graph.add(factory.supplies(), factory.dependencies()) {
                errors.push(error);
            }
        }

        for module in &builder.registered_modules {
            for export in &module.exports {
                if !module.provided.contains(export) {
                    errors.push(DependencyGraphError::UnknownExport {
                        module: module.name.clone(),
                        export: *export,
                    });
                }
            }
        }

        if !errors.is_empty() {
            return Err(DependencyGraphErrors { errors });
        }

        Ok(graph)
    }

    pub fn add(
        &mut self,
        key: Key,
        dependencies: Vec<DependencyInfo>,
    ) -> Result<(), DependencyGraphError> {
        if self.map.contains_key(&key) {
            return Err(DependencyGraphError::Duplicate(key));
        }
        self.map.insert(key, DependencyGraphEntry { key, dependencies });

        Ok(())
    }

    /// Direct dependencies of a provider, `None` if it is not part of the graph
    pub fn dependencies_of(&self, key: Key) -> Option<&[DependencyInfo]> {
        self.map
            .get(&key)
            .map(|entry| entry.dependencies.as_slice())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Validate the graph
    ///
    /// Returns a list of all issues
    pub fn check(&self) -> Result<(), DependencyGraphErrors> {
        let mut checked = HashSet::new();
        let mut errors = Vec::new();
        for entry in self.map.values() {
            let mut dependency_chain = Vec::new();
            check_recurse(
                self,
                &mut checked,
                &mut errors,
                &mut dependency_chain,
                entry,
            );
        }

        if !errors.is_empty() {
            return Err(DependencyGraphErrors { errors });
        }

        return Ok(());

        fn check_recurse(
            graph: &DependencyGraph,
            checked: &mut HashSet<Key>,
            errors: &mut Vec<DependencyGraphError>,
            dependency_chain: &mut Vec<Key>,
            entry: &DependencyGraphEntry,
        ) {
            // Circular Dependency Check
            if dependency_chain.contains(&entry.key) {
                let from = *dependency_chain.first().expect("must have entries");
                let to = entry.key;

                dependency_chain.push(to); // Add current so chain is complete

                errors.push(DependencyGraphError::CircularDependency {
                    from,
                    to,
                    chain: dependency_chain.clone(),
                });
                dependency_chain.pop();
                return;
            }

            // Skip other checks if already checked
            if !checked.insert(entry.key) {
                return;
            };

            dependency_chain.push(entry.key);

            for dependency in &entry.dependencies {
                let Some(next_entry) = graph.map.get(&dependency.key) else {
                    if !dependency.optional {
                        errors.push(DependencyGraphError::MissingDependency {
                            dependency: dependency.key,
                            required_by: entry.key,
                        });
                    }

                    continue;
                };

                check_recurse(graph, checked, errors, dependency_chain, next_entry);
            }

            dependency_chain.pop();
        }
    }
}

struct DependencyGraphEntry {
    key: Key,
    dependencies: Vec<DependencyInfo>,
}

#[derive(Error, Debug, Clone)]
pub enum DependencyGraphError {
    #[error("A provider has been registered twice: '{0}'")]
    Duplicate(Key),
    #[error("'{required_by}' needs '{dependency}' but it is missing")]
    MissingDependency { dependency: Key, required_by: Key },
    #[error("A Circular Dependency exists between '{from}' and '{to}' through {chain:?} - Consider using `Option` or restructuring")]
    CircularDependency {
        from: Key,
        to: Key,
        chain: Vec<Key>,
    },
    #[error("Module '{module}' exports '{export}' but neither it nor its imports provide it")]
    UnknownExport { module: String, export: Key },
}
impl std::fmt::Display for DependencyGraphErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push("The dependency graph had one or more errors:".to_string());
        for error in &self.errors {
            display.push(format!("- {}", error));
        }
        f.write_str(&display.join("\n"))
    }
}

#[derive(Error, Debug, Clone)]
pub struct DependencyGraphErrors {
    pub errors: Vec<DependencyGraphError>,
}
