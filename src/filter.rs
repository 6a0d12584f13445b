use crate::schema::{DependencyResolver, EntitySchema};
use anyhow::{anyhow, bail, Result};

/// Resolves which entities to load based on include/exclude filters
pub fn resolve_entities(
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
) -> Result<Vec<&'static EntitySchema>> {
    let resolver = DependencyResolver::new();

    match (include, exclude) {
        (Some(_), Some(_)) => {
            bail!("Cannot use both --include and --exclude at the same time");
        }
        (Some(include_list), None) => {
            let refs: Vec<&str> = include_list.iter().map(|s| s.as_str()).collect();
            let entities = resolver.resolve_includes(&refs).map_err(|e| anyhow!(e))?;

            println!("Including {} entities (with FK parents):", entities.len());
            for e in &entities {
                println!("  - {}", e.name);
            }

            Ok(entities)
        }
        (None, Some(exclude_list)) => {
            let refs: Vec<&str> = exclude_list.iter().map(|s| s.as_str()).collect();
            let entities = resolver.resolve_excludes(&refs).map_err(|e| anyhow!(e))?;

            println!(
                "Including {} entities (after exclusions and their dependents):",
                entities.len()
            );

            Ok(entities)
        }
        (None, None) => Ok(resolver.all_entities_ordered()),
    }
}
