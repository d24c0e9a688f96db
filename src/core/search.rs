use crate::catalog::{Catalog, Category};

/// Keep subcommands whose name or description contains `term`, ignoring case.
///
/// Category grouping and order are preserved; categories left with no
/// subcommands are dropped. An empty term returns the catalog unchanged.
pub fn filter(catalog: &Catalog, term: &str) -> Catalog {
    if term.is_empty() {
        return catalog.clone();
    }

    let needle = term.to_lowercase();
    let categories = catalog
        .iter()
        .filter_map(|category| {
            let commands: Vec<_> = category
                .commands
                .iter()
                .filter(|entry| {
                    entry.name.to_lowercase().contains(&needle)
                        || entry.record.description.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();

            if commands.is_empty() {
                None
            } else {
                Some(Category {
                    name: category.name.clone(),
                    commands,
                })
            }
        })
        .collect();

    Catalog::from_validated(categories)
}
