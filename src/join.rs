//! Splices side-table metadata into items.
//!
//! A side-table that is present but lacks an entry clears the corresponding
//! field; a side-table that is absent leaves the field as it was. Asset paths
//! are always resolved, and resolution is a no-op on resolved paths, so joining
//! a joined list again with the same tables reproduces it.

use chrono::Utc;

use crate::data::{DatasetBundle, EnrichedDataset, GitTable, Item, OrganizationTable, Repository};
use crate::locator::ResourceLocator;

pub fn join_items(
    items: &[Item],
    organizations: Option<&OrganizationTable>,
    git: Option<&GitTable>,
    locator: &ResourceLocator,
) -> Vec<Item> {
    items
        .iter()
        .map(|item| join_item(item, organizations, git, locator))
        .collect()
}

pub fn enrich(bundle: DatasetBundle, locator: &ResourceLocator) -> EnrichedDataset {
    let items = bundle.items.unwrap_or_default();
    let items = join_items(
        &items,
        bundle.crunchbase_data.as_ref(),
        bundle.git_data.as_ref(),
        locator,
    );
    EnrichedDataset {
        items,
        crunchbase_data: bundle.crunchbase_data,
        git_data: bundle.git_data,
        loaded_at: Utc::now(),
    }
}

fn join_item(
    item: &Item,
    organizations: Option<&OrganizationTable>,
    git: Option<&GitTable>,
    locator: &ResourceLocator,
) -> Item {
    let mut joined = item.clone();

    if let Some(table) = organizations {
        joined.organization_data = item
            .crunchbase_url
            .as_ref()
            .and_then(|reference| table.get(reference))
            .cloned();
    }

    if let (Some(table), Some(repositories)) = (git, joined.repositories.as_mut()) {
        for repo in repositories.iter_mut() {
            join_repository(repo, table);
        }
    }

    joined.logo = locator.asset_url(&item.logo);
    joined.report_summary = item
        .report_summary
        .as_deref()
        .map(|path| locator.asset_url(path));

    joined
}

fn join_repository(repo: &mut Repository, table: &GitTable) {
    repo.git_data = table.get(&repo.url).cloned();
}
