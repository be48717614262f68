use std::sync::Arc;
use std::thread;

use chrono::Utc;

use landscape_items::cache::DatasetCache;
use landscape_items::data::{EnrichedDataset, Item};

fn dataset(ids: &[&str]) -> EnrichedDataset {
    EnrichedDataset {
        items: ids
            .iter()
            .map(|id| Item {
                id: id.to_string(),
                ..Default::default()
            })
            .collect(),
        crunchbase_data: None,
        git_data: None,
        loaded_at: Utc::now(),
    }
}

#[test]
fn lookup_item_by_key_and_id() {
    let cache = DatasetCache::new();
    assert!(!cache.has("category_db"));
    assert!(cache.get("category_db").is_none());
    assert!(cache.lookup_item("category_db", "a1").is_none());

    cache.put("category_db", dataset(&["a1", "a2"]));

    assert!(cache.has("category_db"));
    assert_eq!(cache.lookup_item("category_db", "a2").unwrap().id, "a2");
    assert!(cache.lookup_item("category_db", "missing").is_none());
    assert!(cache.lookup_item("category_networking", "a1").is_none());
}

#[test]
fn keys_are_sorted() {
    let cache = DatasetCache::new();
    cache.put("maturity_graduated", dataset(&[]));
    cache.put("category_db", dataset(&[]));

    let keys: Vec<String> = cache.keys().into_iter().collect();
    assert_eq!(keys, vec!["category_db", "maturity_graduated"]);
}

#[test]
fn readers_see_whole_datasets() {
    let cache = Arc::new(DatasetCache::new());
    cache.put("category_db", dataset(&["a1"]));

    thread::scope(|scope| {
        let writer = Arc::clone(&cache);
        scope.spawn(move || {
            for round in 0..200 {
                let ids: Vec<String> = (0..=round % 5).map(|n| format!("i{n}")).collect();
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                writer.put("category_db", dataset(&ids));
            }
        });

        for _ in 0..2 {
            let reader = Arc::clone(&cache);
            scope.spawn(move || {
                for _ in 0..200 {
                    let snapshot = reader.get("category_db").unwrap();
                    let len = snapshot.items.len();
                    assert!((1..=5).contains(&len));
                    for (index, item) in snapshot.items.iter().enumerate() {
                        if len > 1 || item.id != "a1" {
                            assert_eq!(item.id, format!("i{index}"));
                        }
                    }
                }
            });
        }
    });
}
