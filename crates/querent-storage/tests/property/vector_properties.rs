//! Property tests: search ordering and score bounds.

use proptest::prelude::*;

use querent_core::models::VectorPoint;
use querent_core::traits::IVectorStore;
use querent_storage::SqliteVectorStore;

fn vector_strategy() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, 4)
}

proptest! {
    #[test]
    fn prop_search_is_sorted_and_bounded(
        vectors in prop::collection::vec(vector_strategy(), 1..20),
        query in vector_strategy(),
        limit in 1usize..10,
    ) {
        let store = SqliteVectorStore::open_in_memory().unwrap();
        store.create_collection("c", 4).unwrap();
        let points = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| VectorPoint {
                id: format!("p{i}"),
                vector: v.clone(),
                payload: serde_json::json!({ "i": i }),
            })
            .collect();
        store.upsert("c", points).unwrap();

        let hits = store.search("c", &query, limit).unwrap();
        prop_assert!(hits.len() <= limit);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for hit in &hits {
            prop_assert!(hit.score <= 1.0 + 1e-6);
            prop_assert!(hit.score >= -1.0 - 1e-6);
        }
    }

    #[test]
    fn prop_upsert_is_idempotent_per_id(
        vector in vector_strategy(),
        repeats in 1usize..5,
    ) {
        let store = SqliteVectorStore::open_in_memory().unwrap();
        store.create_collection("c", 4).unwrap();
        for _ in 0..repeats {
            store
                .upsert("c", vec![VectorPoint {
                    id: "same".to_string(),
                    vector: vector.clone(),
                    payload: serde_json::json!({}),
                }])
                .unwrap();
        }
        prop_assert_eq!(store.count("c").unwrap(), 1);
    }
}
