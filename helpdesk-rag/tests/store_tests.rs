//! In-memory store behavior: ordering, bounds, idempotent upsert,
//! dimension guards.

mod common;

use common::chunk;
use helpdesk_rag::{DistanceMetric, DocumentStore, InMemoryStore};
use proptest::prelude::*;

fn store() -> InMemoryStore {
    InMemoryStore::new(DistanceMetric::Cosine, common::DIM, common::MODEL)
}

#[tokio::test]
async fn empty_store_returns_no_results() {
    let store = store();
    let query = vec![1.0; common::DIM];
    let results = store.query(&query, 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn k_larger_than_store_returns_everything() {
    let store = store();
    let chunks: Vec<_> = (0..3)
        .map(|i| {
            let mut v = vec![0.0; common::DIM];
            v[i] = 1.0;
            chunk(&format!("doc.txt-{i}"), "doc.txt", v)
        })
        .collect();
    store.upsert(&chunks).await.unwrap();

    let mut query = vec![0.0; common::DIM];
    query[0] = 1.0;
    let results = store.query(&query, 100).await.unwrap();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn upsert_replaces_by_id() {
    let store = store();
    let v = vec![1.0; common::DIM];
    store.upsert(&[chunk("doc.txt-0", "doc.txt", v.clone())]).await.unwrap();

    let mut updated = chunk("doc.txt-0", "doc.txt", v);
    updated.text = "revised text".to_string();
    store.upsert(&[updated]).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    let results = store.query(&vec![1.0; common::DIM], 1).await.unwrap();
    assert_eq!(results[0].text, "revised text");
}

#[tokio::test]
async fn nearest_chunk_comes_first() {
    let store = store();
    let mut near = vec![0.0; common::DIM];
    near[0] = 1.0;
    let mut far = vec![0.0; common::DIM];
    far[1] = 1.0;
    store
        .upsert(&[chunk("a.txt-0", "a.txt", near.clone()), chunk("b.txt-1", "b.txt", far)])
        .await
        .unwrap();

    let results = store.query(&near, 2).await.unwrap();
    assert_eq!(results[0].meta.source, "a.txt");
    assert!(results[0].distance < results[1].distance);
    assert!(results[0].distance.abs() < 1e-6);
}

#[tokio::test]
async fn upsert_rejects_wrong_dimension_without_committing() {
    let store = store();
    let good = chunk("a.txt-0", "a.txt", vec![1.0; common::DIM]);
    let bad = chunk("a.txt-1", "a.txt", vec![1.0; common::DIM + 1]);

    let err = store.upsert(&[good, bad]).await.unwrap_err();
    assert!(matches!(
        err,
        helpdesk_rag::HelpdeskError::DimensionMismatch { expected, actual }
            if expected == common::DIM && actual == common::DIM + 1
    ));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn query_rejects_wrong_dimension() {
    let store = store();
    let err = store.query(&vec![1.0; common::DIM - 1], 5).await.unwrap_err();
    assert!(matches!(err, helpdesk_rag::HelpdeskError::DimensionMismatch { .. }));
}

#[tokio::test]
async fn l2_store_orders_by_euclidean_distance() {
    let store = InMemoryStore::new(DistanceMetric::L2, 2, common::MODEL);
    store
        .upsert(&[
            chunk("a.txt-0", "a.txt", vec![0.0, 0.0]),
            chunk("b.txt-1", "b.txt", vec![3.0, 4.0]),
        ])
        .await
        .unwrap();

    let results = store.query(&[0.0, 0.0], 2).await.unwrap();
    assert_eq!(results[0].meta.source, "a.txt");
    assert!((results[1].distance - 5.0).abs() < 1e-6);
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any stored set, query results come back ascending by distance,
    /// bounded by both `k` and the number of stored chunks.
    #[test]
    fn results_ordered_ascending_and_bounded(
        embeddings in proptest::collection::vec(arb_normalized_embedding(common::DIM), 1..20),
        query in arb_normalized_embedding(common::DIM),
        k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (results, stored) = rt.block_on(async {
            let store = store();
            let chunks: Vec<_> = embeddings
                .iter()
                .enumerate()
                .map(|(i, v)| chunk(&format!("doc.txt-{i}"), "doc.txt", v.clone()))
                .collect();
            store.upsert(&chunks).await.unwrap();
            let results = store.query(&query, k).await.unwrap();
            (results, chunks.len())
        });

        prop_assert!(results.len() <= k);
        prop_assert!(results.len() <= stored);

        for window in results.windows(2) {
            prop_assert!(
                window[0].distance <= window[1].distance,
                "results not ascending: {} > {}",
                window[0].distance,
                window[1].distance,
            );
        }
        for result in &results {
            prop_assert!(result.distance >= -1e-6, "negative distance {}", result.distance);
        }
    }
}
