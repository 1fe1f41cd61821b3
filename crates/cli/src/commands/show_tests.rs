// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sj_core::JobSpec;
use sj_storage::MemoryJobStore;

async fn store_with(ids: &[&str]) -> MemoryJobStore {
    let store = MemoryJobStore::new();
    for (n, id) in ids.iter().enumerate() {
        let spec = JobSpec::builder("nmap").id(JobId::from(*id)).target("scanme.example.org").build();
        store.insert(Job::new(spec, n as u64)).await.unwrap();
    }
    store
}

fn exit_code(err: &anyhow::Error) -> Option<i32> {
    err.downcast_ref::<ExitError>().map(|e| e.code)
}

#[tokio::test]
async fn resolves_exact_id() {
    let store = store_with(&["job-abc", "job-abcd"]).await;
    assert_eq!(resolve(&store, "job-abc").await.unwrap().id, "job-abc");
}

#[tokio::test]
async fn resolves_unique_prefix() {
    let store = store_with(&["job-abc", "job-xyz"]).await;
    assert_eq!(resolve(&store, "job-x").await.unwrap().id, "job-xyz");
}

#[tokio::test]
async fn ambiguous_prefix_is_a_usage_error() {
    let store = store_with(&["job-abc", "job-abd"]).await;
    let err = resolve(&store, "job-ab").await.unwrap_err();
    assert_eq!(exit_code(&err), Some(2));
}

#[tokio::test]
async fn unknown_id_fails() {
    let store = store_with(&["job-abc"]).await;
    let err = resolve(&store, "job-zzz").await.unwrap_err();
    assert_eq!(exit_code(&err), Some(1));
    assert!(err.to_string().contains("job-zzz"));
}
