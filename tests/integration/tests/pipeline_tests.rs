//! Pipeline Integration Tests
//!
//! End-to-end runs over in-memory repositories and over a temporary data
//! directory in the crawler's file format.
//!
//! Run with: cargo test -p integration-tests --test pipeline_tests

use std::sync::Arc;

use integration_tests::fixtures::*;
use integration_tests::helpers::*;
use rand::seq::SliceRandom;
use rank_common::AppConfig;
use rank_core::{CorpusShape, EdgeRow, ScoreEntry, UserId, WeightConfig};
use rank_service::services::{ScoreAggregator, TrustGraphBuilder};
use rank_service::{BatchRunner, RankingService};
use serde_json::Value;

fn edge(rows: &[EdgeRow], i: i64, j: i64) -> Option<f64> {
    rows.iter().find(|e| e.i == uid(i) && e.j == uid(j)).map(|e| e.v)
}

fn score(rows: &[ScoreEntry], id: i64) -> Option<f64> {
    rows.iter().find(|s| s.i == uid(id)).map(|s| s.v)
}

// ============================================================================
// In-memory runs
// ============================================================================

#[tokio::test]
async fn test_channel_thread_end_to_end() {
    let store = MemoryStore::new();
    let id = unique_community();
    store.add_messages(&id, vec![channel_thread()]);

    let weights = WeightConfig::new(30.0, 40.0, 50.0).with_thread_participation(0.0);
    let ctx = memory_context(&store, weights).unwrap();
    let result = RankingService::new(&ctx).run(&id, CorpusShape::Channel).await.unwrap();

    assert_eq!(result.messages, 3);
    let saved = store.outputs(&id).unwrap();
    assert_eq!(edge(&saved.edges, 200, 100), Some(70.0));
    assert_eq!(score(&saved.scores, 100), Some(1000.0));
    assert_eq!(score(&saved.scores, 200), Some(0.0));
    assert_eq!(saved.scores[0].i, uid(100));

    let report = saved.report.unwrap();
    let top = &report.scores[0];
    assert_eq!(top.i, uid(100));
    assert_eq!(top.num_received_reactions, 1);
    assert_eq!(top.num_received_replies, 1);
    assert_eq!(top.num_given_reactions, None);
    assert_eq!(report.total_num_posts, 3);
}

#[tokio::test]
async fn test_thread_participation_pairs() {
    let store = MemoryStore::new();
    let id = unique_community();
    let root = message(1, Some(1))
        .with_reply(message(2, Some(10)))
        .with_reply(message(3, Some(10)))
        .with_reply(message(4, Some(10)))
        .with_reply(message(5, Some(20)));
    store.add_messages(&id, vec![root]);

    let weights = WeightConfig::new(0.0, 0.0, 0.0).with_thread_participation(10.0);
    let ctx = memory_context(&store, weights).unwrap();
    RankingService::new(&ctx).run(&id, CorpusShape::Channel).await.unwrap();

    let saved = store.outputs(&id).unwrap();
    assert_eq!(edge(&saved.edges, 10, 20), Some(10.0));
    assert_eq!(edge(&saved.edges, 20, 10), Some(10.0));
}

#[tokio::test]
async fn test_mentions_resolve_against_identities() {
    let store = MemoryStore::new();
    let id = unique_community();
    store.add_messages(
        &id,
        vec![
            message(1, Some(7)).with_text("thanks @alice"),
            message(2, Some(7)).with_text("thanks @bob"),
        ],
    );
    store.add_identities(&id, vec![profile(42, "alice")]);

    let ctx = memory_context(&store, test_weights()).unwrap();
    RankingService::new(&ctx).run(&id, CorpusShape::Flat).await.unwrap();

    let saved = store.outputs(&id).unwrap();
    assert_eq!(saved.edges.len(), 1);
    assert_eq!(edge(&saved.edges, 7, 42), Some(50.0));
}

#[tokio::test]
async fn test_self_interactions_never_become_edges() {
    let store = MemoryStore::new();
    let id = unique_community();
    store.add_messages(
        &id,
        vec![
            message(1, Some(5)).with_reaction(reaction_by(5)).with_text("me @me"),
            message(2, Some(5)).with_reply_to(mid(1)),
        ],
    );
    store.add_identities(&id, vec![profile(5, "me")]);

    let ctx = memory_context(&store, test_weights()).unwrap();
    let outcome = RankingService::new(&ctx).rank(&id, CorpusShape::Flat).await.unwrap();

    assert!(outcome.edges.is_empty());
    assert!(outcome.scores.is_empty());
    assert!(outcome.edges.iter().all(|e| e.i != e.j));
}

#[tokio::test]
async fn test_admins_fill_identities_and_flag_rows() {
    let store = MemoryStore::new();
    let id = unique_community();
    store.add_messages(
        &id,
        vec![message(1, Some(1)), message(2, Some(2)).with_reply_to(mid(1))],
    );
    store.add_admins(&id, vec![profile(1, "owner").with_bio("ignored")]);
    store.set_seed(&id, vec![ScoreEntry::new(uid(1), 0.9)]);

    let ctx = memory_context(&store, test_weights()).unwrap();
    RankingService::new(&ctx).run(&id, CorpusShape::Flat).await.unwrap();

    let report = store.outputs(&id).unwrap().report.unwrap();
    let owner = report.scores.iter().find(|r| r.i == uid(1)).unwrap();
    assert!(owner.is_admin);
    assert_eq!(owner.username, "owner");
    assert_eq!(owner.bio, "");
    assert_eq!(report.seed[0].v, 0.9);
    assert!(report.seed[0].is_admin);
}

#[tokio::test]
async fn test_batch_isolates_missing_corpus() {
    let store = MemoryStore::new();
    let present = unique_community();
    store.add_messages(&present, vec![channel_thread()]);

    let ctx = memory_context(&store, test_weights()).unwrap();
    let summary = BatchRunner::new(Arc::new(ctx), 4)
        .run(vec![
            ("nowhere".to_string(), CorpusShape::Channel),
            (present.clone(), CorpusShape::Channel),
        ])
        .await;

    assert_eq!(summary.succeeded.len(), 1);
    assert_eq!(summary.succeeded[0].community_id, present);
    assert_eq!(summary.failed[0].code, "CORPUS_NOT_FOUND");
    assert!(store.outputs("nowhere").is_none());
}

#[test]
fn test_aggregation_is_order_independent() {
    let messages: Vec<_> = (1..=60)
        .map(|n| {
            let author = n % 7;
            message(n, Some(author))
                .with_reply_to(mid((n - 1).max(1)))
                .with_reaction(reaction_by((n + 3) % 7))
        })
        .collect();
    let corpus = rank_core::Corpus::new("shuffle", CorpusShape::Flat, messages);
    let layout = rank_service::services::layout_for(CorpusShape::Flat);
    let index = layout.walk(&corpus);
    let mentions = rank_service::services::MentionIndex::build(&rank_core::IdentityMap::new());
    let mut edges = TrustGraphBuilder::new(WeightConfig::new(0.1, 0.7, 0.3), layout, &mentions)
        .build(&index)
        .edges;

    let expected = ScoreAggregator::from_edges(&edges).raw_scores();
    let mut rng = rand::thread_rng();
    for _ in 0..10 {
        edges.shuffle(&mut rng);
        assert_eq!(ScoreAggregator::from_edges(&edges).raw_scores(), expected);
    }
}

// ============================================================================
// Filesystem runs
// ============================================================================

#[tokio::test]
async fn test_filesystem_run_writes_all_outputs() {
    let ws = TestWorkspace::new().unwrap();
    let channel = unique_community();
    let chat = unique_community();

    ws.write_messages(
        &channel,
        &vec![RecordFixture::new(1, None)
            .reaction_count(4)
            .comment(RecordFixture::new(2, Some(100)).reacted_by(200))
            .comment(RecordFixture::new(3, Some(200)).reply_to(2))],
    )
    .unwrap();
    ws.write_users(&channel, &vec![user_row(100, "alice", "Alice", "Smith")]).unwrap();

    ws.write_messages(
        &chat,
        &vec![
            RecordFixture::new(10, Some(1)).text("hello @bob!"),
            RecordFixture::new(11, Some(2)).reply_to(10).reacted_by(1),
        ],
    )
    .unwrap();
    ws.write_users(&chat, &vec![user_row(2, "bob", "", "")]).unwrap();
    ws.write_seed(&chat, &serde_json::json!([{ "i": "1", "v": 0.5 }])).unwrap();

    let toml = format!(
        "{}\n[export]\ndays_back = 14\n",
        ws.config_toml(&[&channel, &chat], &[&chat])
    );
    let config = AppConfig::from_toml_str(&toml).unwrap();
    let summary = rank_cli::run(config).await.unwrap();
    assert!(summary.is_success());

    let layout = ws.layout();
    let report: Value = TestWorkspace::read_json(&layout.report_path(&channel)).unwrap();
    assert_eq!(report["category"], "socialrank");
    assert_eq!(report["channel"], channel.as_str());
    assert_eq!(report["total_num_posts"], 3);
    assert_eq!(report["days_back"], 14);
    assert_eq!(report["scores"][0]["i"], "100");
    assert_eq!(report["scores"][0]["display_name"], "Alice Smith");
    assert_eq!(report["scores"][0]["v"], 1000.0);

    let chat_scores: Vec<ScoreEntry> = TestWorkspace::read_json(&layout.scores_path(&chat)).unwrap();
    // 1 mentions and reacts to 2; 2 replies to 1
    assert_eq!(chat_scores[0].i, uid(2));
    let chat_report: Value = TestWorkspace::read_json(&layout.report_path(&chat)).unwrap();
    assert_eq!(chat_report["seed"][0]["v"], 0.5);
    assert_eq!(chat_report["scores"][0]["num_given_reactions"], 0);

    let edges: Vec<EdgeRow> = TestWorkspace::read_json(&layout.edges_path(&chat)).unwrap();
    let pairs: Vec<(UserId, UserId)> = edges.iter().map(|e| (e.i, e.j)).collect();
    assert_eq!(pairs, vec![(uid(1), uid(2)), (uid(2), uid(1))]);
}

#[tokio::test]
async fn test_filesystem_skips_malformed_records() {
    let ws = TestWorkspace::new().unwrap();
    let id = unique_community();
    ws.write_raw(
        &ws.layout().messages_path(&id),
        r#"[
            {"id": 1, "date": "2024-05-01T09:00:00Z", "from_id": 100},
            {"id": 2, "from_id": 200, "replies_data": [
                {"id": 3, "date": "2024-05-01T09:03:00Z", "from_id": 300, "reply_to_msg_id": 1}
            ]},
            {"id": 4, "date": "2024-05-01T09:04:00Z", "from_id": 400, "reply_to_msg_id": 1}
        ]"#,
    )
    .unwrap();
    ws.write_raw(&ws.layout().users_path(&id), "{ not json").unwrap();

    let config = AppConfig::from_toml_str(&ws.config_toml(&[&id], &[&id])).unwrap();
    let summary = rank_cli::run(config).await.unwrap();

    assert!(summary.is_success());
    // The dateless record goes; its valid reply stays and still links 300 -> 100
    assert_eq!(summary.succeeded[0].skipped_records, 1);
    assert_eq!(summary.succeeded[0].messages, 3);
    assert_eq!(summary.succeeded[0].edges, 2);
}
