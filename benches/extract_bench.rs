//! Structured extraction and response resolution benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use smarttravel_client::models::ServerResponse;
use smarttravel_client::{extract_structured, extract_structured_json, RouteRecommendation};

/// Typical model reply with a trailing recommendation object
fn create_model_reply(narrative_len: usize) -> String {
    format!(
        "{} {{\"best_route_index\": 2, \"recommended_mode\": \"bus\", \
         \"estimated_time_minutes\": 95, \"estimated_cost\": 120, \
         \"explanation\": \"KSRTC express avoids the ghat traffic\"}} Safe travels!",
        "Here are the options for your trip. ".repeat(narrative_len)
    )
}

/// Benchmark: Extraction from replies of different sizes
fn bench_extract_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_sizes");

    for size in [1, 10, 100, 1000].iter() {
        let reply = create_model_reply(*size);

        group.bench_with_input(BenchmarkId::new("extract_json", size), size, |b, _| {
            b.iter(|| black_box(extract_structured_json(black_box(&reply))))
        });
    }

    group.finish();
}

/// Benchmark: Typed extraction
fn bench_typed_extract(c: &mut Criterion) {
    let reply = create_model_reply(10);

    c.bench_function("extract_route_recommendation", |b| {
        b.iter(|| black_box(extract_structured::<RouteRecommendation>(black_box(&reply))))
    });
}

/// Benchmark: Reply without any object
fn bench_extract_miss(c: &mut Criterion) {
    let reply = "No structured data in this reply. ".repeat(100);

    c.bench_function("extract_miss", |b| {
        b.iter(|| black_box(extract_structured_json(black_box(&reply))))
    });
}

/// Benchmark: Response shape resolution
fn bench_resolve_response(c: &mut Criterion) {
    let bodies = [
        ("choices", json!({"choices": [{"message": {"content": "Take the train"}}]})),
        ("response", json!({"response": "Take the train"})),
        ("content", json!({"content": "Take the train"})),
        ("error", json!({"error": "Model overloaded"})),
    ];

    let mut group = c.benchmark_group("resolve_response");

    for (name, body) in bodies.iter() {
        group.bench_with_input(BenchmarkId::new("resolve", name), body, |b, body| {
            b.iter(|| black_box(ServerResponse::resolve(black_box(body)).ok()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_sizes,
    bench_typed_extract,
    bench_extract_miss,
    bench_resolve_response
);
criterion_main!(benches);
