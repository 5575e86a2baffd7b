//! Benchmarks for JTI normalization throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jti::{
    FormatRecordBuilder, JsonEnvelopeDecoder, Normalizer, NullDiagnostics, OutputFormat, Pipeline,
    RecordBuilder, TelemetryEnvelope, VecSink,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn interface_document(interfaces: usize) -> Value {
    let entries: Vec<Value> = (0..interfaces)
        .map(|i| {
            let queues: Vec<Value> = (0..8)
                .map(|q| json!({"queue_number": q, "packets": i * 100 + q, "bytes": i * 10_000 + q}))
                .collect();
            json!({
                "if_name": format!("xe-0/0/{}", i),
                "init_time": 1465400000,
                "snmp_if_index": 500 + i,
                "egress_queue_info": queues,
                "ingress_stats": {"if_pkts": i * 7, "if_octets": i * 700},
                "egress_stats": {"if_pkts": i * 9, "if_octets": i * 900},
                "if_operational_status": "UP"
            })
        })
        .collect();

    json!({"jnpr_interface_ext": {"interface_stats": entries}})
}

fn firewall_document(filters: usize) -> Value {
    let entries: Vec<Value> = (0..filters)
        .map(|i| {
            json!({
                "filter_name": format!("filter-{}", i),
                "timestamp": 1465467390,
                "memory_usage": [{"name": "HEAP", "allocated": 1688}],
                "counter_stats": [
                    {"name": "cnt1", "packets": 79, "bytes": 6320},
                    {"name": "cnt2", "packets": 12, "bytes": 960}
                ]
            })
        })
        .collect();

    json!({"jnpr_firewall_ext": {"firewall_stats": entries}})
}

fn quiet_normalizer() -> Normalizer {
    Normalizer::default().with_diagnostics(Arc::new(NullDiagnostics))
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = quiet_normalizer();

    for interfaces in [1usize, 16, 128] {
        let envelope =
            TelemetryEnvelope::new("mx960-1", 1465467390000, interface_document(interfaces));
        let leaves = normalizer.normalize(&envelope).metrics.len();

        group.throughput(Throughput::Elements(leaves as u64));
        group.bench_with_input(
            BenchmarkId::new("interfaces", interfaces),
            &envelope,
            |b, envelope| b.iter(|| black_box(normalizer.normalize(black_box(envelope)))),
        );
    }

    let envelope = TelemetryEnvelope::new("mx960-1", 1465467390, firewall_document(64));
    group.bench_function("firewall_64_filters", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&envelope))))
    });

    group.finish();
}

fn bench_record_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_building");

    let envelope = TelemetryEnvelope::new("mx960-1", 1465467390, interface_document(16));
    let metrics = quiet_normalizer().normalize(&envelope).metrics;
    group.throughput(Throughput::Elements(metrics.len() as u64));

    for format in [OutputFormat::Structured, OutputFormat::Flat, OutputFormat::Statsd] {
        let builder = FormatRecordBuilder::new(format);
        group.bench_function(format.as_str(), |b| {
            b.iter(|| {
                for metric in &metrics {
                    black_box(builder.build(&metric.tags));
                }
            })
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let message = json!({
        "system_id": "mx960-1",
        "timestamp": 1465467390000u64,
        "enterprise": {"juniperNetworks": interface_document(16)}
    })
    .to_string();
    group.throughput(Throughput::Bytes(message.len() as u64));

    group.bench_function("decode_normalize_emit", |b| {
        b.iter(|| {
            let mut pipeline = Pipeline::new(
                JsonEnvelopeDecoder,
                quiet_normalizer(),
                FormatRecordBuilder::default(),
                VecSink::new(),
            );
            let summary = pipeline.process(black_box(message.as_bytes()));
            black_box(summary)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_record_building, bench_pipeline);

criterion_main!(benches);
