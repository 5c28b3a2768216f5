use std::hint::black_box;

use bencher::{TestCase, TestPayload};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use micro_content::content::{ByteRangeContent, HttpContent};

static SMALL_BODY: TestPayload = TestPayload::whole(256);
static FORM_WINDOW: TestPayload = TestPayload::window(16 * 1024, 512, 8 * 1024);
static LARGE_BODY: TestPayload = TestPayload::whole(4 * 1024 * 1024);

fn create_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::small("small_body", SMALL_BODY),
        TestCase::normal("form_window", FORM_WINDOW),
        TestCase::large("large_body", LARGE_BODY),
    ]
}

fn benchmark_serialize_to(criterion: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime should build");
    let test_cases = create_test_cases();
    let mut group = criterion.benchmark_group("byte_range_serialize");

    for case in test_cases {
        let payload = case.payload();
        let content = ByteRangeContent::with_range(payload.buffer(), payload.offset(), payload.count())
            .expect("bench payload window should be valid");

        group.throughput(Throughput::Bytes(payload.count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &content, |b, content| {
            let mut sink: Vec<u8> = Vec::with_capacity(content.count());
            b.iter(|| {
                sink.clear();
                runtime.block_on(content.serialize_to(&mut sink)).expect("serialize into vec should not fail");
                black_box(sink.len());
            });
        });
    }

    group.finish();
}

criterion_group!(serialize, benchmark_serialize_to);
criterion_main!(serialize);
