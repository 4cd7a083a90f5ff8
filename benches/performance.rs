use criterion::{black_box, criterion_group, criterion_main, Criterion};
use solgraph::core::{ContractExtractor, ExtractionCache};
use solgraph::dataset::{DatasetBuilder, HashingEncoder};

fn sample_contract(i: usize) -> String {
    format!(
        r#"pragma solidity ^0.8.0;

contract Vault{i} {{
    mapping(address => uint) deposits{i};
    uint totalLocked{i};
    address curator;

    modifier onlyCurator() {{
        require(msg.sender == curator);
        _;
    }}

    function deposit{i}(uint amount) public {{
        deposits{i}[msg.sender] = deposits{i}[msg.sender] + amount;
        totalLocked{i} = totalLocked{i} + amount;
    }}

    function sweep{i}() public onlyCurator {{
        totalLocked{i} = 0;
    }}
}}
"#
    )
}

fn benchmark_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("contract_extraction");

    let source = sample_contract(0);
    let extractor = ContractExtractor::new();

    group.bench_function("single_contract_source", |b| {
        b.iter(|| {
            let graph = extractor.extract_source(black_box(&source));
            black_box(graph)
        });
    });

    group.finish();
}

fn benchmark_dataset_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataset_assembly");

    // Create a small corpus of sample contracts
    let test_dir = std::env::temp_dir().join("solgraph_bench");
    std::fs::create_dir_all(&test_dir).unwrap();
    for i in 0..10 {
        std::fs::write(test_dir.join(format!("vault_{}.sol", i)), sample_contract(i)).unwrap();
    }

    let encoder = HashingEncoder::default();

    group.bench_function("small_corpus", |b| {
        b.iter(|| {
            let builder = DatasetBuilder::new(&encoder);
            let records = builder.build(black_box(&test_dir));
            black_box(records)
        });
    });

    // Larger corpus for scalability testing
    let large_test_dir = std::env::temp_dir().join("solgraph_bench_large");
    std::fs::create_dir_all(&large_test_dir).unwrap();
    for i in 0..100 {
        std::fs::write(
            large_test_dir.join(format!("vault_{}.sol", i)),
            sample_contract(i),
        )
        .unwrap();
    }

    group.bench_function("large_corpus", |b| {
        b.iter(|| {
            let builder = DatasetBuilder::new(&encoder);
            let records = builder.build(black_box(&large_test_dir));
            black_box(records)
        });
    });

    group.finish();
}

fn benchmark_cache_performance(c: &mut Criterion) {
    use tempfile::TempDir;

    let mut group = c.benchmark_group("cache_performance");

    // Setup test files
    let test_dir = TempDir::new().unwrap();
    let test_file = test_dir.path().join("Vault.sol");
    std::fs::write(&test_file, sample_contract(0)).unwrap();

    group.bench_function("cache_store_and_retrieve", |b| {
        b.iter(|| {
            let cache = ExtractionCache::new(None).unwrap();
            // First access - cache miss
            let needs_update = cache.needs_update(black_box(&test_file)).unwrap();
            black_box(needs_update);

            // Second access - should be cache hit
            let needs_update_2 = cache.needs_update(black_box(&test_file)).unwrap();
            black_box(needs_update_2);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_extraction,
    benchmark_dataset_assembly,
    benchmark_cache_performance
);
criterion_main!(benches);
