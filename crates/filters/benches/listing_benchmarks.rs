use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use storefront_catalog::{Catalog, Fit, ProductRecord};
use storefront_filters::{
    apply, decode_str, encode_string, listing, project, sort_products, EngineConfig, FacetConfig, Product, SortBy,
};

const COLOURS: [&str; 6] = ["Navy", "Black", "Heather Grey", "Red", "Forest", "White"];
const CATEGORIES: [&str; 4] = ["apparel", "drinkware", "bags", "headwear"];
const QUERY: &str = "categories=apparel,bags&minPrice=20&maxPrice=180&colours=Navy,Black&sizes=M&inStock=true&sort=price-low-high";

/// Deterministic synthetic catalog of `n` products.
fn synthetic_catalog(n: usize) -> (Vec<Product>, FacetConfig) {
    let products: Vec<Product> = (0..n)
        .map(|i| {
            ProductRecord {
                id: format!("sku-{i:05}"),
                name: format!("Product {}", n - i),
                price: 5.0 + (i * 37 % 240) as f64 + 0.99,
                category: CATEGORIES[i % CATEGORIES.len()].to_string(),
                subcategory: format!("sub-{}", i % 7),
                brand: format!("Brand {}", i % 11),
                fit: Fit::ALL[i % Fit::ALL.len()],
                material: if i % 2 == 0 { "Cotton" } else { "Polyester" }.to_string(),
                colours: vec![COLOURS[i % COLOURS.len()].to_string(), COLOURS[(i / 3) % COLOURS.len()].to_string()],
                sizes: vec!["S".into(), "M".into(), "L".into()],
                in_stock: i % 5 != 0,
                sold_count: Some((i * 13 % 500) as u64),
                rating: Some((i % 50) as f64 / 10.0),
                created_at: format!("2024-{:02}-{:02}T00:00:00Z", i % 12 + 1, i % 28 + 1),
                ..Default::default()
            }
            .try_into()
            .unwrap()
        })
        .collect();
    let facets = FacetConfig::from_products(&products);
    (products, facets)
}

fn bench_decode_encode(c: &mut Criterion) {
    let (_, facets) = synthetic_catalog(200);
    let mut group = c.benchmark_group("query_codec");

    group.bench_function("decode", |b| b.iter(|| decode_str(black_box(QUERY), &facets)));

    let state = decode_str(QUERY, &facets);
    group.bench_function("encode", |b| b.iter(|| encode_string(black_box(&state), &facets)));

    group.finish();
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_sort");

    for size in [100usize, 1_000, 10_000] {
        let (products, facets) = synthetic_catalog(size);
        let state = decode_str(QUERY, &facets);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("apply", size), &products, |b, products| {
            b.iter(|| apply(black_box(products), &state))
        });

        for mode in [SortBy::PriceLowHigh, SortBy::NameAZ, SortBy::Newest] {
            let matched = apply(&products, &state);
            group.bench_with_input(BenchmarkId::new(format!("sort/{mode}"), size), &matched, |b, matched| {
                b.iter(|| {
                    let mut listed = matched.clone();
                    sort_products(&mut listed, mode);
                    listed
                })
            });
        }
    }

    group.finish();
}

fn bench_full_listing(c: &mut Criterion) {
    let (products, facets) = synthetic_catalog(2_000);
    let catalog = Catalog::new(products, facets).unwrap();
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("listing");
    group.sample_size(200);

    group.bench_function("url_to_view", |b| {
        b.iter(|| {
            let state = decode_str(black_box(QUERY), catalog.facets());
            listing(catalog.products(), &state, catalog.facets(), &config).result_count
        })
    });

    let state = decode_str(QUERY, catalog.facets());
    group.bench_function("project_chips", |b| b.iter(|| project(black_box(&state), catalog.facets())));

    group.finish();
}

criterion_group!(benches, bench_decode_encode, bench_filter_and_sort, bench_full_listing);
criterion_main!(benches);
