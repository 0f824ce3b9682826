// Performance benchmarks for corpus preprocessing and similarity queries
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use recipex::prelude::*;
use recipex::{bow_vectorize, tfidf_vectorize};
use std::sync::Arc;

const WORDS: &[&str] = &[
    "apple", "pear", "soup", "stew", "bake", "boil", "slice", "chop", "flour", "butter", "sugar", "onion",
    "garlic", "beef", "chicken", "leek", "potato", "cream", "stock", "rice", "easy", "quick", "dessert",
    "winter", "summer", "vegan", "spicy", "roast", "grill", "simmer", "whisk", "fold",
];

fn random_text(rng: &mut StdRng, words: usize) -> String {
    (0..words)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_corpus(size: usize) -> Vec<Recipe> {
    let mut rng = StdRng::seed_from_u64(42);
    let features = FinderConfig::default().numeric_feature_order;

    (0..size)
        .map(|i| {
            let name = random_text(&mut rng, 3);
            let tags = random_text(&mut rng, 6);
            let steps = random_text(&mut rng, 20);
            let ingredients = random_text(&mut rng, 8);
            let values: Vec<(String, f64)> = features
                .iter()
                .map(|f| (f.clone(), rng.random_range(-2.0..2.0)))
                .collect();
            Recipe::new(i as u64, name, tags, steps, ingredients).with_features(values)
        })
        .collect()
}

fn benchmark_vectorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorize");

    let recipes = generate_corpus(10000);
    let steps: Vec<&str> = recipes.iter().map(|r| r.steps.as_str()).collect();
    let ingredients: Vec<&str> = recipes.iter().map(|r| r.ingredients.as_str()).collect();

    group.bench_function("tfidf_steps", |b| {
        b.iter(|| black_box(tfidf_vectorize(black_box(&steps[..])).unwrap()));
    });
    group.bench_function("bow_ingredients", |b| {
        b.iter(|| black_box(bow_vectorize(black_box(&ingredients[..])).unwrap()));
    });

    group.finish();
}

fn benchmark_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");
    group.sample_size(10);

    for size in [1000, 10000].iter() {
        let finder = RecipeFinder::from_recipes(generate_corpus(*size), FinderConfig::default()).unwrap();
        group.bench_with_input(BenchmarkId::new("recipex", size), size, |b, _| {
            b.iter(|| finder.preprocess().unwrap());
        });
    }

    group.finish();
}

fn benchmark_find_similar(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_similar");

    for size in [1000, 10000, 50000].iter() {
        let finder = RecipeFinder::from_recipes(generate_corpus(*size), FinderConfig::default()).unwrap();
        finder.preprocess().unwrap();

        group.bench_with_input(BenchmarkId::new("top_100", size), size, |b, &size| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let id = rng.random_range(0..size as u64);
                black_box(finder.find_similar(black_box(id), 100).unwrap());
            });
        });
    }

    group.finish();
}

fn benchmark_concurrent_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_queries");

    let finder = Arc::new(RecipeFinder::from_recipes(generate_corpus(5000), FinderConfig::default()).unwrap());
    finder.preprocess().unwrap();

    group.bench_function("recipex_concurrent", |b| {
        b.iter(|| {
            use std::thread;
            let handles: Vec<_> = (0..10u64)
                .map(|i| {
                    let finder = finder.clone();
                    thread::spawn(move || finder.find_similar(i * 100, 10))
                })
                .collect();

            for handle in handles {
                black_box(handle.join().unwrap().unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_vectorize,
    benchmark_preprocess,
    benchmark_find_similar,
    benchmark_concurrent_queries
);
criterion_main!(benches);
