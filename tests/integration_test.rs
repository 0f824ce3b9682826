// Integration tests for recipex
use recipex::prelude::*;
use recipex::{cosine_distance_sparse, euclidean_distance, tfidf_vectorize, FinderState, NumericMatrix};

const FEATURES: [&str; 8] = [
    "log_minutes",
    "calories",
    "total fat (PDV%)",
    "sugar (PDV%)",
    "sodium (PDV%)",
    "protein (PDV%)",
    "saturated fat (PDV%)",
    "carbohydrates (PDV%)",
];

fn with_features(recipe: Recipe, values: [f64; 8]) -> Recipe {
    recipe.with_features(FEATURES.iter().copied().zip(values))
}

fn sample_recipes() -> Vec<Recipe> {
    vec![
        with_features(
            Recipe::new(101, "Recipe A", "tag1 tag2", "step1 step2", "ing1 ing2"),
            [1.0, 100.0, 10.0, 5.0, 1.0, 2.0, 1.0, 50.0],
        ),
        with_features(
            Recipe::new(102, "Recipe B", "tag2 tag3", "step2 step3", "ing2 ing3"),
            [2.0, 200.0, 20.0, 10.0, 2.0, 4.0, 2.0, 100.0],
        ),
        with_features(
            Recipe::new(103, "Recipe C", "tag3 tag4", "step3 step4", "ing3 ing4"),
            [3.0, 300.0, 30.0, 15.0, 3.0, 6.0, 3.0, 150.0],
        ),
    ]
}

fn kitchen_recipes() -> Vec<Recipe> {
    let rows = [
        (1, "apple pie", "dessert baking american", "peel slice apples bake crust", "apple flour butter sugar cinnamon"),
        (2, "pear tart", "dessert baking french", "slice pears bake crust", "pear flour butter sugar"),
        (3, "leek soup", "soup winter vegetarian", "chop leeks boil blend", "leek potato stock cream"),
        (4, "potato soup", "soup winter", "peel potatoes boil blend", "potato stock cream onion"),
        (5, "beef stew", "main winter", "brown beef simmer stew", "beef carrot onion stock"),
        (6, "apple crumble", "dessert baking british", "slice apples top crumble bake", "apple flour butter sugar oats"),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (id, name, tags, steps, ingredients))| {
            let x = i as f64 / 5.0 - 0.5;
            with_features(Recipe::new(*id, *name, *tags, *steps, *ingredients), [x, -x, x, x, -x, x, x, -x])
        })
        .collect()
}

fn ready(recipes: Vec<Recipe>) -> RecipeFinder {
    let finder = RecipeFinder::from_recipes(recipes, FinderConfig::default()).unwrap();
    finder.preprocess().unwrap();
    finder
}

#[test]
fn test_find_similar_sample_table() {
    let finder = ready(sample_recipes());
    let results = finder.find_similar_default(101).unwrap();

    let ids: Vec<u64> = results.iter().map(|r| r.recipe.id).collect();
    assert_eq!(ids, vec![102, 103]);
    assert!(results[0].combined_distance <= results[1].combined_distance);
}

#[test]
fn test_kitchen_neighbours() {
    let finder = ready(kitchen_recipes());

    let desserts: Vec<u64> = finder.find_similar(1, 2).unwrap().iter().map(|r| r.recipe.id).collect();
    assert!(desserts.contains(&2));
    assert!(desserts.contains(&6));

    let soups = finder.find_similar(3, 1).unwrap();
    assert_eq!(soups[0].recipe.id, 4);
}

#[test]
fn test_result_invariants_for_every_recipe() {
    let finder = ready(kitchen_recipes());
    let corpus_size = finder.corpus().len();

    for recipe in finder.corpus().iter() {
        for n in [0, 1, 3, 5, 10] {
            let results = finder.find_similar(recipe.id, n).unwrap();
            assert_eq!(results.len(), n.min(corpus_size - 1));
            assert!(results.iter().all(|r| r.recipe.id != recipe.id));
            assert!(results.iter().all(|r| r.combined_distance >= 0.0));
            assert!(results
                .windows(2)
                .all(|w| w[0].combined_distance <= w[1].combined_distance));
        }
    }
}

#[test]
fn test_self_distance_and_symmetry_per_channel() {
    let finder = ready(kitchen_recipes());
    let ids: Vec<u64> = finder.corpus().iter().map(|r| r.id).collect();
    let all: Vec<_> = ids
        .iter()
        .map(|&id| finder.channel_distances(id).unwrap())
        .collect();

    for (row_x, x) in ids.iter().enumerate() {
        for channel in Channel::ALL {
            assert!(all[row_x].channel(channel)[row_x].abs() < 1e-9);
        }
        for (row_y, y) in ids.iter().enumerate() {
            for channel in Channel::ALL {
                let xy = all[row_x].channel(channel)[row_y];
                let yx = all[row_y].channel(channel)[row_x];
                assert!((xy - yx).abs() < 1e-9, "{channel} not symmetric for {x}/{y}");
            }
        }
    }
}

#[test]
fn test_unknown_and_unprepared() {
    let finder = RecipeFinder::from_recipes(sample_recipes(), FinderConfig::default()).unwrap();
    assert_eq!(finder.state(), FinderState::Unprepared);
    assert!(matches!(finder.find_similar(101, 5), Err(Error::NotPrepared)));

    finder.preprocess().unwrap();
    assert!(matches!(finder.find_similar(999, 5), Err(Error::UnknownIdentifier(999))));
}

#[test]
fn test_concurrent_queries_across_rebuild() {
    let finder = ready(kitchen_recipes());
    let expected: Vec<u64> = finder.find_similar(5, 3).unwrap().iter().map(|r| r.recipe.id).collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..20 {
                    let ids: Vec<u64> = finder.find_similar(5, 3).unwrap().iter().map(|r| r.recipe.id).collect();
                    assert_eq!(ids, expected);
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..5 {
                finder.preprocess().unwrap();
            }
        });
    });
}

#[test]
fn test_assembled_corpus_matches_direct_corpus() {
    let recipes = sample_recipes();
    let mut assembler = CorpusAssembler::new();
    for column in ["name", "tags", "steps", "ingredients"] {
        let rows: Vec<(u64, String)> = recipes
            .iter()
            .map(|r| (r.id, r.text(column).unwrap_or_default().to_string()))
            .collect();
        // two row partitions per column
        let (first, second) = rows.split_at(1);
        assembler.add_text(column, first.to_vec()).unwrap();
        assembler.add_text(column, second.to_vec()).unwrap();
    }
    assembler
        .add_numeric(recipes.iter().map(|r| (r.id, r.features.clone())))
        .unwrap();

    let corpus = assembler.build().unwrap();
    assert_eq!(corpus.recipes(), recipes.as_slice());

    let finder = RecipeFinder::new(corpus, FinderConfig::default()).unwrap();
    finder.preprocess().unwrap();
    assert_eq!(finder.find_similar(101, 1).unwrap()[0].recipe.id, 102);
}

#[test]
fn test_standalone_distance_functions() {
    let docs = ["tag1 tag2", "tag2 tag3", "tag3 tag4"];
    let (matrix, _) = tfidf_vectorize(&docs[..]).unwrap();
    let corpus = Corpus::new(sample_recipes()).unwrap();

    let distances = cosine_distance_sparse(101, &matrix, corpus.id_index()).unwrap();
    assert_eq!(distances[0], 0.0);
    assert!(distances[1] < distances[2]);
    assert!((distances[2] - 1.0).abs() < 1e-12);

    let numeric = NumericMatrix::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(euclidean_distance(&numeric, 0, &[1.0]).unwrap(), vec![0.0, 1.0, 2.0]);
}

#[test]
fn test_response_json_shape() {
    let finder = ready(sample_recipes());
    let similar = finder.find_similar(101, 2).unwrap();
    let response = SimilarResponse::new(101, similar, 2, true);
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["reference_id"], 101);
    assert_eq!(json["result"].as_array().unwrap().len(), 2);
    assert_eq!(json["result"][0]["recipe"]["tags"], "tag2 tag3");
    assert_eq!(json["stats"]["results_count"], 2);
}
