use dadly::dietary::{DAIRY_KEYWORDS, EGG_HONEY_KEYWORDS, GLUTEN_KEYWORDS, MEAT_KEYWORDS};
use dadly::{classify, DietaryTag, Recipe};
use serde_json::json;

fn recipe_from(value: serde_json::Value) -> Recipe {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_delimited_chicken_recipe() {
    let recipe = recipe_from(json!({
        "name": "Dinner",
        "ingredients": "chicken, rice, salt"
    }));
    let tags = classify(&recipe);

    assert!(!tags.contains(DietaryTag::Vegetarian));
    assert!(!tags.contains(DietaryTag::Vegan));
    assert!(tags.contains(DietaryTag::GlutenFree));
    assert!(tags.contains(DietaryTag::DairyFree));
}

#[test]
fn test_flour_and_water() {
    let recipe = recipe_from(json!({
        "name": "Dough",
        "ingredients": ["flour", "water"]
    }));
    let tags = classify(&recipe);

    assert!(tags.contains(DietaryTag::Vegetarian));
    assert!(tags.contains(DietaryTag::Vegan));
    assert!(!tags.contains(DietaryTag::GlutenFree));
    assert!(tags.contains(DietaryTag::DairyFree));
}

#[test]
fn test_every_meat_keyword_blocks_vegetarian() {
    for meat in MEAT_KEYWORDS {
        let recipe = recipe_from(json!({
            "name": "Plate",
            "ingredients": ["rice", format!("2 cups {meat}")]
        }));
        let tags = classify(&recipe);
        assert!(
            !tags.contains(DietaryTag::Vegetarian),
            "{meat} should not be vegetarian"
        );
        assert!(!tags.contains(DietaryTag::Vegan));
    }
}

#[test]
fn test_every_dairy_and_egg_keyword_blocks_vegan() {
    for keyword in DAIRY_KEYWORDS.iter().chain(EGG_HONEY_KEYWORDS) {
        let recipe = recipe_from(json!({"name": "Bake", "ingredients": [keyword]}));
        let tags = classify(&recipe);
        assert!(tags.contains(DietaryTag::Vegetarian), "{keyword}");
        assert!(!tags.contains(DietaryTag::Vegan), "{keyword}");
    }
}

#[test]
fn test_every_gluten_keyword_blocks_gluten_free() {
    for keyword in GLUTEN_KEYWORDS {
        let recipe = recipe_from(json!({"name": "Side", "ingredients": [keyword]}));
        assert!(!classify(&recipe).contains(DietaryTag::GlutenFree), "{keyword}");
    }
}

#[test]
fn test_all_is_always_present_and_vegan_implies_vegetarian() {
    let samples = [
        json!({}),
        json!({"name": ""}),
        json!({"name": "Tofu Bowl", "ingredients": "tofu\nrice\nkale"}),
        json!({"name": "Carbonara", "ingredients": ["pasta", "egg", "bacon", "parmesan"]}),
        json!({"name": "Fruit", "description": "Just fruit", "ingredients": 42}),
        json!({"name": "Encoded", "ingredients": "[\"beans\", \"honey\"]"}),
    ];

    for sample in samples {
        let tags = classify(&recipe_from(sample.clone()));
        assert!(tags.contains(DietaryTag::All), "{sample}");
        if tags.contains(DietaryTag::Vegan) {
            assert!(tags.contains(DietaryTag::Vegetarian), "{sample}");
        }
    }
}

#[test]
fn test_json_encoded_ingredients_are_classified() {
    let recipe = recipe_from(json!({
        "name": "Glazed carrots",
        "ingredients": "[\"carrots\", \"honey\"]"
    }));
    let tags = classify(&recipe);
    assert!(tags.contains(DietaryTag::Vegetarian));
    assert!(!tags.contains(DietaryTag::Vegan));
}

#[test]
fn test_case_is_ignored() {
    let recipe = recipe_from(json!({"name": "GRILLED SALMON", "ingredients": ["Lemon"]}));
    assert!(!classify(&recipe).contains(DietaryTag::Vegetarian));
}

#[test]
fn test_tags_serialize_as_labels() {
    let recipe = recipe_from(json!({"name": "Salad", "ingredients": ["lettuce"]}));
    let value = serde_json::to_value(classify(&recipe)).unwrap();
    assert_eq!(
        value,
        json!(["all", "vegetarian", "vegan", "gluten-free", "dairy-free"])
    );
}
