//! Recipe records and the in-memory catalog.

use super::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Recipe difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

/// Who created a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// A shared recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,

    /// Minutes
    pub cooking_time: u32,
    pub servings: u32,
    pub image: String,
    pub author: Author,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller supplies when creating or updating a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeInput {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub cooking_time: u32,
    pub servings: u32,
    pub image: String,
    pub difficulty: Difficulty,
}

/// In-memory recipe index.
pub struct RecipeCatalog {
    recipes: HashMap<String, Recipe>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self {
            recipes: HashMap::new(),
        }
    }

    /// Catalog pre-loaded with the demo recipes.
    pub fn with_demo_data() -> Self {
        let mut catalog = Self::new();
        let demo_author = Author {
            id: "1".to_string(),
            name: Some("Demo User".to_string()),
            image: Some(
                "https://images.pexels.com/photos/771742/pexels-photo-771742.jpeg".to_string(),
            ),
        };

        catalog.create(
            &demo_author,
            RecipeInput {
                title: "Classic Spaghetti Carbonara".to_string(),
                description: "A creamy Italian pasta dish with pancetta and egg sauce"
                    .to_string(),
                ingredients: vec![
                    Ingredient {
                        name: "Spaghetti".to_string(),
                        amount: "400".to_string(),
                        unit: "g".to_string(),
                    },
                    Ingredient {
                        name: "Pancetta".to_string(),
                        amount: "150".to_string(),
                        unit: "g".to_string(),
                    },
                    Ingredient {
                        name: "Eggs".to_string(),
                        amount: "4".to_string(),
                        unit: "large".to_string(),
                    },
                    Ingredient {
                        name: "Parmesan".to_string(),
                        amount: "100".to_string(),
                        unit: "g".to_string(),
                    },
                ],
                instructions: vec![
                    "Boil the spaghetti in salted water".to_string(),
                    "Fry the pancetta until crispy".to_string(),
                    "Mix eggs and cheese".to_string(),
                    "Combine all ingredients".to_string(),
                ],
                cooking_time: 30,
                servings: 4,
                image: "https://images.pexels.com/photos/4518843/pexels-photo-4518843.jpeg"
                    .to_string(),
                difficulty: Difficulty::Medium,
            },
        );

        catalog.create(
            &demo_author,
            RecipeInput {
                title: "Grilled Salmon with Asparagus".to_string(),
                description: "Healthy and delicious salmon with grilled vegetables".to_string(),
                ingredients: vec![
                    Ingredient {
                        name: "Salmon fillet".to_string(),
                        amount: "500".to_string(),
                        unit: "g".to_string(),
                    },
                    Ingredient {
                        name: "Asparagus".to_string(),
                        amount: "400".to_string(),
                        unit: "g".to_string(),
                    },
                    Ingredient {
                        name: "Lemon".to_string(),
                        amount: "1".to_string(),
                        unit: "whole".to_string(),
                    },
                    Ingredient {
                        name: "Olive oil".to_string(),
                        amount: "2".to_string(),
                        unit: "tbsp".to_string(),
                    },
                ],
                instructions: vec![
                    "Preheat the grill".to_string(),
                    "Season the salmon".to_string(),
                    "Grill for 4-5 minutes each side".to_string(),
                    "Serve with grilled asparagus".to_string(),
                ],
                cooking_time: 25,
                servings: 4,
                image: "https://images.pexels.com/photos/3763847/pexels-photo-3763847.jpeg"
                    .to_string(),
                difficulty: Difficulty::Easy,
            },
        );

        catalog
    }

    /// Create a recipe owned by `author`. Returns the stored record.
    pub fn create(&mut self, author: &Author, input: RecipeInput) -> Recipe {
        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            ingredients: input.ingredients,
            instructions: input.instructions,
            cooking_time: input.cooking_time,
            servings: input.servings,
            image: input.image,
            author: author.clone(),
            difficulty: input.difficulty,
            created_at: Utc::now(),
        };
        self.recipes.insert(recipe.id.clone(), recipe.clone());
        recipe
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// List recipes, optionally filtered by a title substring and difficulty.
    pub fn list(&self, search: Option<&str>, difficulty: Option<Difficulty>) -> Vec<&Recipe> {
        let search_lower = search.map(str::to_lowercase);
        let mut results: Vec<&Recipe> = self
            .recipes
            .values()
            .filter(|r| match &search_lower {
                Some(q) => r.title.to_lowercase().contains(q),
                None => true,
            })
            .filter(|r| match difficulty {
                Some(d) => r.difficulty == d,
                None => true,
            })
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        results
    }

    /// Replace a recipe's user-editable fields. Only the author may update.
    pub fn update(
        &mut self,
        id: &str,
        author_id: &str,
        input: RecipeInput,
    ) -> Result<Recipe, CatalogError> {
        let recipe = self
            .recipes
            .get_mut(id)
            .ok_or_else(|| CatalogError::RecipeNotFound(id.to_string()))?;

        if recipe.author.id != author_id {
            return Err(CatalogError::NotOwner);
        }

        recipe.title = input.title;
        recipe.description = input.description;
        recipe.ingredients = input.ingredients;
        recipe.instructions = input.instructions;
        recipe.cooking_time = input.cooking_time;
        recipe.servings = input.servings;
        recipe.image = input.image;
        recipe.difficulty = input.difficulty;

        Ok(recipe.clone())
    }

    /// Delete a recipe. Only the author may delete.
    pub fn delete(&mut self, id: &str, author_id: &str) -> Result<(), CatalogError> {
        let recipe = self
            .recipes
            .get(id)
            .ok_or_else(|| CatalogError::RecipeNotFound(id.to_string()))?;

        if recipe.author.id != author_id {
            return Err(CatalogError::NotOwner);
        }

        self.recipes.remove(id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: &str) -> Author {
        Author {
            id: id.to_string(),
            name: Some("Tester".to_string()),
            image: None,
        }
    }

    fn input(title: &str, difficulty: Difficulty) -> RecipeInput {
        RecipeInput {
            title: title.to_string(),
            description: String::new(),
            ingredients: vec![],
            instructions: vec![],
            cooking_time: 10,
            servings: 2,
            image: String::new(),
            difficulty,
        }
    }

    #[test]
    fn test_create_then_get() {
        let mut catalog = RecipeCatalog::new();
        let created = catalog.create(&author("u1"), input("Pancakes", Difficulty::Easy));

        let fetched = catalog.get(&created.id).unwrap();
        assert_eq!(fetched.title, "Pancakes");
        assert_eq!(fetched.author.id, "u1");
    }

    #[test]
    fn test_demo_data_seeded() {
        let catalog = RecipeCatalog::with_demo_data();
        assert_eq!(catalog.len(), 2);

        let results = catalog.list(Some("carbonara"), None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_list_filters_by_difficulty() {
        let mut catalog = RecipeCatalog::new();
        catalog.create(&author("u1"), input("Toast", Difficulty::Easy));
        catalog.create(&author("u1"), input("Souffle", Difficulty::Hard));

        let easy = catalog.list(None, Some(Difficulty::Easy));
        assert_eq!(easy.len(), 1);
        assert_eq!(easy[0].title, "Toast");
    }

    #[test]
    fn test_update_requires_ownership() {
        let mut catalog = RecipeCatalog::new();
        let created = catalog.create(&author("u1"), input("Stew", Difficulty::Medium));

        let err = catalog
            .update(&created.id, "someone-else", input("Hijacked", Difficulty::Easy))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotOwner));

        let updated = catalog
            .update(&created.id, "u1", input("Beef Stew", Difficulty::Medium))
            .unwrap();
        assert_eq!(updated.title, "Beef Stew");
    }

    #[test]
    fn test_delete_requires_ownership() {
        let mut catalog = RecipeCatalog::new();
        let created = catalog.create(&author("u1"), input("Salad", Difficulty::Easy));

        assert!(matches!(
            catalog.delete(&created.id, "u2"),
            Err(CatalogError::NotOwner)
        ));
        catalog.delete(&created.id, "u1").unwrap();
        assert!(catalog.get(&created.id).is_none());
    }

    #[test]
    fn test_missing_recipe() {
        let mut catalog = RecipeCatalog::new();
        assert!(catalog.get("nope").is_none());
        assert!(matches!(
            catalog.delete("nope", "u1"),
            Err(CatalogError::RecipeNotFound(_))
        ));
    }
}
