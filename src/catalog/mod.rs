//! Catalog Module - Recipes and meal plans
//!
//! In-memory indexes over typed recipe and meal-plan records, with the CRUD
//! operations the application exposes: search and difficulty filtering for
//! recipes, ownership checks on mutation, and per-user meal plans queried
//! by date-range overlap.

mod meal_plan;
mod recipe;

pub use meal_plan::{MealPlan, MealPlanner, MealSlot, MealType};
pub use recipe::{Author, Difficulty, Ingredient, Recipe, RecipeCatalog, RecipeInput};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Meal plan not found: {0}")]
    MealPlanNotFound(String),

    #[error("Not authorized to modify this record")]
    NotOwner,
}
