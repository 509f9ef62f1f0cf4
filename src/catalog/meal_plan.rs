//! Meal plan records and the per-user planner.

use super::CatalogError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which meal of the day a slot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

/// One planned meal: a recipe on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlot {
    pub recipe_id: String,
    pub date: NaiveDate,
    pub meal_type: MealType,
}

/// A user's meal plan over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meals: Vec<MealSlot>,
}

/// Per-user meal plan storage.
///
/// A user has at most one plan per date range; saving a plan that overlaps
/// an existing one replaces it, matching the application's "one plan per
/// week" behavior.
pub struct MealPlanner {
    plans: Vec<MealPlan>,
}

impl MealPlanner {
    pub fn new() -> Self {
        Self { plans: Vec::new() }
    }

    /// Save a plan, replacing any existing plan for the same user that
    /// overlaps the new plan's range. Returns the stored record.
    pub fn save(
        &mut self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        meals: Vec<MealSlot>,
    ) -> MealPlan {
        self.plans.retain(|p| {
            !(p.user_id == user_id && ranges_overlap(p.start_date, p.end_date, start_date, end_date))
        });

        let plan = MealPlan {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            start_date,
            end_date,
            meals,
        };
        self.plans.push(plan.clone());
        plan
    }

    /// Find the user's plan overlapping the given range, if any.
    pub fn find(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Option<&MealPlan> {
        self.plans.iter().find(|p| {
            p.user_id == user_id && ranges_overlap(p.start_date, p.end_date, start_date, end_date)
        })
    }

    /// All plans belonging to a user.
    pub fn list_for_user(&self, user_id: &str) -> Vec<&MealPlan> {
        self.plans.iter().filter(|p| p.user_id == user_id).collect()
    }

    /// Delete a plan. Only its owner may delete it.
    pub fn delete(&mut self, id: &str, user_id: &str) -> Result<(), CatalogError> {
        let plan = self
            .plans
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::MealPlanNotFound(id.to_string()))?;

        if plan.user_id != user_id {
            return Err(CatalogError::NotOwner);
        }

        self.plans.retain(|p| p.id != id);
        Ok(())
    }
}

impl Default for MealPlanner {
    fn default() -> Self {
        Self::new()
    }
}

fn ranges_overlap(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && a_end >= b_start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(recipe_id: &str, d: NaiveDate) -> MealSlot {
        MealSlot {
            recipe_id: recipe_id.to_string(),
            date: d,
            meal_type: MealType::Dinner,
        }
    }

    #[test]
    fn test_save_then_find_by_overlap() {
        let mut planner = MealPlanner::new();
        let start = date(2024, 3, 4);
        let end = date(2024, 3, 10);

        planner.save("u1", start, end, vec![slot("r1", start)]);

        // Query range partially overlapping the plan still finds it
        let found = planner.find("u1", date(2024, 3, 8), date(2024, 3, 14)).unwrap();
        assert_eq!(found.meals.len(), 1);

        // A different user sees nothing
        assert!(planner.find("u2", start, end).is_none());
    }

    #[test]
    fn test_overlapping_save_replaces_plan() {
        let mut planner = MealPlanner::new();
        let start = date(2024, 3, 4);
        let end = date(2024, 3, 10);

        planner.save("u1", start, end, vec![slot("r1", start)]);
        planner.save("u1", start, end, vec![slot("r2", start), slot("r3", end)]);

        assert_eq!(planner.list_for_user("u1").len(), 1);
        assert_eq!(planner.find("u1", start, end).unwrap().meals.len(), 2);
    }

    #[test]
    fn test_non_overlapping_plans_coexist() {
        let mut planner = MealPlanner::new();

        planner.save("u1", date(2024, 3, 4), date(2024, 3, 10), vec![]);
        planner.save("u1", date(2024, 3, 11), date(2024, 3, 17), vec![]);

        assert_eq!(planner.list_for_user("u1").len(), 2);
    }

    #[test]
    fn test_delete_enforces_ownership() {
        let mut planner = MealPlanner::new();
        let plan = planner.save("u1", date(2024, 3, 4), date(2024, 3, 10), vec![]);

        assert!(matches!(
            planner.delete(&plan.id, "u2"),
            Err(CatalogError::NotOwner)
        ));
        planner.delete(&plan.id, "u1").unwrap();
        assert!(planner.list_for_user("u1").is_empty());
    }
}
