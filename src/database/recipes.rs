// ABOUTME: Recipe database operations with ingredient lines and store links
// ABOUTME: Validated writes, summary listings, store pagination, and moderation status changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use super::to_u32;
use chrono::Utc;
use prepmyweek_core::constants::limits::RECIPE_TITLE_MAX;
use prepmyweek_core::errors::{AppError, AppResult};
use prepmyweek_core::models::{
    Course, IngredientLine, NewRecipe, Quantity, RecipeDetail, RecipeFilter, RecipeSort,
    RecipeStatus, RecipeSummary, RecipeWithIngredients,
};
use prepmyweek_core::pagination::{Page, PageParams};
use prepmyweek_planning::dietary::is_vegetarian;
use prepmyweek_planning::normalize::validate_ingredient_name;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Validated ingredient line
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientInput {
    /// Normalized name
    pub name: String,
    /// Amount
    pub quantity: Option<Quantity>,
    /// Unit, `None` when blank
    pub unit: Option<String>,
    /// Store section, `None` when blank
    pub store_section: Option<String>,
    /// Optional garnish or extra
    pub is_optional: bool,
    /// Preparation note
    pub preparation: Option<String>,
}

/// Validated recipe ready to store
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeInput {
    /// Title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Cooking instructions
    pub instructions: String,
    /// Minutes of preparation
    pub prep_time: u32,
    /// Minutes of cooking
    pub cook_time: u32,
    /// Course
    pub course: Course,
    /// Servings the recipe yields
    pub servings: u32,
    /// Optional image
    pub image_url: Option<String>,
    /// Linked stores, deduplicated
    pub store_ids: Vec<i64>,
    /// Ingredient lines in entry order
    pub ingredients: Vec<IngredientInput>,
}

impl RecipeInput {
    /// Whether no ingredient names a meat or fish
    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        is_vegetarian(self.ingredients.iter().map(|i| i.name.as_str()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl TryFrom<NewRecipe> for RecipeInput {
    type Error = AppError;

    fn try_from(recipe: NewRecipe) -> AppResult<Self> {
        let title = recipe.title.trim().to_owned();
        if title.is_empty() {
            return Err(AppError::missing_field("Title"));
        }
        if title.chars().count() > RECIPE_TITLE_MAX {
            return Err(AppError::invalid_input(format!(
                "Title must be at most {RECIPE_TITLE_MAX} characters"
            )));
        }
        let instructions = recipe.instructions.trim().to_owned();
        if instructions.is_empty() {
            return Err(AppError::missing_field("Instructions"));
        }
        let (Ok(prep_time), Ok(cook_time)) =
            (u32::try_from(recipe.prep_time), u32::try_from(recipe.cook_time))
        else {
            return Err(AppError::invalid_input(
                "Prep time and cook time must be non-negative",
            ));
        };
        let servings = u32::try_from(recipe.servings)
            .ok()
            .filter(|s| *s >= 1)
            .ok_or_else(|| AppError::invalid_input("Servings must be at least 1"))?;
        let course = Course::parse(&recipe.course).ok_or_else(|| {
            AppError::invalid_input(format!("Invalid course '{}'", recipe.course))
        })?;
        if recipe.ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "At least one ingredient is required",
            ));
        }

        let ingredients = recipe
            .ingredients
            .into_iter()
            .map(|line| {
                let name = validate_ingredient_name(&line.name)
                    .map_err(|e| AppError::invalid_input(e.to_string()))?;
                Ok(IngredientInput {
                    name,
                    quantity: line.quantity,
                    unit: non_blank(line.unit),
                    store_section: non_blank(line.store_section),
                    is_optional: line.is_optional,
                    preparation: non_blank(line.preparation),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let mut store_ids = recipe.store_ids;
        store_ids.sort_unstable();
        store_ids.dedup();

        Ok(Self {
            title,
            description: non_blank(recipe.description),
            instructions,
            prep_time,
            cook_time,
            course,
            servings,
            image_url: non_blank(recipe.image_url),
            store_ids,
            ingredients,
        })
    }
}

/// Quantities are stored as text so fractions like `1 1/2` survive
fn quantity_to_db(quantity: Option<&Quantity>) -> Option<String> {
    quantity.map(ToString::to_string)
}

fn quantity_from_db(raw: Option<String>) -> Option<Quantity> {
    raw.map(|s| match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Quantity::Number(n),
        _ => Quantity::Text(s),
    })
}

const SUMMARY_SELECT: &str = r"
    SELECT r.id, r.title, r.course, r.prep_time, r.cook_time, r.servings, r.image_url,
           r.is_vegetarian,
           (SELECT COUNT(*) FROM recipe_ingredients ri WHERE ri.recipe_id = r.id) AS ingredient_count
    FROM recipes r
";

fn summary_from_row(row: &SqliteRow) -> AppResult<RecipeSummary> {
    let course: String = row.try_get("course")?;
    let prep_time: i64 = row.try_get("prep_time")?;
    let cook_time: i64 = row.try_get("cook_time")?;
    Ok(RecipeSummary {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        course: Course::parse(&course)
            .ok_or_else(|| AppError::database(format!("Unknown course '{course}'")))?,
        total_time: to_u32(prep_time.saturating_add(cook_time)),
        servings: to_u32(row.try_get("servings")?),
        ingredient_count: to_u32(row.try_get("ingredient_count")?),
        is_vegetarian: row.try_get("is_vegetarian")?,
        image_url: row.try_get("image_url")?,
    })
}

fn line_from_row(row: &SqliteRow) -> AppResult<IngredientLine> {
    Ok(IngredientLine {
        ingredient_id: row.try_get("ingredient_id")?,
        name: row.try_get("name")?,
        quantity: quantity_from_db(row.try_get("quantity")?),
        unit: row.try_get("unit")?,
        store_section: row.try_get("store_section")?,
        is_optional: row.try_get("is_optional")?,
        preparation: row.try_get("preparation")?,
    })
}

fn push_id_list(qb: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    qb.push("(");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

fn distinct(ids: &[i64]) -> Vec<i64> {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
}

/// Where-clause shared by the store listing count and page queries
fn push_store_filters(
    qb: &mut QueryBuilder<'_, Sqlite>,
    store_id: i64,
    filter: RecipeFilter,
    search: Option<&str>,
) {
    qb.push(" WHERE r.status = 'approved' AND EXISTS (SELECT 1 FROM recipe_stores rs WHERE rs.recipe_id = r.id AND rs.store_id = ");
    qb.push_bind(store_id);
    qb.push(")");

    if let Some(course) = filter.course() {
        qb.push(" AND r.course = ");
        qb.push_bind(course.as_str());
    }
    if filter == RecipeFilter::Vegetarian {
        qb.push(" AND r.is_vegetarian = 1");
    }
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        qb.push(" AND LOWER(r.title) LIKE ");
        qb.push_bind(format!("%{}%", term.to_lowercase()));
    }
}

const fn sort_clause(sort: RecipeSort) -> &'static str {
    match sort {
        RecipeSort::Newest => " ORDER BY r.created_at DESC, r.id DESC",
        RecipeSort::Ingredients => " ORDER BY ingredient_count ASC, r.id ASC",
        RecipeSort::CookTime => " ORDER BY r.cook_time ASC, r.id ASC",
    }
}

/// Recipe operations
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Approved recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_approved(&self) -> AppResult<Vec<RecipeSummary>> {
        self.list_by_status(RecipeStatus::Approved).await
    }

    /// Recipes awaiting moderation, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_pending(&self) -> AppResult<Vec<RecipeSummary>> {
        self.list_by_status(RecipeStatus::Pending).await
    }

    async fn list_by_status(&self, status: RecipeStatus) -> AppResult<Vec<RecipeSummary>> {
        let order = if status == RecipeStatus::Pending {
            "ASC"
        } else {
            "DESC"
        };
        let rows = sqlx::query(&format!(
            "{SUMMARY_SELECT} WHERE r.status = $1 ORDER BY r.created_at {order}, r.id {order}"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(summary_from_row).collect()
    }

    /// Summaries for `ids` in the given order; unknown ids are skipped
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn summaries(&self, ids: &[i64]) -> AppResult<Vec<RecipeSummary>> {
        let by_id = self.summaries_by_id(ids).await?;
        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    async fn summaries_by_id(&self, ids: &[i64]) -> AppResult<HashMap<i64, RecipeSummary>> {
        let unique = distinct(ids);
        if unique.is_empty() {
            return Ok(HashMap::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(SUMMARY_SELECT);
        qb.push(" WHERE r.id IN ");
        push_id_list(&mut qb, &unique);
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipes: {e}")))?;

        rows.iter()
            .map(|row| summary_from_row(row).map(|s| (s.id, s)))
            .collect()
    }

    async fn lines_by_recipe(&self, ids: &[i64]) -> AppResult<HashMap<i64, Vec<IngredientLine>>> {
        let unique = distinct(ids);
        let mut lines: HashMap<i64, Vec<IngredientLine>> = HashMap::new();
        if unique.is_empty() {
            return Ok(lines);
        }

        let mut qb = QueryBuilder::<Sqlite>::new(
            r"
            SELECT ri.recipe_id, ri.ingredient_id, i.name, ri.quantity, ri.unit,
                   ri.store_section, ri.is_optional, ri.preparation
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id IN ",
        );
        push_id_list(&mut qb, &unique);
        qb.push(" ORDER BY ri.recipe_id, ri.position");
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load ingredient lines: {e}")))?;

        for row in &rows {
            let recipe_id: i64 = row.try_get("recipe_id")?;
            lines.entry(recipe_id).or_default().push(line_from_row(row)?);
        }
        Ok(lines)
    }

    /// Recipes with ingredient lines, one entry per requested id
    ///
    /// Order and duplicates of `ids` are preserved; ids that no longer exist
    /// are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn with_ingredients(&self, ids: &[i64]) -> AppResult<Vec<RecipeWithIngredients>> {
        let summaries = self.summaries_by_id(ids).await?;
        let lines = self.lines_by_recipe(ids).await?;

        let recipes: Vec<RecipeWithIngredients> = ids
            .iter()
            .filter_map(|id| {
                let Some(summary) = summaries.get(id) else {
                    warn!(recipe_id = id, "Skipping unknown recipe");
                    return None;
                };
                Some(RecipeWithIngredients {
                    summary: summary.clone(),
                    ingredients: lines.get(id).cloned().unwrap_or_default(),
                })
            })
            .collect();

        debug!(requested = ids.len(), resolved = recipes.len(), "Loaded recipes with ingredients");
        Ok(recipes)
    }

    /// Full recipe, any status
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn detail(&self, recipe_id: i64) -> AppResult<Option<RecipeDetail>> {
        let row = sqlx::query(
            r"
            SELECT r.id, r.title, r.course, r.prep_time, r.cook_time, r.servings, r.image_url,
                   r.is_vegetarian, r.description, r.instructions, r.status, r.user_id,
                   (SELECT COUNT(*) FROM recipe_ingredients ri WHERE ri.recipe_id = r.id) AS ingredient_count
            FROM recipes r
            WHERE r.id = $1
            ",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let summary = summary_from_row(&row)?;
        let status: String = row.try_get("status")?;
        let prep_time: i64 = row.try_get("prep_time")?;
        let cook_time: i64 = row.try_get("cook_time")?;
        let ingredients = self
            .lines_by_recipe(&[recipe_id])
            .await?
            .remove(&recipe_id)
            .unwrap_or_default();

        let store_ids = sqlx::query_scalar::<_, i64>(
            "SELECT store_id FROM recipe_stores WHERE recipe_id = $1 ORDER BY store_id",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe stores: {e}")))?;

        Ok(Some(RecipeDetail {
            recipe: RecipeWithIngredients {
                summary,
                ingredients,
            },
            description: row.try_get("description")?,
            instructions: row.try_get("instructions")?,
            prep_time: to_u32(prep_time),
            cook_time: to_u32(cook_time),
            status: RecipeStatus::parse(&status),
            user_id: row.try_get("user_id")?,
            store_ids,
        }))
    }

    /// Owner of a recipe: `None` if the recipe does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn owner(&self, recipe_id: i64) -> AppResult<Option<Option<i64>>> {
        sqlx::query_scalar::<_, Option<i64>>("SELECT user_id FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe owner: {e}")))
    }

    /// Insert a recipe with its lines and store links
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for an unknown store id, or a database error.
    pub async fn create(
        &self,
        user_id: i64,
        input: &RecipeInput,
        status: RecipeStatus,
    ) -> AppResult<i64> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let recipe_id = sqlx::query(
            r"
            INSERT INTO recipes (title, description, instructions, prep_time, cook_time, course,
                                 servings, image_url, is_vegetarian, status, user_id,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.instructions)
        .bind(i64::from(input.prep_time))
        .bind(i64::from(input.cook_time))
        .bind(input.course.as_str())
        .bind(i64::from(input.servings))
        .bind(&input.image_url)
        .bind(input.is_vegetarian())
        .bind(status.as_str())
        .bind(user_id)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?
        .last_insert_rowid();

        Self::write_links(&mut tx, recipe_id, input).await?;
        tx.commit().await?;

        debug!(recipe_id, user_id, status = status.as_str(), "Recipe created");
        Ok(recipe_id)
    }

    /// Replace a recipe's fields, lines and store links; status is kept
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for an unknown store id, or a database error.
    pub async fn update(&self, recipe_id: i64, input: &RecipeInput) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE recipes
            SET title = $1, description = $2, instructions = $3, prep_time = $4, cook_time = $5,
                course = $6, servings = $7, image_url = $8, is_vegetarian = $9, updated_at = $10
            WHERE id = $11
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.instructions)
        .bind(i64::from(input.prep_time))
        .bind(i64::from(input.cook_time))
        .bind(input.course.as_str())
        .bind(i64::from(input.servings))
        .bind(&input.image_url)
        .bind(input.is_vegetarian())
        .bind(Utc::now().to_rfc3339())
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_stores WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        Self::write_links(&mut tx, recipe_id, input).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn write_links(
        tx: &mut Transaction<'_, Sqlite>,
        recipe_id: i64,
        input: &RecipeInput,
    ) -> AppResult<()> {
        for store_id in &input.store_ids {
            let linked = sqlx::query(
                "INSERT INTO recipe_stores (recipe_id, store_id) SELECT $1, id FROM stores WHERE id = $2",
            )
            .bind(recipe_id)
            .bind(*store_id)
            .execute(&mut **tx)
            .await?;
            if linked.rows_affected() == 0 {
                return Err(AppError::invalid_input(format!(
                    "Store {store_id} does not exist"
                )));
            }
        }

        for (position, line) in input.ingredients.iter().enumerate() {
            sqlx::query("INSERT INTO ingredients (name) VALUES ($1) ON CONFLICT(name) DO NOTHING")
                .bind(&line.name)
                .execute(&mut **tx)
                .await?;
            let ingredient_id =
                sqlx::query_scalar::<_, i64>("SELECT id FROM ingredients WHERE name = $1")
                    .bind(&line.name)
                    .fetch_one(&mut **tx)
                    .await?;

            sqlx::query(
                r"
                INSERT INTO recipe_ingredients (recipe_id, ingredient_id, position, quantity, unit,
                                                store_section, is_optional, preparation)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ",
            )
            .bind(recipe_id)
            .bind(ingredient_id)
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .bind(quantity_to_db(line.quantity.as_ref()))
            .bind(&line.unit)
            .bind(&line.store_section)
            .bind(line.is_optional)
            .bind(&line.preparation)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Delete a recipe; lines and store links cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the moderation status of several recipes; returns how many changed
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_status(&self, ids: &[i64], status: RecipeStatus) -> AppResult<u64> {
        let unique = distinct(ids);
        if unique.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE recipes SET status = ");
        qb.push_bind(status.as_str());
        qb.push(", updated_at = ");
        qb.push_bind(Utc::now().to_rfc3339());
        qb.push(" WHERE id IN ");
        push_id_list(&mut qb, &unique);

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update recipe status: {e}")))?;
        Ok(result.rows_affected())
    }

    /// Approved recipes linked to a store, filtered, sorted and paginated
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_by_store(
        &self,
        store_id: i64,
        filter: RecipeFilter,
        sort: RecipeSort,
        search: Option<&str>,
        params: PageParams,
    ) -> AppResult<Page<RecipeSummary>> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM recipes r");
        push_store_filters(&mut count, store_id, filter, search);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count store recipes: {e}")))?;

        let mut page = QueryBuilder::<Sqlite>::new(SUMMARY_SELECT);
        push_store_filters(&mut page, store_id, filter, search);
        page.push(sort_clause(sort));
        page.push(" LIMIT ");
        page.push_bind(i64::from(params.limit));
        page.push(" OFFSET ");
        page.push_bind(i64::try_from(params.offset()).unwrap_or(i64::MAX));

        let rows = page
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list store recipes: {e}")))?;
        let data = rows
            .iter()
            .map(summary_from_row)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(data, params, u64::try_from(total).unwrap_or(0)))
    }
}
