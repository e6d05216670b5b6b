use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub is_active: bool,
}

/// Insert payload for a category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub parent_id: Option<i32>,
}

/// Partial update; `None` leaves the column untouched.
///
/// `parent_id: Some(None)` detaches the category to the root level.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub parent_id: Option<Option<i32>>,
}
