use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::{Category, CategoryChanges, NewCategory};
use crate::shared::types::double_option;

/// Request DTO for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: String,

    /// Parent category; omit for a root category
    pub parent_id: Option<i32>,
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            parent_id: dto.parent_id,
        }
    }
}

/// Request DTO for updating a category. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: Option<String>,

    /// New parent; `null` moves the category to the root level
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub parent_id: Option<Option<i32>>,
}

impl From<UpdateCategoryDto> for CategoryChanges {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name,
            parent_id: dto.parent_id,
        }
    }
}

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub is_active: bool,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            parent_id: c.parent_id,
            is_active: c.is_active,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: i32,
    pub name: String,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from a flat list of categories.
    ///
    /// A category whose parent is not in the list (inactive or missing) is shown as a root.
    /// Categories caught in a parent cycle are also promoted, so every input appears exactly once.
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        let ids: HashSet<i32> = categories.iter().map(|c| c.id).collect();

        let mut children: HashMap<i32, Vec<&Category>> = HashMap::new();
        let mut roots: Vec<&Category> = Vec::new();
        for category in &categories {
            match category.parent_id {
                Some(parent_id) if ids.contains(&parent_id) => {
                    children.entry(parent_id).or_default().push(category)
                }
                _ => roots.push(category),
            }
        }

        let mut visited: HashSet<i32> = HashSet::with_capacity(categories.len());
        let mut tree: Vec<CategoryTreeDto> = roots
            .into_iter()
            .map(|root| Self::build_node(root, &children, &mut visited))
            .collect();

        let mut unreached: Vec<&Category> = categories
            .iter()
            .filter(|c| !visited.contains(&c.id))
            .collect();
        unreached.sort_by_key(|c| c.id);
        for category in unreached {
            if !visited.contains(&category.id) {
                tree.push(Self::build_node(category, &children, &mut visited));
            }
        }

        tree
    }

    fn build_node(
        category: &Category,
        children: &HashMap<i32, Vec<&Category>>,
        visited: &mut HashSet<i32>,
    ) -> CategoryTreeDto {
        visited.insert(category.id);

        let mut nodes = Vec::new();
        if let Some(list) = children.get(&category.id) {
            for child in list {
                if !visited.contains(&child.id) {
                    nodes.push(Self::build_node(child, children, visited));
                }
            }
        }

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            children: nodes,
        }
    }
}
