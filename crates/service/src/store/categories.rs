use tracing::info;
use uuid::Uuid;

use models::{Category, NewCategory};

use super::RecordStore;
use crate::errors::StoreError;

impl RecordStore {
    pub async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.categories.load().await
    }

    pub async fn category_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.load().await?.into_iter().find(|c| c.id == id))
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.load().await?.into_iter().find(|c| c.slug == slug))
    }

    pub async fn save_category(&self, input: NewCategory) -> Result<Category, StoreError> {
        let category = input.into_record(Uuid::new_v4())?;
        let _guard = self.lock().await;
        self.categories
            .update(|all| {
                if all.iter().any(|c| c.slug == category.slug) {
                    return Err(StoreError::conflict(format!("category slug already used: {}", category.slug)));
                }
                all.push(category.clone());
                Ok(())
            })
            .await?;
        info!(category_id = %category.id, slug = %category.slug, "category_saved");
        Ok(category)
    }

    /// Replace the category with the same id; `None` if there is none.
    pub async fn update_category(&self, mut category: Category) -> Result<Option<Category>, StoreError> {
        category.name = category.name.trim().to_string();
        category.description = category.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
        category.validate()?;

        let _guard = self.lock().await;
        let updated = self
            .categories
            .update(|all| {
                if all.iter().any(|c| c.id != category.id && c.slug == category.slug) {
                    return Err(StoreError::conflict(format!("category slug already used: {}", category.slug)));
                }
                match all.iter_mut().find(|c| c.id == category.id) {
                    Some(existing) => {
                        *existing = category.clone();
                        Ok(Some(category.clone()))
                    }
                    None => Ok(None),
                }
            })
            .await?;
        if updated.is_some() {
            info!(category_id = %category.id, "category_updated");
        }
        Ok(updated)
    }

    /// Refused while any post still belongs to the category. Returns whether
    /// the category existed.
    pub async fn delete_category(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock().await;
        let in_use = self.posts.load().await?.iter().filter(|p| p.category_id == id).count();
        if in_use > 0 {
            return Err(StoreError::conflict(format!("category still has {in_use} post(s)")));
        }
        let existed = self
            .categories
            .update(|all| {
                let before = all.len();
                all.retain(|c| c.id != id);
                Ok(all.len() != before)
            })
            .await?;
        if existed {
            info!(category_id = %id, "category_deleted");
        }
        Ok(existed)
    }
}
