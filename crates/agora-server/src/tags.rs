use agora_store::{Database, ReadCollection, Tag, TagField, TagRepository};

use crate::error::{Result, ServiceError};

/// Read access to the provisioned tag list.
#[derive(Clone)]
pub struct TagService {
    tags: TagRepository,
}

impl TagService {
    pub fn new(db: &Database) -> Self {
        Self { tags: db.tags() }
    }

    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        tracing::debug!("listing tags");
        Ok(self.tags.find_all()?)
    }

    pub fn tag_by_name(&self, name: &str) -> Result<Tag> {
        self.tags
            .find_by_attribute(TagField::Name, name)?
            .ok_or_else(|| ServiceError::TagNotFound(name.to_string()))
    }
}
