use std::collections::HashMap;

use super::ResourceCategory;

/// last-seen entity tag per category. every category starts with an empty validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorTable {
    validators: HashMap<ResourceCategory, String>,
}

impl Default for ValidatorTable {
    fn default() -> Self {
        let validators = ResourceCategory::ALL
            .into_iter()
            .map(|c| (c, String::new()))
            .collect();
        Self { validators }
    }
}

impl ValidatorTable {
    pub fn get(&self, category: &ResourceCategory) -> &str {
        self.validators
            .get(category)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set(&mut self, category: ResourceCategory, validator: String) {
        self.validators.insert(category, validator);
    }
}
