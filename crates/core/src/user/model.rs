//! User model definitions

use serde::{Deserialize, Serialize};

use crate::collection::Entity;
use crate::id::UserId;

/// A person tasks can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl Entity for User {
    type Id = UserId;
    const COLLECTION: &'static str = "users";

    fn id(&self) -> UserId {
        self.id
    }
}

/// Fields for a user about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: Option<u32>,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
        }
    }

    /// Set the age
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub(crate) fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

impl From<&str> for NewUser {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NewUser {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Partial update of a user; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the age
    pub age: Option<Option<u32>>,
}

impl UserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the age
    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(Some(age));
        self
    }

    /// Remove the age
    pub fn clear_age(mut self) -> Self {
        self.age = Some(None);
        self
    }

    /// Overwrite the patched fields of `user`
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = NewUser::new("Nick").with_age(38).into_user(UserId::new(1));
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "Nick");
        assert_eq!(user.age, Some(38));
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut user = NewUser::new("Nick").with_age(38).into_user(UserId::new(1));

        UserPatch::new().name("Nicholas").apply(&mut user);
        assert_eq!(user.name, "Nicholas");
        assert_eq!(user.age, Some(38));

        UserPatch::new().age(39).apply(&mut user);
        assert_eq!(user.name, "Nicholas");
        assert_eq!(user.age, Some(39));

        UserPatch::new().clear_age().apply(&mut user);
        assert_eq!(user.name, "Nicholas");
        assert!(user.age.is_none());
    }

    #[test]
    fn test_user_without_age_omits_field() {
        let user = NewUser::from("Liz").into_user(UserId::new(3));
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "name": "Liz" }));
    }
}
