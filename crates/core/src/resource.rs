//! Resource kinds exposed over HTTP and the record envelope that carries an id.
//!
//! A [`Resource`] is a flat record type persisted in one named collection. The
//! record itself never contains its id; [`Document`] pairs the two when a record
//! leaves the store.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::DocumentId;

/// A record kind stored in its own collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name in the document store (also the URL prefix).
    const COLLECTION: &'static str;

    /// Singular name used in error messages and logs.
    const KIND: &'static str;

    /// Decode a raw JSON body into this resource.
    ///
    /// Every field must be present with the expected JSON type; unknown fields
    /// are dropped.
    fn from_json(value: serde_json::Value) -> DomainResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| DomainError::validation(format!("{}: {e}", Self::KIND)))
    }

    /// Encode this resource as the JSON body kept in the store.
    fn to_json(&self) -> DomainResult<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::validation(format!("{}: {e}", Self::KIND)))
    }
}

/// A stored record together with its identifier.
///
/// Serializes as one flat JSON object: `{"id": "...", <resource fields>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document<R> {
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: R,
}

impl<R> Document<R> {
    pub fn new(id: DocumentId, fields: R) -> Self {
        Self { id, fields }
    }
}

impl<R> Entity for Document<R> {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An animal shelter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelter {
    pub name: String,
    pub location: String,
    pub owner: String,
    pub phone: String,
    pub email: String,
}

impl Resource for Shelter {
    const COLLECTION: &'static str = "shelters";
    const KIND: &'static str = "shelter";
}

/// A dog. `gender` is free text ("male"/"female" in practice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub gender: String,
    pub age: i64,
    pub breed: String,
    pub color: String,
}

impl Resource for Dog {
    const COLLECTION: &'static str = "dogs";
    const KIND: &'static str = "dog";
}
