//! In-memory entity graph consulted by name resolution.
//!
//! The graph is built once during configuration: entities first, then their
//! fields, then primary keys and ownerships. Facet configuration may interleave
//! with construction; after that the model is only read.

use std::collections::{HashMap, HashSet};

use crate::annotations::Annotations;
use crate::errors::ModelError;
use crate::value_type::ValueType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(usize);

/// Implemented by `#[derive(DocumentEntity)]`.
pub trait DocumentEntity {
    /// Entity name inside the model.
    const NAME: &'static str;

    /// Adds the entity, its fields, keys and facet declarations to `model`.
    fn describe(model: &mut Model) -> Result<EntityId, ModelError>;
}

#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    declaring_entity: EntityId,
    value_type: ValueType,
    shadow: bool,
    annotations: Annotations,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_entity(&self) -> EntityId {
        self.declaring_entity
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Shadow fields exist only in the mapping, not on the mapped Rust type.
    pub fn is_shadow(&self) -> bool {
        self.shadow
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub(crate) fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    fields: Vec<FieldId>,
}

impl PrimaryKey {
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.fields.contains(&field)
    }
}

/// Links an owned entity to the principal whose document embeds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    principal: EntityId,
    foreign_key: Vec<FieldId>,
    unique: bool,
}

impl Ownership {
    pub fn principal(&self) -> EntityId {
        self.principal
    }

    /// Fields on the owned entity that reference the principal.
    pub fn foreign_key(&self) -> &[FieldId] {
        &self.foreign_key
    }

    /// `true` for one-to-one ownership, `false` for one-to-many.
    pub fn is_unique(&self) -> bool {
        self.unique
    }
}

#[derive(Debug, Clone)]
pub struct EntityType {
    name: String,
    fields: Vec<FieldId>,
    ownership: Option<Ownership>,
    primary_key: Option<PrimaryKey>,
    document_root: bool,
}

impl EntityType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    pub fn ownership(&self) -> Option<&Ownership> {
        self.ownership.as_ref()
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    /// Unowned entities always map to their own document; owned ones only when flagged.
    pub fn is_document_root(&self) -> bool {
        self.ownership.is_none() || self.document_root
    }
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    entities: Vec<EntityType>,
    fields: Vec<Field>,
    by_name: HashMap<String, EntityId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, name: impl Into<String>) -> Result<EntityId, ModelError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ModelError::DuplicateEntity { name });
        }
        let id = EntityId(self.entities.len());
        self.by_name.insert(name.clone(), id);
        self.entities.push(EntityType {
            name,
            fields: Vec::new(),
            ownership: None,
            primary_key: None,
            document_root: false,
        });
        Ok(id)
    }

    pub fn add_field(
        &mut self,
        entity: EntityId,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Result<FieldId, ModelError> {
        self.push_field(entity, name.into(), value_type, false)
    }

    pub fn add_shadow_field(
        &mut self,
        entity: EntityId,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Result<FieldId, ModelError> {
        self.push_field(entity, name.into(), value_type, true)
    }

    fn push_field(
        &mut self,
        entity: EntityId,
        name: String,
        value_type: ValueType,
        shadow: bool,
    ) -> Result<FieldId, ModelError> {
        let owner = self.try_entity(entity)?;
        if self.find_field(entity, &name).is_some() {
            return Err(ModelError::DuplicateField {
                entity: owner.name.clone(),
                field: name,
            });
        }
        let id = FieldId(self.fields.len());
        self.fields.push(Field {
            name,
            declaring_entity: entity,
            value_type,
            shadow,
            annotations: Annotations::new(),
        });
        self.try_entity_mut(entity)?.fields.push(id);
        Ok(id)
    }

    pub fn set_primary_key(&mut self, entity: EntityId, fields: &[FieldId]) -> Result<(), ModelError> {
        self.validate_key(entity, fields, "primary key")?;
        self.try_entity_mut(entity)?.primary_key = Some(PrimaryKey {
            fields: fields.to_vec(),
        });
        Ok(())
    }

    /// Declares `owned` as a component of `principal`, linked through `foreign_key`.
    ///
    /// Fails with [`ModelError::OwnershipCycle`] if `principal` is already
    /// embedded, directly or transitively, in `owned`.
    pub fn set_ownership(
        &mut self,
        owned: EntityId,
        principal: EntityId,
        foreign_key: &[FieldId],
        unique: bool,
    ) -> Result<(), ModelError> {
        let owned_name = self.try_entity(owned)?.name.clone();
        let principal_entity = self.try_entity(principal)?;
        if owned == principal {
            return Err(ModelError::SelfOwnership { entity: owned_name });
        }
        if self.owners_of(principal).any(|owner| owner == owned) {
            return Err(ModelError::OwnershipCycle {
                entity: owned_name,
                principal: principal_entity.name.clone(),
            });
        }
        self.validate_key(owned, foreign_key, "ownership")?;
        self.try_entity_mut(owned)?.ownership = Some(Ownership {
            principal,
            foreign_key: foreign_key.to_vec(),
            unique,
        });
        Ok(())
    }

    /// Maps an owned entity to its own top-level document instead of embedding it.
    pub fn set_document_root(&mut self, entity: EntityId, document_root: bool) -> Result<(), ModelError> {
        self.try_entity_mut(entity)?.document_root = document_root;
        Ok(())
    }

    /// Describes `T` unless an entity named `T::NAME` is already present.
    pub fn register<T: DocumentEntity>(&mut self) -> Result<EntityId, ModelError> {
        match self.find_entity(T::NAME) {
            Some(id) => Ok(id),
            None => T::describe(self),
        }
    }

    /// Walks the chain of principals above `entity`, nearest first.
    fn owners_of(&self, entity: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(self.principal_of(entity), |owner| self.principal_of(*owner))
    }

    fn principal_of(&self, entity: EntityId) -> Option<EntityId> {
        self.entities.get(entity.0)?.ownership.as_ref().map(Ownership::principal)
    }

    fn try_entity(&self, id: EntityId) -> Result<&EntityType, ModelError> {
        self.entities.get(id.0).ok_or(ModelError::InvalidId { what: "entity" })
    }

    fn try_entity_mut(&mut self, id: EntityId) -> Result<&mut EntityType, ModelError> {
        self.entities.get_mut(id.0).ok_or(ModelError::InvalidId { what: "entity" })
    }

    fn validate_key(&self, entity: EntityId, fields: &[FieldId], what: &'static str) -> Result<(), ModelError> {
        let owner = self.try_entity(entity)?;
        if fields.is_empty() {
            return Err(ModelError::EmptyKey {
                entity: owner.name.clone(),
                what,
            });
        }
        let mut seen = HashSet::new();
        for id in fields {
            let field = self.fields.get(id.0).ok_or(ModelError::InvalidId { what: "field" })?;
            if field.declaring_entity != entity {
                return Err(ModelError::ForeignField {
                    entity: owner.name.clone(),
                    field: field.name.clone(),
                });
            }
            if !seen.insert(*id) {
                return Err(ModelError::DuplicateKeyField {
                    entity: owner.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `id` was issued by another model.
    pub fn entity(&self, id: EntityId) -> &EntityType {
        &self.entities[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` was issued by another model.
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.0]
    }

    pub(crate) fn field_mut(&mut self, id: FieldId) -> &mut Field {
        &mut self.fields[id.0]
    }

    pub fn find_entity(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    pub fn find_field(&self, entity: EntityId, name: &str) -> Option<FieldId> {
        self.entities
            .get(entity.0)?
            .fields
            .iter()
            .copied()
            .find(|id| self.field(*id).name == name)
    }

    /// Looks up `entity.field` by name.
    pub fn lookup(&self, entity: &str, field: &str) -> Result<FieldId, ModelError> {
        let entity_id = self.find_entity(entity).ok_or_else(|| ModelError::UnknownEntity {
            name: entity.to_string(),
        })?;
        self.find_field(entity_id, field).ok_or_else(|| ModelError::ForeignField {
            entity: entity.to_string(),
            field: field.to_string(),
        })
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &EntityType)> {
        self.entities.iter().enumerate().map(|(index, entity)| (EntityId(index), entity))
    }

    pub fn fields_of(&self, entity: EntityId) -> impl Iterator<Item = (FieldId, &Field)> {
        self.entity(entity).fields.iter().map(|id| (*id, self.field(*id)))
    }

    /// The primary key of the field's declaring entity, if the field is part of it.
    pub fn containing_primary_key(&self, field: FieldId) -> Option<&PrimaryKey> {
        let entity = self.entity(self.field(field).declaring_entity);
        entity.primary_key.as_ref().filter(|key| key.contains(field))
    }
}
