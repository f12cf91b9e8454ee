use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Role an entity plays in the quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Character,
    Npc,
    Robot,
    TeddyBear,
    Key,
    Gate,
    /// Decorative scenery; never takes part in interaction checks.
    Prop,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Npc => "npc",
            Self::Robot => "robot",
            Self::TeddyBear => "teddy_bear",
            Self::Key => "key",
            Self::Gate => "gate",
            Self::Prop => "prop",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "character" | "player" => Self::Character,
            "npc" => Self::Npc,
            "robot" => Self::Robot,
            "teddy_bear" | "teddybear" => Self::TeddyBear,
            "key" => Self::Key,
            "gate" => Self::Gate,
            "prop" => Self::Prop,
            other => return Err(GameError::UnknownKind(other.to_string())),
        };
        Ok(kind)
    }
}

/// Stable index of an entity inside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(usize);

/// Named object placed in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
    pub position: Vec3,
    pub color: Vec3,
    /// Cleared once the entity has been collected; never set again.
    pub active: bool,
    /// Hidden entities are drawn by no renderer and ignored by pickups.
    pub visible: bool,
}

impl Entity {
    pub fn new(id: impl Into<String>, kind: EntityKind, position: Vec3) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            color: Vec3::ONE,
            active: true,
            visible: true,
        }
    }
}

/// Owns every entity created at world initialisation.
#[derive(Debug, Default, Clone)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity and returns its handle.
    pub fn create(&mut self, entity: Entity) -> Result<EntityHandle, GameError> {
        if self.entities.iter().any(|existing| existing.id == entity.id) {
            return Err(GameError::DuplicateEntity(entity.id));
        }
        self.entities.push(entity);
        Ok(EntityHandle(self.entities.len() - 1))
    }

    /// Returns the entity while it is still active.
    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(handle.0).filter(|entity| entity.active)
    }

    /// Looks up an entity by id, including deactivated ones.
    pub fn find(&self, id: &str) -> Option<EntityHandle> {
        self.entities
            .iter()
            .position(|entity| entity.id == id)
            .map(EntityHandle)
    }

    /// Returns the first entity of the given kind.
    pub fn first_of(&self, kind: EntityKind) -> Option<EntityHandle> {
        self.entities
            .iter()
            .position(|entity| entity.kind == kind)
            .map(EntityHandle)
    }

    /// Returns the id of any entity, active or not.
    pub fn id_of(&self, handle: EntityHandle) -> Option<&str> {
        self.entities.get(handle.0).map(|entity| entity.id.as_str())
    }

    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn update<F, R>(&mut self, handle: EntityHandle, updater: F) -> Option<R>
    where
        F: FnOnce(&mut Entity) -> R,
    {
        let entity = self
            .entities
            .get_mut(handle.0)
            .filter(|entity| entity.active)?;
        Some(updater(entity))
    }

    pub fn set_position(&mut self, handle: EntityHandle, position: Vec3) -> bool {
        self.update(handle, |entity| entity.position = position)
            .is_some()
    }

    pub fn set_color(&mut self, handle: EntityHandle, color: Vec3) -> bool {
        self.update(handle, |entity| entity.color = color).is_some()
    }

    pub fn reveal(&mut self, handle: EntityHandle) -> bool {
        self.update(handle, |entity| entity.visible = true).is_some()
    }

    /// Marks the entity as removed. Returns `false` if it already was.
    pub fn deactivate(&mut self, handle: EntityHandle) -> bool {
        self.update(handle, |entity| entity.active = false)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(ids: &[&str]) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        for id in ids {
            registry
                .create(Entity::new(*id, EntityKind::Prop, Vec3::ZERO))
                .unwrap();
        }
        registry
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = registry_with(&["tree"]);
        let err = registry
            .create(Entity::new("tree", EntityKind::Prop, Vec3::ONE))
            .unwrap_err();
        assert_eq!(err, GameError::DuplicateEntity("tree".into()));
    }

    #[test]
    fn deactivated_entities_are_absent() {
        let mut registry = registry_with(&["bear"]);
        let bear = registry.find("bear").unwrap();
        assert!(registry.deactivate(bear));
        assert!(registry.get(bear).is_none());
        assert!(!registry.deactivate(bear));
        assert!(!registry.set_position(bear, Vec3::ONE));
        assert_eq!(registry.id_of(bear), Some("bear"));
    }

    #[test]
    fn update_modifies_active_entity() {
        let mut registry = registry_with(&["gate"]);
        let gate = registry.find("gate").unwrap();
        assert!(registry.set_color(gate, Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(registry.get(gate).unwrap().color, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn kind_names_parse_case_insensitively() {
        assert_eq!("Teddy_Bear".parse::<EntityKind>(), Ok(EntityKind::TeddyBear));
        assert_eq!("NPC".parse::<EntityKind>(), Ok(EntityKind::Npc));
        assert!("dragon".parse::<EntityKind>().is_err());
    }
}
