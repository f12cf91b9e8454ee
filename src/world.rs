use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::camera::CameraRig;
use crate::config::GameConfig;
use crate::registry::{Entity, EntityKind};

/// Initial placement of everything in the world, plus gameplay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorldLayout {
    pub settings: GameConfig,
    pub camera: CameraRig,
    pub entities: Vec<Entity>,
}

impl WorldLayout {
    /// Parses a `<world>` document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid world XML")?;
        let root = document.root_element();
        if !root.has_tag_name("world") {
            return Err(anyhow!(
                "expected <world> root element, found <{}>",
                root.tag_name().name()
            ));
        }

        let mut layout = Self::default();
        if let Some(settings) = child(&root, "settings") {
            layout.settings = parse_settings(&settings, layout.settings)?;
            layout.settings.validate().context("invalid <settings>")?;
        }
        if let Some(camera) = child(&root, "camera") {
            layout.camera = parse_camera(&camera, layout.camera)?;
        }
        for node in root.children().filter(|n| n.has_tag_name("entity")) {
            let name = required_text(&node, "name")?;
            let entity = parse_entity(&node, name.clone())
                .with_context(|| format!("invalid entity `{name}`"))?;
            layout.entities.push(entity);
        }
        Ok(layout)
    }

    /// The 10×10 meadow: villager, robot, teddy bear, hidden key and gate.
    pub fn default_layout() -> Self {
        let place = |id: &str, kind, position: Vec3, color: Vec3| Entity {
            color,
            ..Entity::new(id, kind, position)
        };
        let mut key = place(
            "key",
            EntityKind::Key,
            Vec3::new(3.0, 0.5, 3.0),
            rgb(255, 215, 0),
        );
        key.visible = false;

        Self {
            settings: GameConfig::default(),
            camera: CameraRig::default(),
            entities: vec![
                place("character", EntityKind::Character, Vec3::new(0.0, 0.5, 0.0), rgb(30, 144, 255)),
                place("villager", EntityKind::Npc, Vec3::new(-3.0, 0.5, -3.0), rgb(34, 139, 34)),
                place("robot", EntityKind::Robot, Vec3::new(3.0, 0.5, -3.0), rgb(169, 169, 169)),
                place("teddy_bear", EntityKind::TeddyBear, Vec3::new(-3.0, 0.5, 3.0), rgb(139, 69, 19)),
                key,
                place("gate", EntityKind::Gate, Vec3::new(0.0, 0.5, -4.5), rgb(178, 34, 34)),
                place("well", EntityKind::Prop, Vec3::new(4.0, 0.5, 4.0), rgb(112, 128, 144)),
                place("tree", EntityKind::Prop, Vec3::new(-4.0, 0.5, 0.0), rgb(0, 100, 0)),
            ],
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

fn parse_entity(node: &Node<'_, '_>, name: String) -> Result<Entity> {
    let kind: EntityKind = required_text(node, "kind")?.parse()?;
    let position = parse_vec3(optional_text(node, "position"), Vec3::ZERO)?;
    let mut entity = Entity::new(name, kind, position);
    entity.color = parse_color(optional_text(node, "color"), entity.color)?;
    entity.visible = !parse_bool(optional_text(node, "hidden"), false)?;
    Ok(entity)
}

fn parse_settings(node: &Node<'_, '_>, defaults: GameConfig) -> Result<GameConfig> {
    Ok(GameConfig {
        collect_radius: parse_f32(optional_text(node, "collect_radius"), defaults.collect_radius)?,
        talk_radius: parse_f32(optional_text(node, "talk_radius"), defaults.talk_radius)?,
        move_speed: parse_f32(optional_text(node, "move_speed"), defaults.move_speed)?,
        boundary: parse_f32(optional_text(node, "boundary"), defaults.boundary)?,
        dedupe_messages: parse_bool(
            optional_text(node, "dedupe_messages"),
            defaults.dedupe_messages,
        )?,
    })
}

fn parse_camera(node: &Node<'_, '_>, defaults: CameraRig) -> Result<CameraRig> {
    Ok(CameraRig {
        position: parse_vec3(optional_text(node, "position"), defaults.position)?,
        target: parse_vec3(optional_text(node, "target"), defaults.target)?,
        fov: parse_f32(optional_text(node, "fov"), defaults.fov)?,
    })
}

fn child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn required_text(node: &Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| anyhow!("<{tag}> tag is missing"))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_components(value: &str, what: &str) -> Result<[f32; 3]> {
    let numbers = value
        .split_whitespace()
        .map(|component| {
            component
                .parse::<f32>()
                .map_err(|err| anyhow!("{what} component `{component}`: {err}"))
        })
        .collect::<Result<Vec<_>>>()?;
    match numbers.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(anyhow!(
            "{what} needs 3 components, found {}",
            numbers.len()
        )),
    }
}

fn parse_vec3(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    Ok(Vec3::from_array(parse_components(&value, "vector")?))
}

fn parse_color(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    Ok(Vec3::from_array(parse_components(&value, "color")?) / 255.0)
}

fn parse_f32(value: Option<String>, default: f32) -> Result<f32> {
    match value {
        Some(value) => value
            .parse::<f32>()
            .map_err(|err| anyhow!("failed to parse float `{value}`: {err}")),
        None => Ok(default),
    }
}

fn parse_bool(value: Option<String>, default: bool) -> Result<bool> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("true" | "yes" | "1") => Ok(true),
        Some("false" | "no" | "0") => Ok(false),
        Some(other) => Err(anyhow!("expected a boolean, found `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    <world>
        <settings>
            <move_speed>0.25</move_speed>
            <dedupe_messages>false</dedupe_messages>
        </settings>
        <camera>
            <position>0 8 8</position>
            <fov>60</fov>
        </camera>
        <entity>
            <name>hero</name>
            <kind>character</kind>
            <position>1 0.5 -1</position>
        </entity>
        <entity>
            <name>key</name>
            <kind>key</kind>
            <color>255 128 0</color>
            <hidden>true</hidden>
        </entity>
    </world>
    "#;

    #[test]
    fn parse_world_populates_entities_and_settings() {
        let layout = WorldLayout::from_xml(SAMPLE).unwrap();
        assert_eq!(layout.entities.len(), 2);
        assert_eq!(layout.settings.move_speed, 0.25);
        assert!(!layout.settings.dedupe_messages);
        assert_eq!(layout.settings.boundary, 4.5);
        assert_eq!(layout.camera.position, Vec3::new(0.0, 8.0, 8.0));
        assert_eq!(layout.camera.fov, 60.0);

        let hero = &layout.entities[0];
        assert_eq!(hero.kind, EntityKind::Character);
        assert_eq!(hero.position, Vec3::new(1.0, 0.5, -1.0));
        assert!(hero.visible);

        let key = &layout.entities[1];
        assert!(!key.visible);
        assert_eq!(key.color, Vec3::new(1.0, 128.0 / 255.0, 0.0));
    }

    #[test]
    fn missing_name_is_an_error() {
        let bad = "<world><entity><kind>prop</kind></entity></world>";
        assert!(WorldLayout::from_xml(bad).is_err());
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let bad = "<world><entity><name>x</name><kind>dragon</kind></entity></world>";
        let err = WorldLayout::from_xml(bad).unwrap_err();
        assert!(format!("{err:#}").contains("unknown entity kind `dragon`"));
    }

    #[test]
    fn short_vector_is_an_error() {
        let bad = "<world><entity><name>x</name><kind>prop</kind><position>1 2</position></entity></world>";
        assert!(WorldLayout::from_xml(bad).is_err());
    }

    #[test]
    fn negative_boundary_is_rejected() {
        let bad = "<world><settings><boundary>-1</boundary></settings></world>";
        let err = WorldLayout::from_xml(bad).unwrap_err();
        assert!(format!("{err:#}").contains("setting `boundary`"));
        let bad = "<world><settings><talk_radius>NaN</talk_radius></settings></world>";
        assert!(WorldLayout::from_xml(bad).is_err());
    }

    #[test]
    fn wrong_root_is_rejected() {
        assert!(WorldLayout::from_xml("<scene/>").is_err());
    }

    #[test]
    fn default_layout_hides_the_key() {
        let layout = WorldLayout::default_layout();
        let key = layout
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Key)
            .unwrap();
        assert!(!key.visible);
        for entity in &layout.entities {
            assert!(entity.position.x.abs() <= layout.settings.boundary);
            assert!(entity.position.z.abs() <= layout.settings.boundary);
        }
    }
}
