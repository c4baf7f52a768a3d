//! Scenario loader.
//!
//! A scenario file describes the whole battle: map terrain, the skill book,
//! and each team's controller, objectives and units.
//!
//! ```text
//! (
//!     name: "ridge",
//!     map: (dimensions: (12, 8), obstacles: [(5, 2), (5, 3)]),
//!     skills: [
//!         (id: 1, name: "wither", target: Enemy,
//!          effect: Debuff(kind: Weaken, duration: 3, damage: 6),
//!          range: 4, mana_cost: 4, cooldown: 2),
//!     ],
//!     teams: [
//!         (id: 0, controller: Utility,
//!          objectives: [(kind: Capture, priority: 3, target: Some((6, 4)))],
//!          units: [(id: 1, name: "vanguard", position: (1, 1), skills: [1])]),
//!     ],
//! )
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tactics_core::{
    GridMap, MapDimensions, Objective, ObjectiveKind, Position, SkillBook, SkillEffect, SkillId,
    SkillSpec, SkillTarget, TeamId, Terrain, Unit, UnitId, World,
};

use crate::loaders::{LoadResult, read_file};
use crate::scenario::{ControllerSpec, Scenario, TeamSetup};

#[derive(Debug, Deserialize)]
struct ScenarioRon {
    name: String,
    map: MapRon,
    #[serde(default)]
    skills: Vec<SkillRon>,
    teams: Vec<TeamRon>,
}

#[derive(Debug, Deserialize)]
struct MapRon {
    dimensions: (u32, u32),
    #[serde(default)]
    obstacles: Vec<(i32, i32)>,
    /// (x, y, tag)
    #[serde(default)]
    special: Vec<(i32, i32, u16)>,
}

#[derive(Debug, Deserialize)]
struct SkillRon {
    id: u16,
    name: String,
    target: SkillTarget,
    effect: SkillEffect,
    #[serde(default)]
    range: u32,
    #[serde(default)]
    mana_cost: u32,
    #[serde(default)]
    cooldown: u32,
}

#[derive(Debug, Deserialize)]
struct TeamRon {
    id: u8,
    #[serde(default)]
    controller: ControllerSpec,
    #[serde(default)]
    objectives: Vec<ObjectiveRon>,
    units: Vec<UnitRon>,
}

#[derive(Debug, Deserialize)]
struct ObjectiveRon {
    kind: ObjectiveKind,
    priority: u8,
    #[serde(default)]
    target: Option<(i32, i32)>,
}

#[derive(Debug, Deserialize)]
struct UnitRon {
    id: u32,
    name: String,
    position: (i32, i32),
    #[serde(default = "defaults::health")]
    health: u32,
    #[serde(default)]
    mana: u32,
    #[serde(default = "defaults::attack")]
    attack: u32,
    #[serde(default = "defaults::attack_range")]
    attack_range: u32,
    #[serde(default = "defaults::move_range")]
    move_range: u32,
    #[serde(default)]
    skills: Vec<u16>,
}

mod defaults {
    pub fn health() -> u32 {
        100
    }

    pub fn attack() -> u32 {
        10
    }

    pub fn attack_range() -> u32 {
        1
    }

    pub fn move_range() -> u32 {
        3
    }
}

/// Loader for [`Scenario`]s from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let map = build_map(&data.map)?;
        let skills = build_skills(&data.skills)?;
        let mut world = World::new(map, skills);

        let mut seen_teams = BTreeSet::new();
        let mut teams = Vec::with_capacity(data.teams.len());
        for team in data.teams {
            let id = TeamId(team.id);
            if !seen_teams.insert(id) {
                anyhow::bail!("{id} is declared twice");
            }
            for unit in &team.units {
                spawn_unit(&mut world, id, unit)?;
            }
            teams.push(TeamSetup {
                team: id,
                controller: team.controller,
                objectives: team.objectives.iter().map(build_objective).collect(),
            });
        }

        tracing::info!(
            scenario = %data.name,
            teams = teams.len(),
            units = world.units().count(),
            "scenario loaded"
        );
        Ok(Scenario {
            name: data.name,
            world,
            teams,
        })
    }
}

fn build_map(data: &MapRon) -> LoadResult<GridMap> {
    let (width, height) = data.dimensions;
    if width == 0 || height == 0 {
        anyhow::bail!("map dimensions must be positive, got {width}x{height}");
    }
    let mut map = GridMap::new(MapDimensions::new(width, height));
    for &(x, y) in &data.obstacles {
        let position = Position::new(x, y);
        if !map.set_terrain(position, Terrain::Obstacle) {
            anyhow::bail!("obstacle {position} lies outside the map");
        }
    }
    for &(x, y, tag) in &data.special {
        let position = Position::new(x, y);
        if !map.set_terrain(position, Terrain::Special(tag)) {
            anyhow::bail!("special tile {position} lies outside the map");
        }
    }
    Ok(map)
}

fn build_skills(data: &[SkillRon]) -> LoadResult<SkillBook> {
    let mut book = SkillBook::new();
    for skill in data {
        let spec = SkillSpec {
            id: SkillId(skill.id),
            name: skill.name.clone(),
            target: skill.target,
            effect: skill.effect,
            range: skill.range,
            mana_cost: skill.mana_cost,
            cooldown: skill.cooldown,
        };
        if book.insert(spec).is_some() {
            anyhow::bail!("skill id {} is declared twice", skill.id);
        }
    }
    Ok(book)
}

fn spawn_unit(world: &mut World, team: TeamId, data: &UnitRon) -> LoadResult<()> {
    let skills: Vec<SkillId> = data.skills.iter().copied().map(SkillId).collect();
    if let Some(unknown) = skills.iter().find(|id| world.skills().get(**id).is_none()) {
        anyhow::bail!("unit {} references unknown {unknown}", data.name);
    }

    let unit = Unit::new(
        UnitId(data.id),
        data.name.clone(),
        team,
        Position::new(data.position.0, data.position.1),
    )
    .with_health(data.health, data.health)
    .with_mana(data.mana, data.mana)
    .with_attack(data.attack, data.attack_range)
    .with_move_range(data.move_range)
    .with_skills(skills);

    world
        .spawn(unit)
        .with_context(|| format!("Failed to place unit {} ({})", data.name, UnitId(data.id)))
}

fn build_objective(data: &ObjectiveRon) -> Objective {
    let objective = Objective::new(data.kind, data.priority);
    match data.target {
        Some((x, y)) => objective.at(Position::new(x, y)),
        None => objective,
    }
}
