//! Scripted hunt: a small party trades blows with one monster for a few rounds.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use hunt_content::{MonsterCatalog, WeaponCatalog};
use hunt_core::{
    AbilityScore, ActorId, AttackOptions, Combatant, CombatantId, EncounterId, HunterStats,
    MonsterActor, PartId, Rewind, WeaponProfile, hunter_damage,
};
use hunt_runtime::{InMemoryDocumentStore, Runtime};

/// Knobs of the scripted hunt, overridable through `HUNT_*` variables.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub monster: String,
    pub rounds: u32,
    pub monster_damage: f64,
    pub monster_clock: f64,
    pub monster_stamina_cost: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            monster: "rathalos".to_owned(),
            rounds: 3,
            monster_damage: 25.0,
            monster_clock: 3.0,
            monster_stamina_cost: 8,
        }
    }
}

impl ScenarioConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(monster) = env::var("HUNT_MONSTER") {
            config.monster = monster;
        }
        if let Some(rounds) = env::var("HUNT_ROUNDS").ok().and_then(|r| r.parse().ok()) {
            config.rounds = rounds;
        }
        config
    }
}

struct Hunter {
    name: String,
    actor: ActorId,
    combatant: CombatantId,
    stats: HunterStats,
    weapon: WeaponProfile,
    attack_type: String,
    clock: f64,
    health: u32,
    resistance: f64,
}

pub struct Scenario {
    runtime: Runtime,
    store: Arc<InMemoryDocumentStore>,
    monster: MonsterActor,
    hunters: Vec<Hunter>,
    config: ScenarioConfig,
}

impl Scenario {
    pub fn new(
        runtime: Runtime,
        store: Arc<InMemoryDocumentStore>,
        monsters: &MonsterCatalog,
        weapons: &WeaponCatalog,
        config: ScenarioConfig,
    ) -> Result<Self> {
        let monster = monsters
            .find(&config.monster)
            .with_context(|| format!("unknown monster '{}'", config.monster))?
            .build();
        let weapon = |name: &str| {
            weapons
                .find(name)
                .cloned()
                .with_context(|| format!("unknown weapon '{name}'"))
        };

        let hunters = vec![
            Hunter {
                name: "Aiko".to_owned(),
                actor: ActorId::new("aiko"),
                combatant: CombatantId(1),
                stats: HunterStats {
                    strength: AbilityScore::new(3, 1, 0),
                    spirit: AbilityScore::new(2, 0, 0),
                    sharpness: 75,
                },
                weapon: weapon("Flame Blade")?,
                attack_type: "Slashing".to_owned(),
                clock: 1.0,
                health: 60,
                resistance: 2.0,
            },
            Hunter {
                name: "Bram".to_owned(),
                actor: ActorId::new("bram"),
                combatant: CombatantId(2),
                stats: HunterStats {
                    strength: AbilityScore::new(4, 0, 0),
                    spirit: AbilityScore::new(1, 0, 0),
                    sharpness: 45,
                },
                weapon: weapon("Frost Hammer")?,
                attack_type: "Blunt".to_owned(),
                clock: 2.0,
                health: 75,
                resistance: 4.0,
            },
        ];

        Ok(Self {
            runtime,
            store,
            monster,
            hunters,
            config,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let monster = self.runtime.spawn_monster(self.monster.clone())?;

        let mut combatants: Vec<_> = self
            .hunters
            .iter()
            .zip(0..)
            .map(|(hunter, order)| Combatant::hunter(hunter.combatant.0, hunter.actor.as_str(), order))
            .collect();
        combatants.push(Combatant::monster(99, monster.id().as_str(), 0));
        for hunter in &self.hunters {
            self.store.set_actor_clock(&hunter.actor, hunter.clock)?;
        }

        let encounter = self
            .runtime
            .spawn_encounter(EncounterId::new("sim"), combatants)?;
        encounter.start().await?;

        let roller = self.runtime.attack_roller();
        let mut parts: Vec<PartId> = self.monster.parts.keys().cloned().collect();
        parts.sort();
        anyhow::ensure!(!parts.is_empty(), "{} has no parts to hit", self.monster.name);
        let mut swings = 0usize;

        println!("== {} ({} HP) ==", self.monster.name, self.monster.health.maximum);

        loop {
            let snapshot = encounter.query().await?;
            if snapshot.round() >= self.config.rounds {
                break;
            }
            let Some(current) = snapshot.current().cloned() else {
                break;
            };

            if current.is_player() {
                let hunter = self
                    .hunters
                    .iter_mut()
                    .find(|hunter| hunter.combatant == current.id)
                    .context("combatant without a hunter sheet")?;
                let part = &parts[swings % parts.len()];
                swings += 1;

                let options = AttackOptions::new(hunter.attack_type.clone());
                let roll = roller
                    .roll(&hunter.name, &hunter.weapon, &hunter.stats, &options)
                    .await?;
                println!(
                    "[round {}] {} swings {} at {part}: hit {}, damage {}, element {}{}",
                    snapshot.round(),
                    hunter.name,
                    hunter.weapon.name,
                    roll.hit_total(),
                    roll.damage_total(),
                    roll.element_total(),
                    if roll.formulas.bounced { " (bounced)" } else { "" },
                );

                match monster.take_hit(roll.to_hit(part.clone())).await {
                    Ok(outcome) => {
                        println!("    -{} HP -> {}", outcome.total, outcome.health);
                        for event in &outcome.events {
                            println!("    {}", event.describe());
                        }
                        if outcome.health == 0 {
                            println!("    {} is down!", self.monster.name);
                            break;
                        }
                    }
                    Err(error) => tracing::warn!(%error, "hit not applied"),
                }

                hunter.clock += 2.0;
                self.store.set_actor_clock(&hunter.actor, hunter.clock)?;
            } else {
                let attack = monster
                    .attack(
                        self.config.monster_damage,
                        self.config.monster_clock,
                        self.config.monster_stamina_cost,
                    )
                    .await?;
                let index = swings % self.hunters.len();
                let target = &mut self.hunters[index];
                let hit = hunter_damage(f64::from(attack.damage), 1.0, target.resistance, target.health);
                target.health = hit.health;
                println!(
                    "[round {}] {} strikes {} for {} ({} HP left, stamina {})",
                    snapshot.round(),
                    self.monster.name,
                    target.name,
                    hit.damage,
                    hit.health,
                    attack.stamina,
                );
            }

            let advance = encounter.advance_turn().await?;
            if let Some(round) = advance.new_round {
                println!("-- {} --", round.notice());
                let tick = monster.tick_round().await?;
                for status in &tick.expired {
                    println!("    {status} wore off");
                }
            }
        }

        match encounter.retreat_turn().await? {
            Rewind::AtStart => println!("nothing to rewind"),
            Rewind::Turn { restored } => {
                println!("rewound the turn of {}", restored.combatant)
            }
            Rewind::Round { round, restored } => {
                println!("rewound to round {round} ({} initiatives restored)", restored.len())
            }
        }
        encounter.end().await?;

        let sheet = monster.query().await?;
        println!(
            "== {}: {}/{} HP, stamina {}/{} ==",
            sheet.name,
            sheet.health.current,
            sheet.health.maximum,
            sheet.stamina.current,
            sheet.stamina.maximum,
        );
        for id in &parts {
            if let Some(part) = sheet.part(id) {
                println!(
                    "  {id} {}: staggered {}x, {}",
                    part.name,
                    part.stagger_num,
                    if part.break_num > 0 { "broken" } else { "intact" },
                );
            }
        }
        println!("damage dealt:");
        for (attacker, total) in sheet.damage_log.ranking() {
            println!("  {attacker:<8} {total}");
        }

        drop(monster);
        drop(encounter);
        self.runtime.shutdown().await?;
        Ok(())
    }
}
