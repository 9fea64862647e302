//! Monster worker that owns one [`MonsterActor`] sheet.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use hunt_core::{
    ActorUpdate, DamageEvent, Hit, HitOutcome, MonsterActor, PartId, PartTemplate, RoundTick,
    RulesConfig,
};

use crate::api::{DocumentStore, Notice, NoticeKind, Notifier, Result};
use crate::events::{EventBus, MonsterEvent};

/// A monster attack booked on the sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterAttack {
    /// Damage before the target's resistance, enrage included.
    pub damage: u32,
    pub stamina: u32,
    pub exhausted: bool,
}

/// Commands accepted by a [`MonsterWorker`].
pub enum MonsterCommand {
    TakeHit {
        hit: Hit,
        reply: oneshot::Sender<Result<HitOutcome>>,
    },
    TickRound {
        reply: oneshot::Sender<Result<RoundTick>>,
    },
    Attack {
        base_damage: f64,
        clock: f64,
        stamina_cost: u32,
        reply: oneshot::Sender<Result<MonsterAttack>>,
    },
    AddPart {
        template: PartTemplate,
        reply: oneshot::Sender<Result<PartId>>,
    },
    /// Read-only snapshot of the sheet.
    Query {
        reply: oneshot::Sender<MonsterActor>,
    },
}

pub struct MonsterWorker {
    monster: MonsterActor,
    config: RulesConfig,
    command_rx: mpsc::Receiver<MonsterCommand>,
    event_bus: EventBus,
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
}

impl MonsterWorker {
    pub fn new(
        monster: MonsterActor,
        config: RulesConfig,
        command_rx: mpsc::Receiver<MonsterCommand>,
        event_bus: EventBus,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        tracing::info!(
            monster = %monster.id,
            parts = monster.parts.len(),
            statuses = monster.statuses.len(),
            "MonsterWorker initialized"
        );

        Self {
            monster,
            config,
            command_rx,
            event_bus,
            store,
            notifier,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!(monster = %self.monster.id, "MonsterWorker stopped");
    }

    async fn handle_command(&mut self, cmd: MonsterCommand) {
        match cmd {
            MonsterCommand::TakeHit { hit, reply } => {
                let result = self.take_hit(hit).await;
                respond(reply, result, "TakeHit");
            }
            MonsterCommand::TickRound { reply } => {
                let result = self.tick_round().await;
                respond(reply, result, "TickRound");
            }
            MonsterCommand::Attack {
                base_damage,
                clock,
                stamina_cost,
                reply,
            } => {
                let result = self.attack(base_damage, clock, stamina_cost).await;
                respond(reply, result, "Attack");
            }
            MonsterCommand::AddPart { template, reply } => {
                let result = self.add_part(template).await;
                respond(reply, result, "AddPart");
            }
            MonsterCommand::Query { reply } => {
                if reply.send(self.monster.clone()).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs `change` on a copy of the sheet and keeps the copy only once the
    /// store accepted its updates.
    async fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MonsterActor) -> Result<(T, Vec<ActorUpdate>)>,
    ) -> Result<T> {
        let mut next = self.monster.clone();
        let (value, updates) = change(&mut next)?;
        if !updates.is_empty() {
            self.store.apply_actor_updates(&next.id, &updates).await?;
        }
        self.monster = next;
        Ok(value)
    }

    async fn take_hit(&mut self, hit: Hit) -> Result<HitOutcome> {
        let config = self.config.clone();
        let outcome = self
            .commit(|monster| {
                let outcome = monster.take_hit(&hit, &config)?;
                let updates = outcome.updates.clone();
                Ok((outcome, updates))
            })
            .await?;

        if outcome.weak_point {
            self.notify(NoticeKind::WeakPoint, format!("{} hit a weak point!", hit.attacker))
                .await;
        }
        for event in &outcome.events {
            let kind = match event {
                DamageEvent::PartStaggered { .. } => NoticeKind::Stagger,
                DamageEvent::PartBroken { .. } => NoticeKind::Break,
                DamageEvent::StatusTriggered { .. } => NoticeKind::StatusTriggered,
            };
            self.notify(kind, event.describe()).await;
        }

        self.event_bus.publish(MonsterEvent::HitResolved {
            monster: self.monster.id.clone(),
            attacker: hit.attacker,
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    async fn tick_round(&mut self) -> Result<RoundTick> {
        let config = self.config.clone();
        let tick = self
            .commit(|monster| {
                let tick = monster.tick_round(&config);
                let updates = tick.updates.clone();
                Ok((tick, updates))
            })
            .await?;

        for status in &tick.expired {
            self.notify(NoticeKind::StatusExpired, format!("{status} wore off"))
                .await;
        }

        self.event_bus.publish(MonsterEvent::RoundTicked {
            monster: self.monster.id.clone(),
            tick: tick.clone(),
        });
        Ok(tick)
    }

    async fn attack(
        &mut self,
        base_damage: f64,
        clock: f64,
        stamina_cost: u32,
    ) -> Result<MonsterAttack> {
        let damage = self.monster.attack_damage(base_damage, &self.config);
        let updates = self
            .commit(|monster| {
                let updates = monster.commit_attack(clock, stamina_cost);
                Ok((updates.clone(), updates))
            })
            .await?;

        let attack = MonsterAttack {
            damage,
            stamina: self.monster.stamina.current,
            exhausted: self.monster.exhausted,
        };
        if updates.contains(&ActorUpdate::Exhausted(true)) {
            self.notify(NoticeKind::Exhausted, "exhausted".to_owned())
                .await;
        }

        self.event_bus.publish(MonsterEvent::AttackCommitted {
            monster: self.monster.id.clone(),
            damage,
            stamina: attack.stamina,
            exhausted: attack.exhausted,
        });
        Ok(attack)
    }

    async fn add_part(&mut self, template: PartTemplate) -> Result<PartId> {
        self.commit(|monster| {
            let id = monster.add_part(template);
            let updates = monster
                .part(&id)
                .map(|part| ActorUpdate::Part {
                    part: id.clone(),
                    state: part.clone(),
                })
                .into_iter()
                .collect();
            Ok((id, updates))
        })
        .await
    }

    async fn notify(&self, kind: NoticeKind, message: String) {
        let message = format!("{}: {message}", self.monster.name);
        self.notifier.notify(Notice::new(kind, message)).await;
    }
}

fn respond<T>(reply: oneshot::Sender<Result<T>>, result: Result<T>, command: &str) {
    if let Err(error) = &result {
        warn!(command, %error, "monster command rejected");
    }
    if reply.send(result).is_err() {
        debug!(command, "reply channel closed (caller dropped)");
    }
}
