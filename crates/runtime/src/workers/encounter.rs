//! Encounter worker that owns one [`CombatSequencer`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use hunt_core::{
    ActorId, ActorUpdate, Combatant, CombatError, CombatSequencer, CombatantId, EncounterId,
    InitiativeRecord, Rewind, RoundAdvance, TurnAdvance,
};

use crate::api::{CombatantUpdate, DocumentStore, Notice, NoticeKind, Notifier, Result};
use crate::events::{CombatEvent, EventBus};

/// Commands accepted by an [`EncounterWorker`].
pub enum EncounterCommand {
    Start {
        reply: oneshot::Sender<Result<()>>,
    },
    End {
        reply: oneshot::Sender<Result<()>>,
    },
    AdvanceTurn {
        reply: oneshot::Sender<Result<TurnAdvance>>,
    },
    AdvanceRound {
        reply: oneshot::Sender<Result<RoundAdvance>>,
    },
    RetreatTurn {
        reply: oneshot::Sender<Result<Rewind>>,
    },
    RetreatRound {
        reply: oneshot::Sender<Result<Rewind>>,
    },
    AddCombatant {
        combatant: Combatant,
        reply: oneshot::Sender<Result<()>>,
    },
    RemoveCombatant {
        combatant: CombatantId,
        reply: oneshot::Sender<Result<Combatant>>,
    },
    SetDefeated {
        combatant: CombatantId,
        defeated: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    SetHidden {
        combatant: CombatantId,
        hidden: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Read-only snapshot of the sequencer.
    Query {
        reply: oneshot::Sender<CombatSequencer>,
    },
}

pub struct EncounterWorker {
    id: EncounterId,
    sequencer: CombatSequencer,
    command_rx: mpsc::Receiver<EncounterCommand>,
    event_bus: EventBus,
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
}

impl EncounterWorker {
    pub fn new(
        id: EncounterId,
        sequencer: CombatSequencer,
        command_rx: mpsc::Receiver<EncounterCommand>,
        event_bus: EventBus,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        tracing::info!(
            encounter = %id,
            combatants = sequencer.combatants().len(),
            "EncounterWorker initialized"
        );

        Self {
            id,
            sequencer,
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
        debug!(encounter = %self.id, "EncounterWorker stopped");
    }

    async fn handle_command(&mut self, cmd: EncounterCommand) {
        match cmd {
            EncounterCommand::Start { reply } => {
                let result = self.start().await;
                respond(reply, result, "Start");
            }
            EncounterCommand::End { reply } => {
                let result = self.end();
                respond(reply, result, "End");
            }
            EncounterCommand::AdvanceTurn { reply } => {
                let result = self.advance_turn().await;
                respond(reply, result, "AdvanceTurn");
            }
            EncounterCommand::AdvanceRound { reply } => {
                let result = self.advance_round().await;
                respond(reply, result, "AdvanceRound");
            }
            EncounterCommand::RetreatTurn { reply } => {
                let result = self.rewind(CombatSequencer::retreat_turn).await;
                respond(reply, result, "RetreatTurn");
            }
            EncounterCommand::RetreatRound { reply } => {
                let result = self.rewind(CombatSequencer::retreat_round).await;
                respond(reply, result, "RetreatRound");
            }
            EncounterCommand::AddCombatant { combatant, reply } => {
                let result = self.add_combatant(combatant);
                respond(reply, result, "AddCombatant");
            }
            EncounterCommand::RemoveCombatant { combatant, reply } => {
                let result = self.remove_combatant(combatant);
                respond(reply, result, "RemoveCombatant");
            }
            EncounterCommand::SetDefeated {
                combatant,
                defeated,
                reply,
            } => {
                let result = self
                    .sequencer
                    .set_defeated(combatant, defeated)
                    .map_err(Into::into);
                respond(reply, result, "SetDefeated");
            }
            EncounterCommand::SetHidden {
                combatant,
                hidden,
                reply,
            } => {
                let result = self
                    .sequencer
                    .set_hidden(combatant, hidden)
                    .map_err(Into::into);
                respond(reply, result, "SetHidden");
            }
            EncounterCommand::Query { reply } => {
                if reply.send(self.sequencer.clone()).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Stored documents are written before the sequencer is replaced, so a
    /// failed write leaves the encounter where it was.
    async fn start(&mut self) -> Result<()> {
        let mut next = self.sequencer.clone();
        next.start()?;
        self.persist_initiatives(&next.initiatives()).await?;
        self.sequencer = next;

        self.event_bus.publish(CombatEvent::Started {
            encounter: self.id.clone(),
        });
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.sequencer.end()?;
        self.event_bus.publish(CombatEvent::Ended {
            encounter: self.id.clone(),
        });
        Ok(())
    }

    /// Reads the active combatant's clock, advances, then writes the clock
    /// back to both the combatant and the actor sheet.
    async fn advance_turn(&mut self) -> Result<TurnAdvance> {
        let actor = self.sequencer.current().map(|c| c.actor.clone());
        let clock = match &actor {
            Some(actor) => self.store.actor_clock(actor).await?,
            None => None,
        };
        let oracle = |candidate: &ActorId| match &actor {
            Some(actor) if actor == candidate => clock,
            _ => None,
        };

        let mut next = self.sequencer.clone();
        let advance = next.advance_turn(&oracle)?;

        if let Some(update) = &advance.clock_update {
            self.store
                .apply_combatant_updates(
                    &self.id,
                    &[CombatantUpdate {
                        combatant: update.combatant,
                        initiative: update.clock,
                    }],
                )
                .await?;
            self.store
                .apply_actor_updates(&update.actor, &[ActorUpdate::Clock(update.clock)])
                .await?;
        }
        self.sequencer = next;

        self.event_bus.publish(CombatEvent::TurnAdvanced {
            encounter: self.id.clone(),
            advance: advance.clone(),
        });
        if let Some(round) = advance.new_round {
            self.announce_round(round).await;
        }
        Ok(advance)
    }

    async fn advance_round(&mut self) -> Result<RoundAdvance> {
        let round = self.sequencer.advance_round()?;
        self.announce_round(round).await;
        Ok(round)
    }

    async fn announce_round(&self, round: RoundAdvance) {
        self.event_bus.publish(CombatEvent::RoundStarted {
            encounter: self.id.clone(),
            round,
        });
        self.notifier
            .notify(Notice::new(NoticeKind::RoundStart, round.notice()))
            .await;
    }

    async fn rewind(
        &mut self,
        step: fn(&mut CombatSequencer) -> std::result::Result<Rewind, CombatError>,
    ) -> Result<Rewind> {
        let mut next = self.sequencer.clone();
        let rewind = step(&mut next)?;
        if !rewind.is_noop() {
            self.persist_initiatives(rewind.restored()).await?;
        }
        self.sequencer = next;

        if !rewind.is_noop() {
            self.event_bus.publish(CombatEvent::Rewound {
                encounter: self.id.clone(),
                rewind: rewind.clone(),
            });
        }
        Ok(rewind)
    }

    fn add_combatant(&mut self, combatant: Combatant) -> Result<()> {
        self.sequencer.add_combatant(combatant.clone())?;
        self.event_bus.publish(CombatEvent::CombatantAdded {
            encounter: self.id.clone(),
            combatant,
        });
        Ok(())
    }

    fn remove_combatant(&mut self, combatant: CombatantId) -> Result<Combatant> {
        let removed = self.sequencer.remove_combatant(combatant)?;
        self.event_bus.publish(CombatEvent::CombatantRemoved {
            encounter: self.id.clone(),
            combatant,
        });
        Ok(removed)
    }

    async fn persist_initiatives(&self, records: &[InitiativeRecord]) -> Result<()> {
        let updates: Vec<_> = records
            .iter()
            .map(|record| CombatantUpdate {
                combatant: record.combatant,
                initiative: record.initiative,
            })
            .collect();
        self.store
            .apply_combatant_updates(&self.id, &updates)
            .await?;
        Ok(())
    }
}

fn respond<T>(reply: oneshot::Sender<Result<T>>, result: Result<T>, command: &str) {
    if let Err(error) = &result {
        warn!(command, %error, "encounter command rejected");
    }
    if reply.send(result).is_err() {
        debug!(command, "reply channel closed (caller dropped)");
    }
}
