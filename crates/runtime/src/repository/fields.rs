//! Mapping of typed sheet updates onto dotted document paths.

use serde_json::Value;

use hunt_core::ActorUpdate;

use crate::api::CollaboratorError;

/// Dotted field path and JSON value written by one update.
pub fn actor_field(update: &ActorUpdate) -> Result<(String, Value), CollaboratorError> {
    let field = match update {
        ActorUpdate::Health(value) => ("system.health.value".to_owned(), Value::from(*value)),
        ActorUpdate::Stamina(value) => ("system.stamina.value".to_owned(), Value::from(*value)),
        ActorUpdate::Clock(value) => ("system.clock".to_owned(), Value::from(*value)),
        ActorUpdate::Exhausted(value) => ("system.exhausted".to_owned(), Value::from(*value)),
        ActorUpdate::Enraged(value) => ("system.enraged".to_owned(), Value::from(*value)),
        ActorUpdate::Part { part, state } => {
            (format!("system.parts.{part}"), serde_json::to_value(state)?)
        }
        ActorUpdate::Status { status, state } => {
            (format!("system.status.{status}"), serde_json::to_value(state)?)
        }
        ActorUpdate::DamageLog { attacker, entry } => (
            format!("system.damage_log.{attacker}"),
            serde_json::to_value(entry)?,
        ),
    };
    Ok(field)
}

/// Converts a batch; later updates to the same path win.
pub fn actor_fields(updates: &[ActorUpdate]) -> Result<Vec<(String, Value)>, CollaboratorError> {
    updates.iter().map(actor_field).collect()
}

#[cfg(test)]
mod tests {
    use hunt_core::{DamageLogEntry, PartId, Part, PartTemplate};

    use super::*;

    #[test]
    fn scalar_updates_map_to_system_fields() {
        assert_eq!(
            actor_field(&ActorUpdate::Clock(2.5)).unwrap(),
            ("system.clock".to_owned(), Value::from(2.5))
        );
        assert_eq!(
            actor_field(&ActorUpdate::Health(40)).unwrap().0,
            "system.health.value"
        );
    }

    #[test]
    fn nested_updates_serialize_their_state() {
        let part = Part::from_template(PartTemplate::default(), 1000);
        let (path, value) = actor_field(&ActorUpdate::Part {
            part: PartId::new("Part0"),
            state: part,
        })
        .unwrap();

        assert_eq!(path, "system.parts.Part0");
        assert_eq!(value["stagger_limit"], 80);
        assert_eq!(value["break_damage_type"], "Any");

        let (path, value) = actor_field(&ActorUpdate::DamageLog {
            attacker: "Aiko".to_owned(),
            entry: DamageLogEntry {
                values: vec![3, 4],
                total: 7,
            },
        })
        .unwrap();
        assert_eq!(path, "system.damage_log.Aiko");
        assert_eq!(value["total"], 7);
    }
}
