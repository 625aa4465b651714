//! Built-in facts the orchestrator always computes on its own.

use serde::Serialize;

/// A built-in fact: a name and what it means, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoreFact {
    pub name: &'static str,
    pub description: &'static str,
}

/// Registry of built-in facts, surfaced read-only to operators.
///
/// These are not part of an agent's editable rule set and are not seen by
/// the set validator.
pub const CORE_FACTS: &[CoreFact] = &[
    CoreFact {
        name: "has_name",
        description: "The contact's name has been collected",
    },
    CoreFact {
        name: "has_email",
        description: "A contact email address has been collected",
    },
    CoreFact {
        name: "has_phone",
        description: "A contact phone number has been collected",
    },
    CoreFact {
        name: "is_first_message",
        description: "This is the first inbound message of the conversation",
    },
    CoreFact {
        name: "human_requested",
        description: "The user asked to talk to a human operator",
    },
    CoreFact {
        name: "appointment_scheduled",
        description: "An appointment has already been booked in this conversation",
    },
    CoreFact {
        name: "conversation_stalled",
        description: "The user has not replied within the configured follow-up window",
    },
];

pub fn core_facts() -> &'static [CoreFact] {
    CORE_FACTS
}

/// Look up a built-in fact by name.
pub fn core_fact(name: &str) -> Option<&'static CoreFact> {
    CORE_FACTS.iter().find(|f| f.name == name)
}

pub fn is_core_fact(name: &str) -> bool {
    core_fact(name).is_some()
}
