//! Stock collaborator implementations.

mod dice;
mod notifier;

pub use dice::DiceEvaluator;
pub use notifier::TracingNotifier;
