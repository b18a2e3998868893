//! Rule-driven autonomous behavior
//!
//! Each tick an actor's rule book is scanned in priority order. The first
//! rule whose condition holds and whose action can actually be set up
//! produces the actor's command for that tick.

pub mod actions;
pub mod conditions;
pub mod engine;
pub mod loader;
pub mod presets;
pub mod rules;
pub mod world_view;

pub use actions::{plan, select_target, Command};
pub use conditions::check;
pub use engine::{can_act, evaluate, Decision};
pub use loader::{load_rules, parse_rules};
pub use presets::{default_malware_rule_books, default_process_rules, malware_rules, MalwareRuleBooks};
pub use rules::{Action, BehaviorRule, Condition, MoveTarget, TargetPriority};
pub use world_view::WorldView;
