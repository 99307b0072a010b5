//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod approval;
pub mod ledger;
pub mod registry;
pub mod validator;
pub mod workflow;

pub use approval::{ApprovalEngine, DecisionStrategy, Evaluation, RandomDecision};
pub use ledger::AgreementLedger;
pub use registry::ApplicantRegistry;
pub use validator::Validator;
pub use workflow::ApplicationWorkflow;
