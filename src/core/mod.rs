//! Core logic - framework-agnostic credit ledger, command policy and partnership flows.
//!
//! Nothing in here depends on Discord types; the bot layer adapts serenity to
//! the [`messenger::Messenger`] trait and calls into these modules.

/// Best-effort audit records for the log channel
pub mod audit;
/// Snowflake timestamp arithmetic for `/ping`
pub mod latency;
/// In-memory partnership credit ledger
pub mod ledger;
/// Outbound messaging seam and embed model
pub mod messenger;
/// Credit-setting and announcement flows
pub mod partner;
/// Authorization and input validation
pub mod policy;
