//! Security-threat scoring and severity fusion.
//!
//! - [`patterns`] — scans text for malicious-indicator groups and critical
//!   keywords, producing a [`ThreatFinding`](crate::models::ThreatFinding).
//! - [`risk`] — maps a threat score onto a [`RiskLevel`](crate::models::RiskLevel).
//! - [`assessment`] — fuses a finding with a sentiment label into a bounded
//!   severity score and a recommendation.

pub mod assessment;
pub mod patterns;
pub mod risk;
