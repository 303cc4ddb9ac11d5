use crate::models::RiskLevel;

/// Inclusive lower bounds, evaluated from the highest tier down.
const BREAKPOINTS: [(u32, RiskLevel); 3] = [
    (60, RiskLevel::Critical),
    (40, RiskLevel::High),
    (20, RiskLevel::Medium),
];

/// Classify an accumulated threat score into a risk level.
pub fn classify_score(score: u32) -> RiskLevel {
    BREAKPOINTS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, level)| *level)
        .unwrap_or(RiskLevel::Low)
}
