pub mod ai;
pub mod calculator;
pub mod capture;
pub mod combatant;
pub mod effectiveness;
pub mod engine;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
