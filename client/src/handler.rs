use async_trait::async_trait;
use outlaw_battle::{ActionReport, BattleCommand, BattleState, InvalidAction, Phase, Side};

/// Trait for presenting a battle session.
///
/// Implement this trait to render or record a battle. All methods have
/// default no-op implementations, so you only need to implement the
/// events you care about.
///
/// # Example
///
/// ```ignore
/// struct Printer;
///
/// #[async_trait]
/// impl Handler for Printer {
///     async fn on_action(&mut self, report: &ActionReport) {
///         for line in &report.log {
///             println!("{}", line);
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send {
    /// Called for every applied action, player or enemy.
    async fn on_action(&mut self, report: &ActionReport) {
        let _ = report;
    }

    /// Called when the battle enters a new phase.
    async fn on_phase(&mut self, phase: Phase, turn: u32) {
        let _ = (phase, turn);
    }

    /// Called when a command was refused. The battle is unchanged.
    async fn on_rejected(&mut self, command: &BattleCommand, error: &InvalidAction) {
        let _ = (command, error);
    }

    /// Called once when a side is eliminated.
    async fn on_finished(&mut self, winner: Side, turn: u32) {
        let _ = (winner, turn);
    }

    /// Called after a reset with the fresh state.
    async fn on_reset(&mut self, state: &BattleState) {
        let _ = state;
    }

    /// Called in response to a status request.
    async fn on_snapshot(&mut self, state: &BattleState) {
        let _ = state;
    }
}
