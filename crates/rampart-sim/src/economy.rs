//! Economy ledger: money, player lives, and score.
//!
//! Every spend goes through `try_spend`, which checks affordability before
//! debiting, so the balance can never go negative.

use rampart_core::constants::LEAK_DAMAGE;
use rampart_core::errors::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub money: u32,
    /// Player lives. Game over at zero or below.
    pub health: i32,
    pub kills: u32,
    pub leaks: u32,
}

impl Ledger {
    pub fn new(money: u32, health: i32) -> Self {
        Self {
            money,
            health,
            kills: 0,
            leaks: 0,
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.money >= cost
    }

    /// Debit `cost` if the balance covers it. No change on failure.
    pub fn try_spend(&mut self, cost: u32) -> Result<(), CommandError> {
        if !self.can_afford(cost) {
            return Err(CommandError::InsufficientFunds {
                cost,
                available: self.money,
            });
        }
        self.money -= cost;
        Ok(())
    }

    pub fn credit(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    pub fn record_kill(&mut self, reward: u32) {
        self.kills += 1;
        self.credit(reward);
    }

    pub fn record_leak(&mut self) {
        self.leaks += 1;
        self.health -= LEAK_DAMAGE;
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_exact_balance() {
        let mut ledger = Ledger::new(100, 20);
        assert!(ledger.try_spend(100).is_ok());
        assert_eq!(ledger.money, 0);
    }

    #[test]
    fn rejected_spend_leaves_balance() {
        let mut ledger = Ledger::new(90, 20);
        let err = ledger.try_spend(100).unwrap_err();
        assert_eq!(
            err,
            CommandError::InsufficientFunds {
                cost: 100,
                available: 90
            }
        );
        assert_eq!(ledger.money, 90);
    }

    #[test]
    fn kills_and_leaks() {
        let mut ledger = Ledger::new(0, 2);
        ledger.record_kill(15);
        assert_eq!((ledger.kills, ledger.money), (1, 15));

        ledger.record_leak();
        assert!(!ledger.is_defeated());
        ledger.record_leak();
        assert!(ledger.is_defeated());
        assert_eq!(ledger.leaks, 2);
    }
}
