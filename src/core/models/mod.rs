pub mod expense;
pub mod group;
pub mod settlement;
pub mod split;
pub mod user;

pub use expense::{Expense, ExpenseRecord};
pub use group::Group;
pub use settlement::{DirectedBalance, SettlementInstruction};
pub use split::{Split, SplitLine};
pub use user::User;
