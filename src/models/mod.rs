pub mod budget;
pub mod plan;
pub mod question;
pub mod schedule;
pub mod session;

pub use budget::{BudgetSummary, Expense, Income};
pub use plan::{Priority, StudyPlan};
pub use question::{Difficulty, ExamQuestion, QuestionKind};
pub use schedule::{ClassEntry, Weekday};
pub use session::{SessionPatch, StudySession};
