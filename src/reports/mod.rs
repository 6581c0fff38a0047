//! Report facades and batch computations
//!
//! The monthly and category reports are assembled from named stages
//! supplied at construction; `batch` offers the concurrent per-key variants.

pub mod batch;
pub mod category;
pub mod monthly;
pub mod stage;

pub use batch::{balance_forecast, expenses_by_month};
pub use category::{CategoryReport, ReportService};
pub use monthly::{BudgetService, MonthlyReport};
pub use stage::{Aggregator, Calculator, CategoryValidator, Step, ValidationEntry, Validator};
