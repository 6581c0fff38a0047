//! Named report stages
//!
//! A stage is a name plus a boxed closure. Running a stage never fails from
//! the caller's point of view: an `Err` or a panic inside the closure comes
//! back as a message, so one broken stage cannot sink a report.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::warn;

use crate::error::FinanceResult;
use crate::events::Payload;
use crate::models::{Budget, Category, CategoryId, Transaction, TransactionSet};

/// Inputs of a monthly report
#[derive(Debug, Clone, Copy)]
pub struct MonthInput<'a> {
    /// `YYYY-MM`
    pub month: &'a str,
    pub transactions: &'a [Transaction],
    pub budgets: &'a [Budget],
    pub categories: &'a [Category],
}

impl<'a> MonthInput<'a> {
    /// Transactions whose timestamp falls in the report month
    pub fn in_month(&self) -> impl Iterator<Item = &'a Transaction> + 'a {
        let month = self.month;
        self.transactions.iter().filter(move |t| t.month() == month)
    }
}

/// Inputs of a category report
#[derive(Debug, Clone, Copy)]
pub struct CategoryInput<'a> {
    pub category_id: &'a CategoryId,
    pub transactions: &'a TransactionSet,
    pub categories: &'a [Category],
}

type ValidatorFn = dyn Fn(&MonthInput<'_>) -> FinanceResult<Vec<String>> + Send + Sync;
type CalculatorFn = dyn Fn(&MonthInput<'_>, &Payload) -> FinanceResult<Payload> + Send + Sync;
type AggregatorFn = dyn Fn(&CategoryInput<'_>, &Payload) -> FinanceResult<Payload> + Send + Sync;
type CategoryValidatorFn = dyn Fn(&CategoryInput<'_>) -> FinanceResult<Vec<String>> + Send + Sync;

/// Produces zero or more human-readable validation messages
pub struct Validator {
    name: String,
    run: Box<ValidatorFn>,
}

/// Produces a partial result for a monthly report
///
/// Receives the results accumulated by the calculators before it.
pub struct Calculator {
    name: String,
    run: Box<CalculatorFn>,
}

/// Produces a partial result for a category report
pub struct Aggregator {
    name: String,
    run: Box<AggregatorFn>,
}

/// Validation messages for a category report
pub struct CategoryValidator {
    name: String,
    run: Box<CategoryValidatorFn>,
}

macro_rules! impl_stage {
    ($stage:ident, $($arg:ident: $ty:ty),+ => $out:ty) => {
        impl $stage {
            /// Wrap a closure under `name`
            pub fn new<F>(name: impl Into<String>, run: F) -> Self
            where
                F: Fn($($ty),+) -> FinanceResult<$out> + Send + Sync + 'static,
            {
                Self {
                    name: name.into(),
                    run: Box::new(run),
                }
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            /// Run the stage, turning an error or a panic into a message
            pub fn run(&self, $($arg: $ty),+) -> Result<$out, String> {
                guarded(&self.name, || (self.run)($($arg),+))
            }
        }

        impl fmt::Debug for $stage {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($stage)).field("name", &self.name).finish()
            }
        }
    };
}

impl_stage!(Validator, input: &MonthInput<'_> => Vec<String>);
impl_stage!(Calculator, input: &MonthInput<'_>, acc: &Payload => Payload);
impl_stage!(Aggregator, input: &CategoryInput<'_>, acc: &Payload => Payload);
impl_stage!(CategoryValidator, input: &CategoryInput<'_> => Vec<String>);

fn guarded<T>(name: &str, f: impl FnOnce() -> FinanceResult<T>) -> Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!(stage = name, error = %e, "report stage failed");
            Err(e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(stage = name, error = %message, "report stage panicked");
            Err(format!("panicked: {}", message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Messages produced by one validator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationEntry {
    pub validator: String,
    pub messages: Vec<String>,
}

impl ValidationEntry {
    /// A failed validator shows up as a single `validator_error: ...` message
    pub(crate) fn from_outcome(validator: &str, outcome: Result<Vec<String>, String>) -> Self {
        Self {
            validator: validator.to_string(),
            messages: outcome.unwrap_or_else(|e| vec![format!("validator_error: {}", e)]),
        }
    }
}

/// Raw output of one calculator or aggregator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub stage: String,
    pub output: Payload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Step {
    pub(crate) fn from_outcome(stage: &str, outcome: Result<Payload, String>) -> Self {
        match outcome {
            Ok(output) => Self {
                stage: stage.to_string(),
                output,
                error: None,
            },
            Err(error) => Self {
                stage: stage.to_string(),
                output: Payload::new(),
                error: Some(error),
            },
        }
    }

    /// Whether the stage failed
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}
