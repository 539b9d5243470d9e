//! Scientific keypad calculator
//!
//! A keypad accumulates an expression in a display buffer; `=` hands it to
//! an external evaluator and shows the result. The interesting part is the
//! display-buffer state machine in [`core::controller`]; the terminal front
//! end in [`tui`] only forwards key presses and draws the state.
//!
//! # Example
//!
//! ```rust
//! use scicalc::prelude::*;
//!
//! let mut calc = DisplayController::new();
//! for token in ["4", "2", "*", "(", "3", "+", "7", ")", "="] {
//!     calc.handle_token(token).unwrap();
//! }
//! assert_eq!(calc.display(), "420");
//! assert!(calc.result_shown());
//!
//! // Degree mode rewrites trig arguments before evaluation
//! calc.handle(Key::AllClear);
//! calc.handle(Key::ToggleAngle);
//! for token in ["sin", "9", "0", ")", "="] {
//!     calc.handle_token(token).unwrap();
//! }
//! assert_eq!(calc.display(), "1");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::evaluator::{Evaluate, MevalEvaluator};
    pub use crate::core::format::{format_number, format_result};
    pub use crate::core::{
        AngleMode, CalcError, CalcResult, DisplayController, DisplayState, Function, Key,
        Operator, ResultValidator, Violation, ERROR_MARKER,
    };
    pub use crate::driver::{ControllerDriver, KeypadDriver};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
