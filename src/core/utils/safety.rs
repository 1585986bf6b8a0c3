//! Contract macros
//!
//! "Roll cage" for caller obligations that the kernel tolerates at runtime:
//!
//! In Debug mode: the violation panics with a useful message
//! In Release mode: the violation is logged and the operation is skipped
//!
//! Usage:
//! ```rust
//! use polyscene_engine::caller_contract;
//!
//! fn set_speed(removed: bool, speed: &mut f64, value: f64) {
//!     caller_contract!(!removed, "set_speed on a removed body" => return);
//!     *speed = value;
//! }
//!
//! let mut speed = 0.0;
//! set_speed(false, &mut speed, 3.0);
//! assert_eq!(speed, 3.0);
//! ```
//!
//! Hard preconditions (degenerate shapes, bad masses) use plain `assert!`
//! instead: continuing past them would corrupt the simulation.

/// Check a caller obligation.
///
/// - Debug: panics when `$cond` is false
/// - Release: logs at `warn` and evaluates `$bail` (typically `return`)
#[macro_export]
macro_rules! caller_contract {
    ($cond:expr, $msg:expr => $bail:expr) => {{
        if !$cond {
            #[cfg(debug_assertions)]
            {
                panic!("caller contract violated: {}", $msg);
            }
            #[cfg(not(debug_assertions))]
            {
                $crate::__log::warn!("caller contract violated: {}", $msg);
                #[allow(unreachable_code)]
                $bail;
            }
        }
    }};
}
