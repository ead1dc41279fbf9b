//! Round timer.
//!
//! A stopwatch counts up forever; a countdown counts up to its limit and
//! then expires, ending the round. The timer never reads a wall clock: the
//! session's scheduler calls `tick()` once per interval.
//!
//! ```
//! use flag_match::timer::{TimerEvent, TimerState};
//!
//! let mut timer = TimerState::countdown(2).unwrap();
//! timer.start();
//! assert_eq!(timer.tick(), TimerEvent::Ticked);
//! assert_eq!(timer.tick(), TimerEvent::Expired);
//! assert_eq!(timer.remaining_seconds(), Some(0));
//! ```

mod state;

pub use state::{TimerEvent, TimerMode, TimerSettings, TimerState};
