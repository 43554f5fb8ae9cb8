//! Function combinators
//!
//! Wrappers around callables: context binding plus the timer-based
//! `debounce` and `throttle`, scheduled on a [`Timers`] queue.

use crate::error::Result;
use crate::timers::Timers;
use crate::value::{NativeFn, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::trace;

/// Bind a callable against a fixed call context
///
/// The wrapper forwards all arguments unchanged and ignores the context it
/// is itself invoked with.
pub fn bind(f: &NativeFn, target: Value) -> NativeFn {
    let f = f.clone();
    Rc::new(move |_, args| f(&target, args))
}

struct DebounceState {
    /// Pending timer, if any; `None` means idle
    timer: Option<u64>,
    /// Virtual timestamp of the latest call
    last_now: u64,
    last_args: Vec<Value>,
    last_context: Value,
}

/// Debounced callable
///
/// Invoking [`call`](Debounced::call) only leads to the wrapped function
/// firing once a full `timeout` of quiet time has elapsed since the latest
/// call; every call re-records the arguments, context, and timestamp the
/// eventual fire uses.
pub struct Debounced {
    state: Rc<RefCell<DebounceState>>,
    timers: Timers,
    callback: NativeFn,
    timeout: u64,
}

/// Debounce a callable, firing it only once the given time elapsed between
/// calls
pub fn debounce(timers: &Timers, f: NativeFn, timeout: u64) -> Debounced {
    Debounced {
        state: Rc::new(RefCell::new(DebounceState {
            timer: None,
            last_now: 0,
            last_args: Vec::new(),
            last_context: Value::Undefined,
        })),
        timers: timers.clone(),
        callback: f,
        timeout,
    }
}

impl Debounced {
    /// Record a call, scheduling a fire check if none is pending
    ///
    /// While a fire check is already scheduled, the timer is left running;
    /// it re-checks the latest timestamp when it fires.
    pub fn call(&self, context: &Value, args: &[Value]) {
        let mut state = self.state.borrow_mut();

        state.last_now = self.timers.now();
        state.last_args = args.to_vec();
        state.last_context = context.clone();

        if state.timer.is_none() {
            let id = schedule_fire(
                &self.state,
                &self.timers,
                &self.callback,
                self.timeout,
                self.timeout,
            );
            state.timer = Some(id);
        }
    }

    /// Discard any pending state without invoking the wrapped function
    pub fn cancel(&self) {
        trace!("debounce cancelled");
        clear(&self.state, &self.timers);
    }

    /// Invoke the wrapped function immediately if a call is pending
    ///
    /// Bypasses the elapsed-time check; a no-op when idle. Errors from the
    /// wrapped function propagate to the caller.
    pub fn flush(&self) -> Result<()> {
        let pending = self.state.borrow().timer.is_some();

        if pending {
            trace!("debounce flushed");
            fire(&self.state, &self.timers, &self.callback, self.timeout, true)?;
        }

        clear(&self.state, &self.timers);
        Ok(())
    }
}

/// Fire check: invoke the wrapped function if the full timeout elapsed
/// since the latest call, otherwise reschedule for the remaining delta
fn fire(
    state: &Rc<RefCell<DebounceState>>,
    timers: &Timers,
    callback: &NativeFn,
    timeout: u64,
    force: bool,
) -> Result<()> {
    let now = timers.now();

    let (scheduled_diff, context, args) = {
        let state_ref = state.borrow();
        let diff = if force {
            0
        } else {
            (state_ref.last_now + timeout).saturating_sub(now)
        };
        (
            diff,
            state_ref.last_context.clone(),
            state_ref.last_args.clone(),
        )
    };

    if scheduled_diff > 0 {
        trace!(remaining = scheduled_diff, "debounce rescheduled");
        let id = schedule_fire(state, timers, callback, timeout, scheduled_diff);
        state.borrow_mut().timer = Some(id);
        return Ok(());
    }

    trace!("debounce fired");
    callback(&context, &args)?;

    clear(state, timers);
    Ok(())
}

fn schedule_fire(
    state: &Rc<RefCell<DebounceState>>,
    timers: &Timers,
    callback: &NativeFn,
    timeout: u64,
    delay: u64,
) -> u64 {
    let state = state.clone();
    let inner_timers = timers.clone();
    let callback = callback.clone();

    timers.schedule(delay, move || {
        fire(&state, &inner_timers, &callback, timeout, false)
    })
}

fn clear(state: &Rc<RefCell<DebounceState>>, timers: &Timers) {
    let mut state = state.borrow_mut();

    if let Some(id) = state.timer.take() {
        timers.cancel(id);
    }

    state.last_now = 0;
    state.last_args = Vec::new();
    state.last_context = Value::Undefined;
}

/// Throttled callable
///
/// Invokes the wrapped function at most once per interval; calls landing
/// inside the interval are dropped, not queued.
pub struct Throttled {
    throttling: Rc<Cell<bool>>,
    callback: NativeFn,
    timers: Timers,
    interval: u64,
}

/// Throttle a callable, invoking it at most once in the given interval
pub fn throttle(timers: &Timers, f: NativeFn, interval: u64) -> Throttled {
    Throttled {
        throttling: Rc::new(Cell::new(false)),
        callback: f,
        timers: timers.clone(),
        interval,
    }
}

impl Throttled {
    /// Invoke the wrapped function unless inside the throttle interval
    pub fn call(&self, args: &[Value]) -> Result<()> {
        if self.throttling.get() {
            return Ok(());
        }

        (self.callback)(&Value::Undefined, args)?;
        self.throttling.set(true);

        let flag = self.throttling.clone();
        self.timers.schedule(self.interval, move || {
            flag.set(false);
            Ok(())
        });

        Ok(())
    }
}
