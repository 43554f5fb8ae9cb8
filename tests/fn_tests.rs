//! Integration tests for the function combinators

mod common;
use common::{recorder, val};

use quickdash::{bind, debounce, throttle, Error, Key, NativeFn, Timers, Value};
use serde_json::json;
use std::rc::Rc;

mod bind_op {
    use super::*;

    #[test]
    fn test_fixes_the_call_context() {
        let f: NativeFn = Rc::new(|context, _| {
            Ok(context
                .get_entry(&Key::from("foo"))
                .unwrap_or(Value::Undefined))
        });

        let target = val(json!({ "foo": "FOO" }));
        let bound = bind(&f, target);

        let result = bound(&Value::Undefined, &[]).unwrap();

        assert_eq!(result, Value::from("FOO"));
    }

    #[test]
    fn test_forwards_arguments_unchanged() {
        let (f, calls) = recorder();

        let bound = bind(&f, Value::Null);
        bound(&Value::Undefined, &[Value::from(1), Value::from("x")]).unwrap();

        assert_eq!(
            calls.borrow()[0].1,
            vec![Value::from(1), Value::from("x")]
        );
    }
}

mod debounce_op {
    use super::*;

    #[test]
    fn test_debounces_calls() {
        common::init_tracing();

        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        debounced.call(&Value::Undefined, &[]);
        assert_eq!(calls.borrow().len(), 0);

        // ticked...
        timers.advance_time(99).unwrap();
        assert_eq!(calls.borrow().len(), 0);

        debounced.call(&Value::Undefined, &[]);
        assert_eq!(calls.borrow().len(), 0);

        // debounce timer elapsed
        timers.advance_time(101).unwrap();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_fires_only_after_a_full_quiet_period() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        // calls at t=0 and t=50
        debounced.call(&Value::Undefined, &[Value::from("first")]);
        timers.advance_time(50).unwrap();
        debounced.call(&Value::Undefined, &[Value::from("second")]);

        // the nominal expiry of the first timer must not fire it
        timers.advance_time(99).unwrap();
        assert_eq!(calls.borrow().len(), 0);

        // quiet period complete at t=150
        timers.advance_time(1).unwrap();
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(timers.now(), 150);

        // latest call's arguments win
        assert_eq!(calls.borrow()[0].1, vec![Value::from("second")]);
    }

    #[test]
    fn test_fires_exactly_once() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        debounced.call(&Value::Undefined, &[Value::from(1)]);
        debounced.call(&Value::Undefined, &[Value::from("BAR"), Value::from(3)]);

        timers.run_until_idle().unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(
            calls.borrow()[0].1,
            vec![Value::from("BAR"), Value::from(3)]
        );
    }

    #[test]
    fn test_uses_the_latest_call_context() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        let latest = val(json!({ "id": 2 }));

        debounced.call(&val(json!({ "id": 1 })), &[]);
        debounced.call(&latest, &[Value::from("BAR")]);

        timers.run_until_idle().unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(calls.borrow()[0].0, latest);
    }

    #[test]
    fn test_does_not_reschedule_while_pending() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        debounced.call(&Value::Undefined, &[]);
        debounced.call(&Value::Undefined, &[]);

        // only the initial timer was scheduled so far
        assert_eq!(timers.stats().scheduled, 1);

        timers.advance_time(99).unwrap();
        debounced.call(&Value::Undefined, &[]);
        timers.advance_time(101).unwrap();

        assert_eq!(calls.borrow().len(), 1);

        // one initial schedule plus one remaining-delta reschedule,
        // and nothing was ever cancelled
        assert_eq!(timers.stats().scheduled, 2);
        assert_eq!(timers.stats().cancelled, 0);
    }

    #[test]
    fn test_cancel_suppresses_the_pending_fire() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        debounced.call(&Value::Undefined, &[]);
        debounced.cancel();

        timers.advance_time(200).unwrap();
        assert_eq!(calls.borrow().len(), 0);
    }

    #[test]
    fn test_flush_fires_synchronously() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        debounced.call(&Value::Undefined, &[Value::from(7)]);
        debounced.flush().unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(calls.borrow()[0].1, vec![Value::from(7)]);

        // but when the debounce timer would have elapsed
        timers.advance_time(200).unwrap();

        // then: no second fire
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_flush_is_a_no_op_when_idle() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        debounced.flush().unwrap();

        assert_eq!(calls.borrow().len(), 0);
    }

    #[test]
    fn test_works_for_repeated_cycles() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let debounced = debounce(&timers, f, 100);

        debounced.call(&Value::Undefined, &[Value::from(1)]);
        timers.run_until_idle().unwrap();

        debounced.call(&Value::Undefined, &[Value::from(2)]);
        timers.run_until_idle().unwrap();

        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(calls.borrow()[1].1, vec![Value::from(2)]);
    }

    #[test]
    fn test_wrapped_errors_propagate_to_flush() {
        let timers = Timers::new();
        let failing: NativeFn = Rc::new(|_, _| Err(Error::type_error("boom")));
        let debounced = debounce(&timers, failing, 100);

        debounced.call(&Value::Undefined, &[]);

        assert!(debounced.flush().is_err());
    }

    #[test]
    fn test_wrapped_errors_propagate_to_the_timer_fire() {
        let timers = Timers::new();
        let failing: NativeFn = Rc::new(|_, _| Err(Error::type_error("boom")));
        let debounced = debounce(&timers, failing, 100);

        debounced.call(&Value::Undefined, &[]);

        assert!(timers.advance_time(100).is_err());
    }
}

mod throttle_op {
    use super::*;

    #[test]
    fn test_throttles_calls() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let throttled = throttle(&timers, f, 100);

        throttled.call(&[]).unwrap();
        assert_eq!(calls.borrow().len(), 1);

        // ticked...
        timers.advance_time(99).unwrap();

        // dropped, not queued
        throttled.call(&[]).unwrap();
        assert_eq!(calls.borrow().len(), 1);

        // throttle interval elapsed
        timers.advance_time(2).unwrap();

        throttled.call(&[]).unwrap();
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_invokes_immediately_with_arguments() {
        let timers = Timers::new();
        let (f, calls) = recorder();
        let throttled = throttle(&timers, f, 100);

        throttled.call(&[Value::from("x")]).unwrap();

        assert_eq!(calls.borrow()[0].1, vec![Value::from("x")]);
    }

    #[test]
    fn test_wrapped_errors_propagate_to_the_caller() {
        let timers = Timers::new();
        let failing: NativeFn = Rc::new(|_, _| Err(Error::type_error("boom")));
        let throttled = throttle(&timers, failing, 100);

        assert!(throttled.call(&[]).is_err());
    }
}
