use super::*;

use flingdock_core::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

fn pump(runtime: &Runtime, frames: usize) {
    let mut time = 0u64;
    for _ in 0..frames {
        if !runtime.has_frame_callbacks() {
            break;
        }
        runtime.drain_frame_callbacks(time);
        time += FRAME_NANOS;
    }
}

#[test]
fn tween_interpolates_and_holds_end_value() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(1.0f32, runtime.frame_clock());
    let samples = Rc::new(RefCell::new(Vec::new()));
    {
        let samples = Rc::clone(&samples);
        animatable.set_on_value(move |value| samples.borrow_mut().push(*value));
    }

    animatable.animate_to(0.75, AnimationSpec::linear(250));
    assert!(animatable.is_running());
    pump(&runtime, 64);

    let samples = samples.borrow();
    assert_eq!(samples.first().copied(), Some(1.0));
    assert_eq!(samples.last().copied(), Some(0.75));
    assert!(samples.iter().any(|value| *value < 1.0 && *value > 0.75));
    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), 0.75);
}

#[test]
fn animate_from_to_emits_the_start_value_first() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(1.0f32, runtime.frame_clock());
    let samples = Rc::new(RefCell::new(Vec::new()));
    {
        let samples = Rc::clone(&samples);
        animatable.set_on_value(move |value| samples.borrow_mut().push(*value));
    }

    animatable.animate_from_to(1.45, 1.0, AnimationSpec::linear(100));
    assert_eq!(samples.borrow().first().copied(), Some(1.45));

    pump(&runtime, 32);
    assert_eq!(samples.borrow().last().copied(), Some(1.0));
}

#[test]
fn delay_postpones_progress() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    animatable.animate_to(1.0, AnimationSpec::linear(100).with_delay(100));

    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(50_000_000);
    assert_eq!(animatable.value(), 0.0);

    runtime.drain_frame_callbacks(150_000_000);
    assert!((animatable.value() - 0.5).abs() < 1e-3);
}

#[test]
fn stop_freezes_current_value() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    animatable.animate_to(1.0, AnimationSpec::linear(100));
    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(50_000_000);

    animatable.stop();
    let frozen = animatable.value();
    runtime.drain_frame_callbacks(100_000_000);

    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), frozen);
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn snap_to_cancels_and_emits() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.frame_clock());
    let last = Rc::new(RefCell::new(None));
    {
        let last = Rc::clone(&last);
        animatable.set_on_value(move |value| *last.borrow_mut() = Some(*value));
    }

    animatable.animate_to(1.0, AnimationSpec::default());
    animatable.snap_to(0.25);

    assert_eq!(*last.borrow(), Some(0.25));
    assert_eq!(animatable.target(), 0.25);
    assert!(!runtime.has_frame_callbacks());
}
