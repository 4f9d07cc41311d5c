#![forbid(unsafe_code)]

//! Adapter failures are swallowed by the manager, so the only trace they
//! leave is a `warn` event inside the `swipe.gesture` span. These tests pin
//! that down.
//!
//! Run:
//!   cargo test -p swipe-manager --test tracing_adapter_failures

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use swipe_core::{
    AfterSwipeReaction, ItemExtent, ReactionMask, SwipeAxis, SwipeResult, TouchPoint,
};
use swipe_manager::{
    AdapterError, AdapterResult, ItemSequence, SwipeManager, SwipeNoopReason,
    SwipeableItemAdapter,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use web_time::Instant;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);

        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .event_span(event)
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

struct Single(u8);

impl ItemSequence for Single {
    type Key = u8;

    fn len(&self) -> usize {
        1
    }

    fn position_of(&self, key: &u8) -> Option<usize> {
        (*key == self.0).then_some(0)
    }
}

/// Adapter whose query and decision can each be made to fail.
struct Flaky {
    query_fails: bool,
    applied: Vec<AfterSwipeReaction>,
}

impl SwipeableItemAdapter<Single> for Flaky {
    fn swipe_reaction(
        &self,
        _data: &Single,
        _key: &u8,
        _position: usize,
        _touch: TouchPoint,
    ) -> AdapterResult<ReactionMask> {
        if self.query_fails {
            return Err(AdapterError::new("reaction table not loaded"));
        }
        Ok(ReactionMask::allow_axis(SwipeAxis::Horizontal))
    }

    fn swipe_item(
        &mut self,
        _data: &Single,
        _key: &u8,
        _position: usize,
        _result: SwipeResult,
    ) -> AdapterResult<AfterSwipeReaction> {
        Err(AdapterError::new("decision store offline"))
    }

    fn perform_after_swipe_reaction(
        &mut self,
        _data: &mut Single,
        _key: &u8,
        _position: usize,
        _result: SwipeResult,
        reaction: AfterSwipeReaction,
    ) -> AdapterResult<()> {
        self.applied.push(reaction);
        Ok(())
    }
}

const EXTENT: ItemExtent = ItemExtent::new(200.0, 40.0);

#[test]
fn failed_decision_warns_inside_gesture_span() {
    let mut adapter = Flaky {
        query_fails: false,
        applied: Vec::new(),
    };
    let events = with_captured_events(|| {
        let mut manager = SwipeManager::default();
        let mut data = Single(4);
        let t0 = Instant::now();
        manager.touch_down(&mut adapter, &data, 4, TouchPoint::new(10.0, 20.0), EXTENT, t0);
        manager.release(&mut adapter, &mut data, &4, TouchPoint::new(190.0, 20.0), t0);
    });

    let warns: Vec<&CapturedEvent> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warns.len(), 1, "events: {events:#?}");
    assert!(warns[0].message.contains("swipe decision failed"));
    assert!(warns[0]
        .fields
        .get("error")
        .is_some_and(|e| e.contains("decision store offline")));
    assert_eq!(warns[0].parent_span_name.as_deref(), Some("swipe.gesture"));
    assert_eq!(adapter.applied, vec![AfterSwipeReaction::Default]);
}

#[test]
fn failed_query_warns_and_rejects_touch_down() {
    let mut adapter = Flaky {
        query_fails: true,
        applied: Vec::new(),
    };
    let mut rejection = None;
    let events = with_captured_events(|| {
        let mut manager = SwipeManager::default();
        let data = Single(4);
        let t = manager.touch_down(
            &mut adapter,
            &data,
            4,
            TouchPoint::new(10.0, 20.0),
            EXTENT,
            Instant::now(),
        );
        rejection = t.noop_reason();
    });

    assert_eq!(rejection, Some(SwipeNoopReason::AllDirectionsBlocked));
    assert!(events.iter().any(|e| e.level == tracing::Level::WARN
        && e.message.contains("swipe reaction query failed")
        && e.parent_span_name.as_deref() == Some("swipe.gesture")));
}

#[test]
fn successful_commit_logs_no_warnings() {
    struct Calm;

    impl SwipeableItemAdapter<Single> for Calm {
        fn swipe_reaction(
            &self,
            _data: &Single,
            _key: &u8,
            _position: usize,
            _touch: TouchPoint,
        ) -> AdapterResult<ReactionMask> {
            Ok(ReactionMask::allow_axis(SwipeAxis::Horizontal))
        }

        fn swipe_item(
            &mut self,
            _data: &Single,
            _key: &u8,
            _position: usize,
            _result: SwipeResult,
        ) -> AdapterResult<AfterSwipeReaction> {
            Ok(AfterSwipeReaction::MoveToSwipedDirection)
        }

        fn perform_after_swipe_reaction(
            &mut self,
            _data: &mut Single,
            _key: &u8,
            _position: usize,
            _result: SwipeResult,
            _reaction: AfterSwipeReaction,
        ) -> AdapterResult<()> {
            Ok(())
        }
    }

    let events = with_captured_events(|| {
        let mut manager = SwipeManager::default();
        let mut data = Single(1);
        let t0 = Instant::now();
        manager.touch_down(&mut Calm, &data, 1, TouchPoint::new(10.0, 20.0), EXTENT, t0);
        manager.release(&mut Calm, &mut data, &1, TouchPoint::new(190.0, 20.0), t0);
    });

    assert!(events.iter().all(|e| e.level != tracing::Level::WARN));
    assert!(events
        .iter()
        .any(|e| e.level == tracing::Level::DEBUG && e.message.contains("swipe committed")));
}
