use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use defi_unite_adapters::{OverlayHost, OverlayWidget};
use defi_unite_core::{
    DisplayRequest, ErrorOptions, Failure, Feedback, FeedbackWidget, LoadingOptions, PortError,
    SuccessOptions, WidgetRegistry, WrapOptions, DEFAULT_WIDGET_ID,
};

fn overlay() -> (OverlayWidget, Feedback<OverlayWidget>) {
    let host = OverlayHost::new();
    let widget = host.widget(DEFAULT_WIDGET_ID);
    let registry = Arc::new(WidgetRegistry::with_factory(move |id| host.widget(id)));
    (widget, Feedback::new(registry))
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let hits = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&hits);
    (hits, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn newest_pending_outcome_wins() {
    let (widget, feedback) = overlay();
    feedback.show_loading(None);
    feedback.set_pending_success(Some(SuccessOptions::new("Saved", "first")));
    feedback.set_pending_error(Some(ErrorOptions::new("Oops", "second")));

    assert_eq!(
        widget.snapshot().pending,
        Some(DisplayRequest::Error {
            title: "Oops".to_owned(),
            message: "second".to_owned(),
        })
    );
}

#[test]
fn hide_all_keeps_the_pending_outcome() {
    let (widget, feedback) = overlay();
    feedback.show_loading(None);
    feedback.set_pending_transaction_success(Some("Counter incremented to 1"));
    feedback.hide_all();

    let snapshot = widget.snapshot();
    assert_eq!(snapshot.visible, None);
    assert_eq!(
        snapshot.pending.as_ref().map(DisplayRequest::message),
        Some("Counter incremented to 1")
    );
    // Nothing to dismiss once hidden.
    assert!(!widget.dismiss_loading());
    assert!(widget.snapshot().pending.is_some());
}

#[test]
fn dismissing_loading_flushes_pending_and_fires_on_complete() {
    let (widget, feedback) = overlay();
    let (completed, on_complete) = counter();
    feedback.show_loading(Some(LoadingOptions::new("Working", "hold on").on_complete(on_complete)));
    feedback.set_pending_transaction_error(Failure::error("boom"));

    assert!(widget.snapshot().is_loading());
    assert!(widget.dismiss_loading());
    assert_eq!(completed.load(Ordering::SeqCst), 1);

    let snapshot = widget.snapshot();
    assert_eq!(
        snapshot.visible,
        Some(DisplayRequest::Error {
            title: "Transaction Failed".to_owned(),
            message: "boom".to_owned(),
        })
    );
    assert_eq!(snapshot.pending, None);
}

#[test]
fn dismissing_without_pending_hides_the_overlay() {
    let (widget, feedback) = overlay();
    feedback.show_transaction_loading(None);
    assert!(widget.dismiss_loading());
    assert_eq!(widget.snapshot().visible, None);
}

#[test]
fn close_fires_on_close_for_flushed_outcomes() {
    let (widget, feedback) = overlay();
    let (closed, on_close) = counter();
    feedback.show_loading(None);
    feedback.set_pending_success(Some(SuccessOptions::new("Done", "ok").on_close(on_close)));
    widget.dismiss_loading();

    assert!(widget.close());
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert_eq!(widget.snapshot().visible, None);
    assert!(!widget.close());
}

#[test]
fn repaint_hook_runs_on_state_changes() {
    let host = OverlayHost::new();
    let (repaints, hook) = counter();
    host.set_repaint_hook(hook);
    let widget = host.widget(DEFAULT_WIDGET_ID);

    widget.show_loading(LoadingOptions::default());
    widget.hide_all();
    assert_eq!(repaints.load(Ordering::SeqCst), 2);
}

#[test]
fn custom_widget_id_gets_its_own_surface() {
    let host = OverlayHost::new();
    let default = host.widget(DEFAULT_WIDGET_ID);
    let registry = Arc::new(WidgetRegistry::with_factory({
        let host = host.clone();
        move |id| host.widget(id)
    }));
    let feedback = Feedback::with_widget_id(registry, "tx-overlay");

    feedback.show_transaction_success_with_id("abc123", None);
    assert_eq!(default.snapshot().visible, None);
    assert_eq!(
        host.widget("tx-overlay").snapshot().visible,
        Some(DisplayRequest::Success {
            title: "Transaction Successful".to_owned(),
            message: "Your transaction has been completed successfully.".to_owned(),
            transaction_id: Some("abc123".to_owned()),
        })
    );
}

#[tokio::test]
async fn wrap_shows_the_outcome_after_loading() {
    let (widget, feedback) = overlay();
    let value = feedback
        .wrap(
            async { Ok::<_, PortError>(5_u32) },
            WrapOptions::new()
                .loading(LoadingOptions::new("Counting", "..."))
                .on_success(|v: &u32| SuccessOptions::new("Counted", format!("got {v}"))),
        )
        .await;

    assert_eq!(value, Some(5));
    assert_eq!(
        widget.snapshot().visible,
        Some(DisplayRequest::Success {
            title: "Counted".to_owned(),
            message: "got 5".to_owned(),
            transaction_id: None,
        })
    );
}

#[tokio::test]
async fn wrap_failure_shows_the_error_text() {
    let (widget, feedback) = overlay();
    let value = feedback
        .wrap(
            async { Err::<u32, _>(PortError::Rejected("User declined access".to_owned())) },
            WrapOptions::new(),
        )
        .await;

    assert_eq!(value, None);
    let visible = widget.snapshot().visible.expect("error shown");
    assert_eq!(visible.title(), "Error");
    assert_eq!(visible.message(), "User declined access");
}

#[tokio::test]
async fn wrap_outcome_replaces_earlier_pending() {
    let (widget, feedback) = overlay();
    feedback.set_pending_error(Some(ErrorOptions::new("Stale", "old")));
    feedback
        .wrap(async { Ok::<_, PortError>(()) }, WrapOptions::new())
        .await;

    assert_eq!(
        widget.snapshot().visible.as_ref().map(DisplayRequest::title),
        Some("Success!")
    );
    assert_eq!(widget.snapshot().pending, None);
}

#[tokio::test]
async fn wrap_shows_the_outcome_when_loading_was_replaced() {
    let (widget, feedback) = overlay();
    let other = widget.clone();
    let value = feedback
        .wrap(
            async move {
                other.show_error(ErrorOptions::new("Interrupted", "shown mid-flight"));
                other.close();
                Ok::<_, PortError>(1_u32)
            },
            WrapOptions::new(),
        )
        .await;

    assert_eq!(value, Some(1));
    let snapshot = widget.snapshot();
    assert_eq!(
        snapshot.visible.as_ref().map(DisplayRequest::title),
        Some("Success!")
    );
    assert_eq!(snapshot.pending, None);
}

#[tokio::test]
async fn wrap_shows_the_error_when_loading_was_hidden() {
    let (widget, feedback) = overlay();
    let closed = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&closed);
    let other = widget.clone();
    let value = feedback
        .wrap(
            async move {
                other.hide_all();
                Err::<u32, _>(PortError::Transport("connection reset".to_owned()))
            },
            WrapOptions::new().on_error(move |e: &PortError| {
                let hits = Arc::clone(&hits);
                ErrorOptions::new("Failed", e.to_string()).on_close(move || {
                    hits.fetch_add(1, Ordering::SeqCst);
                })
            }),
        )
        .await;

    assert_eq!(value, None);
    let snapshot = widget.snapshot();
    assert_eq!(
        snapshot.visible,
        Some(DisplayRequest::Error {
            title: "Failed".to_owned(),
            message: "transport error: connection reset".to_owned(),
        })
    );
    assert_eq!(snapshot.pending, None);

    assert!(widget.close());
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}
