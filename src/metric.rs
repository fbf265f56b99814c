use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("line_slack_relay_statds")
        .with_description("LINE to Slack relay statistics")
        .with_unit("event")
        .build()
});

fn incr_statds(attributes: &[KeyValue]) {
    STATDS.add(1, attributes);
}

/// Counts one handled event by message kind (`text`, `image`, ...) and outcome.
pub fn incr_relay_statds(kind: &str, outcome: &str) {
    incr_statds(&[
        KeyValue::new("relay", kind.to_string()),
        KeyValue::new("outcome", outcome.to_string()),
    ])
}

pub fn incr_rejected_request_statds(reason: &str) {
    incr_statds(&[
        KeyValue::new("outcome", "rejected"),
        KeyValue::new("reason", reason.to_string()),
    ])
}
