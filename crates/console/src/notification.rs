//! Notification relay: message key → translated, transient toast.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::i18n::{MessageParams, Translator};

/// Label of the manual-dismiss affordance shown on every toast.
pub const DISMISS_LABEL: &str = "✕";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Auto-dismiss delay.
    pub fn duration(&self) -> Duration {
        match self {
            Severity::Success => Duration::from_secs(3),
            Severity::Warning => Duration::from_secs(4),
            Severity::Error => Duration::from_secs(5),
        }
    }

    /// Style class the rendering widget applies.
    pub fn panel_class(&self) -> &'static str {
        match self {
            Severity::Success => "success-snackbar",
            Severity::Warning => "warning-snackbar",
            Severity::Error => "error-snackbar",
        }
    }
}

/// Screen corner a toast is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    TopRight,
}

/// A request to display one transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
    pub duration: Duration,
    pub dismiss_label: &'static str,
    pub panel_class: &'static str,
    pub placement: Placement,
}

/// Renders toasts. Rendering is someone else's concern; this is the seam.
pub trait ToastSink: Send + Sync {
    fn show(&self, toast: Toast);
}

/// Keeps every toast in memory (tests, headless sessions).
#[derive(Debug, Default)]
pub struct InMemoryToastSink {
    toasts: Mutex<Vec<Toast>>,
}

impl InMemoryToastSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain recorded toasts.
    pub fn take(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| t.severity == severity)
            .count()
    }
}

impl ToastSink for InMemoryToastSink {
    fn show(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

/// Emits toasts as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingToastSink;

impl ToastSink for TracingToastSink {
    fn show(&self, toast: Toast) {
        let duration_ms = toast.duration.as_millis() as u64;
        match toast.severity {
            Severity::Success => tracing::info!(duration_ms, "{}", toast.message),
            Severity::Warning => tracing::warn!(duration_ms, "{}", toast.message),
            Severity::Error => tracing::error!(duration_ms, "{}", toast.message),
        }
    }
}

/// Translates message keys and forwards toasts to a sink.
#[derive(Clone)]
pub struct Notifier {
    translator: Arc<dyn Translator>,
    sink: Arc<dyn ToastSink>,
}

impl core::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl Notifier {
    pub fn new(translator: Arc<dyn Translator>, sink: Arc<dyn ToastSink>) -> Self {
        Self { translator, sink }
    }

    pub fn show_success(&self, key: &str, params: &MessageParams) {
        self.show(Severity::Success, key, params);
    }

    pub fn show_warning(&self, key: &str, params: &MessageParams) {
        self.show(Severity::Warning, key, params);
    }

    pub fn show_error(&self, key: &str, params: &MessageParams) {
        self.show(Severity::Error, key, params);
    }

    fn show(&self, severity: Severity, key: &str, params: &MessageParams) {
        let message = self.translator.translate(key, params);
        self.sink.show(Toast {
            severity,
            message,
            duration: severity.duration(),
            dismiss_label: DISMISS_LABEL,
            panel_class: severity.panel_class(),
            placement: Placement::TopRight,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    fn notifier() -> (Notifier, Arc<InMemoryToastSink>) {
        let sink = Arc::new(InMemoryToastSink::new());
        (Notifier::new(Arc::new(Catalog::english()), sink.clone()), sink)
    }

    #[test]
    fn each_severity_has_its_own_duration() {
        let (notifier, sink) = notifier();
        notifier.show_success("common.success", &MessageParams::new());
        notifier.show_warning("common.success", &MessageParams::new());
        notifier.show_error("common.error", &MessageParams::new());

        let durations: Vec<u64> = sink.toasts().iter().map(|t| t.duration.as_secs()).collect();
        assert_eq!(durations, vec![3, 4, 5]);
        assert!(sink.toasts().iter().all(|t| t.dismiss_label == DISMISS_LABEL));
    }

    #[test]
    fn toasts_carry_style_and_placement() {
        let (notifier, sink) = notifier();
        notifier.show_success("common.success", &MessageParams::new());
        notifier.show_error("common.error", &MessageParams::new());

        let toasts = sink.toasts();
        assert_eq!(toasts[0].panel_class, "success-snackbar");
        assert_eq!(toasts[1].panel_class, "error-snackbar");
        assert!(toasts.iter().all(|t| t.placement == Placement::TopRight));
    }

    #[test]
    fn unresolved_keys_are_shown_raw() {
        let (notifier, sink) = notifier();
        notifier.show_error("partners.unheard_of", &MessageParams::new());
        assert_eq!(sink.take()[0].message, "partners.unheard_of");
        assert!(sink.toasts().is_empty());
    }

    #[test]
    fn params_reach_the_translated_text() {
        let (notifier, sink) = notifier();
        notifier.show_warning(
            "profile.delete_confirm",
            &MessageParams::new().with("code", "USER"),
        );
        assert_eq!(sink.toasts()[0].message, "Delete profile \"USER\"?");
        assert_eq!(sink.count(Severity::Warning), 1);
    }
}
