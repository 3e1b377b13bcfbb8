//! Each locale that has to fall back to the default is reported exactly once.

use cite_bridge::locale::{BundledLocales, MonthForm, MonthNameResolver};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Counts WARN events.
#[derive(Clone, Default)]
struct WarnCounter {
    warnings: Arc<AtomicUsize>,
}

impl WarnCounter {
    fn take(&self) -> usize {
        self.warnings.swap(0, Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn one_warning_per_unresolved_locale() {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());

    tracing::subscriber::with_default(subscriber, || {
        // Unknown language, dialect without data, dialect whose bare
        // language is not bundled either.
        for requested in ["tlh-KX", "en-AU", "de-AT"] {
            let mut resolver = MonthNameResolver::new(BundledLocales, "en-US", 4);
            let names = resolver
                .month_names(MonthForm::Long, Some(requested))
                .unwrap();

            assert_eq!(names[0].as_deref(), Some("January"), "{}", requested);
            assert_eq!(counter.take(), 1, "warnings for {}", requested);
        }

        // A bundled locale resolves without any warning.
        let mut resolver = MonthNameResolver::new(BundledLocales, "en-US", 4);
        resolver.month_names(MonthForm::Short, Some("fr")).unwrap();
        assert_eq!(counter.take(), 0);
    });
}
