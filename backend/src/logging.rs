use tracing::{Event, Subscriber};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "warn,wheel_backend=info";

#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.push_str(&format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }
}

fn format_line(level: &str, target: &str, message: &str) -> Option<String> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    match level {
        "ERROR" => Some(format!("[{}] ❌ Error: {} - {}", timestamp, target, message)),
        "WARN" => Some(format!("[{}] ⚠️ Warning: {} - {}", timestamp, target, message)),
        "INFO" => Some(format!("[{}] ℹ️ {} - {}", timestamp, target, message)),
        // Debug output only for the storage and game paths
        "DEBUG" if target.contains("services") || target.contains("store") => {
            Some(format!("[{}] 🔄 {} - {}", timestamp, target, message))
        }
        _ => None,
    }
}

struct CustomLayer;

impl<S: Subscriber> Layer<S> for CustomLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if visitor.0.is_empty() {
            return;
        }

        if let Some(line) = format_line(metadata.level().as_str(), metadata.target(), &visitor.0) {
            println!("{}", line);
        }
    }
}

pub fn setup() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = Registry::default().with(env_filter).with(CustomLayer);

    // try_init also forwards `log` records from wheel_shared into this subscriber
    if subscriber.try_init().is_err() {
        eprintln!("Logging was already initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_levels() {
        let error = format_line("ERROR", "wheel_backend::store", "boom").unwrap();
        assert!(error.contains("❌ Error: wheel_backend::store - boom"));

        let info = format_line("INFO", "wheel_backend::games", "spun").unwrap();
        assert!(info.contains("ℹ️ wheel_backend::games - spun"));

        assert!(format_line("DEBUG", "wheel_backend::services::segment_service", "loaded").is_some());
        assert!(format_line("DEBUG", "wheel_backend::config", "noise").is_none());
        assert!(format_line("TRACE", "wheel_backend::games", "noise").is_none());
    }
}
