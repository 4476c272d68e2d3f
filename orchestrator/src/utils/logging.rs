use std::collections::HashMap;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

const DEFAULT_DIRECTIVE: &str = "annotation_orchestrator=info";

/// Span fields with a column of their own in the pretty output
const COLUMN_FIELDS: &[&str] = &["ds_id", "action"];

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[90m";
const CYAN: &str = "\x1b[96m";
const GREEN: &str = "\x1b[92m";
const WHITE: &str = "\x1b[97m";

/// Fields recorded on a span, stored in its extensions
#[derive(Debug, Clone, Default)]
pub struct SpanFields(pub HashMap<String, String>);

impl SpanFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

fn debug_to_string(value: &dyn std::fmt::Debug) -> String {
    format!("{:?}", value).trim_matches('"').to_string()
}

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), debug_to_string(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Copies span fields into the span extensions so formatters can show them on every event
pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut fields = SpanFields::default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut extensions = span.extensions_mut();
        let mut fields = extensions.remove::<SpanFields>().unwrap_or_default();
        values.record(&mut fields);
        extensions.insert(fields);
    }
}

/// Fields of the innermost span that has them, walking up to the root
fn lookup_span_field<S, N>(ctx: &FmtContext<'_, S, N>, name: &str) -> Option<String>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    let scope = ctx.event_scope()?;
    for span in scope {
        if let Some(value) = span.extensions().get::<SpanFields>().and_then(|fields| fields.get(name)) {
            return Some(value.to_string());
        }
    }
    None
}

#[derive(Default)]
struct EventFields {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = debug_to_string(value);
        } else {
            self.fields.push((field.name().to_string(), debug_to_string(value)));
        }
    }
}

/// Console formatter: `time | level | ds_id | action | service | message (fields)`
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let level_color = match *meta.level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };

        let mut visitor = EventFields::default();
        event.record(&mut visitor);

        let ds_id = visitor
            .fields
            .iter()
            .find(|(name, _)| name == "ds_id")
            .map(|(_, value)| value.clone())
            .or_else(|| lookup_span_field(ctx, "ds_id"))
            .unwrap_or_else(|| "-".to_string());
        let action = lookup_span_field(ctx, "action").unwrap_or_else(|| span_action(ctx));

        write!(writer, "{CYAN}{}{RESET} {DIM}|{RESET} ", Utc::now().format("%y-%m-%d %H:%M:%S"))?;
        write!(writer, "{level_color}{:<5}{RESET} {DIM}|{RESET} ", meta.level())?;
        write!(writer, "{GREEN}{:<24}{RESET} {DIM}|{RESET} ", ds_id)?;
        write!(writer, "{GREEN}{:<8}{RESET} {DIM}|{RESET} ", action)?;
        write!(writer, "{GREEN}{:<10}{RESET} {DIM}|{RESET} ", extract_service_name(meta.target()))?;
        write!(writer, "{WHITE}{}{RESET}", visitor.message)?;

        let extra: Vec<String> = visitor
            .fields
            .iter()
            .filter(|(name, _)| !COLUMN_FIELDS.contains(&name.as_str()))
            .map(|(name, value)| format!("{DIM}{name}={value}{RESET}"))
            .collect();
        if !extra.is_empty() {
            write!(writer, " ({})", extra.join(", "))?;
        }
        writeln!(writer)
    }
}

/// Name of the innermost span, used as the action column when no span carries an `action` field
fn span_action<S, N>(ctx: &FmtContext<'_, S, N>) -> String
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    ctx.lookup_current().map(|span| span.metadata().name().to_uppercase()).unwrap_or_else(|| "-".to_string())
}

#[derive(Default)]
struct JsonFields {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for JsonFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &debug_to_string(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }
}

/// One JSON object per line, span fields merged into `fields`
pub struct JsonEventFormatter;

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let mut visitor = JsonFields::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert("timestamp".into(), Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true).into());
        root.insert("level".into(), meta.level().to_string().into());
        root.insert("target".into(), meta.target().into());
        root.insert("service".into(), extract_service_name(meta.target()).into());
        if let Some(message) = visitor.message {
            root.insert("message".into(), message.into());
        }

        let mut fields = visitor.fields;
        if let Some(scope) = ctx.event_scope() {
            // Outer spans first so inner spans win on conflicting names
            for span in scope.from_root() {
                if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                    for (name, value) in &span_fields.0 {
                        fields.entry(name.clone()).or_insert_with(|| Value::String(value.clone()));
                    }
                }
            }
        }
        if let Some(span) = ctx.lookup_current() {
            fields.insert("span_name".into(), span.metadata().name().into());
        }
        if !fields.is_empty() {
            root.insert("fields".into(), Value::Object(fields));
        }

        let line = serde_json::to_string(&root).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Initialize the tracing subscriber with
/// - PrettyFormatter for console readability (when LOG_FORMAT != "json")
/// - JsonEventFormatter for json logging (when LOG_FORMAT = "json")
///
/// This also installs color_eyre to report panics
pub fn init_logging() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder().with_default_directive(Level::INFO.into()).parse(DEFAULT_DIRECTIVE)?,
    };

    let json = std::env::var("LOG_FORMAT").map(|format| format == "json").unwrap_or(false);
    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);
    let fmt_layer = if json {
        fmt_layer.event_format(JsonEventFormatter).boxed()
    } else {
        fmt_layer.event_format(PrettyFormatter).boxed()
    };

    let subscriber =
        Registry::default().with(env_filter).with(FieldCollectorLayer).with(fmt_layer).with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Short name of the component that emitted the event, for the service column
fn extract_service_name(target: &str) -> &'static str {
    let Some(module) = target.strip_prefix("annotation_orchestrator") else {
        return "EXTERNAL";
    };
    match module.trim_start_matches("::").split("::").nth(1) {
        Some("dispatcher") => "DISPATCH",
        Some("optical_image") => "OPTICAL",
        Some("mol_db") => "MOL_DB",
        Some("dataset") => "DATASET",
        _ => "-",
    }
}
