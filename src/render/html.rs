use crate::notify::Alert;
use crate::sanitize::{escape_html, sanitize_url};
use crate::schema::{GraphSchema, Properties};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    /// Optional link to schema documentation; dropped if it fails `sanitize_url`.
    pub docs_url: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Graph schema".to_string(),
            docs_url: None,
        }
    }
}

/// Render a self-contained HTML page for a schema and its validation outcome.
///
/// The template is filled with `replace()` rather than `format!()` so the CSS
/// braces need no escaping.
pub fn render_schema_report(schema: &GraphSchema, alert: &Alert, options: &ReportOptions) -> String {
    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; display: flex; gap: 16px; align-items: baseline; }
  main { padding: 12px 16px; }
  .alert { padding: 8px 12px; border-radius: 6px; margin-bottom: 12px; }
  .alert.success { background: #ecf8ef; border: 1px solid #bfe5c8; }
  .alert.failure { background: #fdeeee; border: 1px solid #f3c2c2; }
  .muted { color: #777; font-size: 12px; }

  table { border-collapse: collapse; width: 100%; margin: 8px 0 20px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; vertical-align: top; }
  th { background: white; border-bottom: 1px solid #ddd; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
</style>
</head>
<body>
<header>
  <h1>__TITLE__</h1>
  __DOCS__
</header>
<main>
  <div class="alert __ALERT_CLASS__">__ALERT__</div>

  <h2>Edges <span class="muted">(__EDGE_COUNT__)</span></h2>
  <table>
    <thead>
      <tr><th>group</th><th>source</th><th>destination</th><th>directed</th><th>properties</th><th>groupBy</th></tr>
    </thead>
    <tbody>
__EDGES__
    </tbody>
  </table>

  <h2>Entities <span class="muted">(__ENTITY_COUNT__)</span></h2>
  <table>
    <thead>
      <tr><th>group</th><th>vertex</th><th>properties</th><th>groupBy</th></tr>
    </thead>
    <tbody>
__ENTITIES__
    </tbody>
  </table>
</main>
</body>
</html>
"#;

    let alert_class = match alert {
        Alert::Success(_) => "success",
        Alert::Failure(_) => "failure",
    };

    let docs = options
        .docs_url
        .as_deref()
        .map(sanitize_url)
        .filter(|u| !u.is_empty())
        .map(|u| format!(r#"<a href="{}">schema documentation</a>"#, escape_html(&u)))
        .unwrap_or_default();

    let edges: Vec<String> = schema
        .edges
        .iter()
        .map(|(name, def)| {
            format!(
                "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                group_cell(name, def.description.as_deref()),
                escape_html(&def.source),
                escape_html(&def.destination),
                def.directed,
                properties_cell(&def.properties),
                group_by_cell(&def.group_by),
            )
        })
        .collect();

    let entities: Vec<String> = schema
        .entities
        .iter()
        .map(|(name, def)| {
            format!(
                "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                group_cell(name, def.description.as_deref()),
                escape_html(&def.vertex),
                properties_cell(&def.properties),
                group_by_cell(&def.group_by),
            )
        })
        .collect();

    TEMPLATE
        .replace("__TITLE__", &escape_html(&options.title))
        .replace("__DOCS__", &docs)
        .replace("__ALERT_CLASS__", alert_class)
        .replace("__ALERT__", &escape_html(alert.message()))
        .replace("__EDGE_COUNT__", &schema.edges.len().to_string())
        .replace("__ENTITY_COUNT__", &schema.entities.len().to_string())
        .replace("__EDGES__", &edges.join("\n"))
        .replace("__ENTITIES__", &entities.join("\n"))
}

fn group_cell(name: &str, description: Option<&str>) -> String {
    match description {
        Some(d) => format!(
            r#"<code>{}</code><div class="muted">{}</div>"#,
            escape_html(name),
            escape_html(d)
        ),
        None => format!("<code>{}</code>", escape_html(name)),
    }
}

fn properties_cell(properties: &Properties) -> String {
    properties
        .iter()
        .map(|(name, ty)| format!("<code>{}</code>: {}", escape_html(name), escape_html(ty)))
        .collect::<Vec<_>>()
        .join("<br>")
}

fn group_by_cell(group_by: &[String]) -> String {
    group_by
        .iter()
        .map(|k| escape_html(k))
        .collect::<Vec<_>>()
        .join(", ")
}
