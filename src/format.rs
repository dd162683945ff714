//! Output formatting of field documentation as Markdown or JSON.

use crate::docs::FieldDoc;

/// Output format for field documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Render field documentation in the requested format.
pub fn render(fields: &[FieldDoc], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => format_fields_json(fields),
        OutputFormat::Markdown => Ok(format_fields_markdown(fields)),
    }
}

/// Format field documentation as pretty-printed JSON.
pub fn format_fields_json(fields: &[FieldDoc]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(fields)
}

/// Format field documentation as markdown, one section per field.
pub fn format_fields_markdown(fields: &[FieldDoc]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Configuration ({})\n\n", fields.len()));

    for field in fields {
        md.push_str(&format!("## {}\n", backtick(&field.path)));
        md.push_str(&format!("- **type**: {}\n", backtick(&field.type_name)));
        md.push_str(&format!("- **default**: {}\n", backtick(&field.default_value)));
        md.push_str(&format!("- **required**: {}\n", field.required));
        md.push_str(&format!("- **env**: {}\n", backtick(&field.env)));
        md.push('\n');
    }

    md
}

/// Render every field through a user template and concatenate the results.
///
/// The template is applied once per field. Placeholders `{{name}}`,
/// `{{type}}`, `{{path}}`, `{{default}}`, `{{env}}` and `{{required}}` are
/// replaced with the field's values; empty values render as an empty string.
/// `{{count}}` expands to the number of fields.
pub fn format_fields_template(fields: &[FieldDoc], template: &str) -> String {
    let mut out = String::new();
    let count = fields.len().to_string();

    for field in fields {
        let required = field.required.to_string();
        let placeholders = [
            ("{{name}}", field.name.as_str()),
            ("{{type}}", field.type_name.as_str()),
            ("{{path}}", field.path.as_str()),
            ("{{default}}", field.default_value.as_str()),
            ("{{env}}", field.env.as_str()),
            ("{{required}}", required.as_str()),
            ("{{count}}", count.as_str()),
        ];

        let mut rendered = template.to_string();
        for (placeholder, value) in placeholders {
            rendered = rendered.replace(placeholder, value);
        }
        out.push_str(&rendered);
    }

    out
}

fn backtick(s: &str) -> String {
    if s.is_empty() {
        return "`<no value>`".to_string();
    }
    format!("`{}`", s)
}
