//! Plan rendering
//!
//! Terminal output parses the plan as markdown (tui-markdown, which sits on
//! pulldown-cmark) and replays the styled spans with `colored`.

use colored::{ColoredString, Colorize};
use eyre::Result;
use ratatui::style::{Color, Modifier, Style};
use tracing::debug;

use crate::domain::PlanResult;

/// How to print a plan
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled terminal text
    #[default]
    Text,
    /// The model's markdown, sources appended as a list
    Markdown,
    /// Serialized PlanResult
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text, markdown, or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Render a plan in the requested format
pub fn render(plan: &PlanResult, format: OutputFormat, show_sources: bool) -> Result<String> {
    debug!(%format, %show_sources, "render: called");
    match format {
        OutputFormat::Text => Ok(render_terminal(plan, show_sources)),
        OutputFormat::Markdown => Ok(render_markdown(plan, show_sources)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
    }
}

/// Styled terminal rendering
pub fn render_terminal(plan: &PlanResult, show_sources: bool) -> String {
    let text = tui_markdown::from_str(&plan.plan_text);
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", "Your Custom Vacation Plan".bright_cyan().bold()));

    for line in text.lines.iter() {
        for span in line.spans.iter() {
            let style = line.style.patch(span.style);
            out.push_str(&styled(&span.content, style).to_string());
        }
        out.push('\n');
    }

    if show_sources && plan.has_sources() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Sources:".bold()));
        for source in &plan.sources {
            out.push_str(&format!("  • {} {}\n", source.display_text(), source.uri.dimmed()));
        }
    }

    out
}

/// Markdown rendering, suitable for saving to a file
pub fn render_markdown(plan: &PlanResult, show_sources: bool) -> String {
    let mut out = plan.plan_text.trim_end().to_string();
    out.push('\n');

    if show_sources && plan.has_sources() {
        out.push_str("\n## Sources\n\n");
        for source in &plan.sources {
            out.push_str(&format!("- [{}]({})\n", source.display_text(), source.uri));
        }
    }

    out
}

fn styled(content: &str, style: Style) -> ColoredString {
    let mut s = content.normal();

    if let Some(fg) = style.fg.and_then(terminal_color) {
        s = s.color(fg);
    }
    if let Some(bg) = style.bg.and_then(terminal_color) {
        s = s.on_color(bg);
    }

    let modifiers = style.add_modifier;
    if modifiers.contains(Modifier::BOLD) {
        s = s.bold();
    }
    if modifiers.contains(Modifier::ITALIC) {
        s = s.italic();
    }
    if modifiers.contains(Modifier::UNDERLINED) {
        s = s.underline();
    }
    if modifiers.contains(Modifier::DIM) {
        s = s.dimmed();
    }
    if modifiers.contains(Modifier::CROSSED_OUT) {
        s = s.strikethrough();
    }
    if modifiers.contains(Modifier::REVERSED) {
        s = s.reversed();
    }

    s
}

fn terminal_color(color: Color) -> Option<colored::Color> {
    use colored::Color as C;
    match color {
        Color::Black => Some(C::Black),
        Color::Red => Some(C::Red),
        Color::Green => Some(C::Green),
        Color::Yellow => Some(C::Yellow),
        Color::Blue => Some(C::Blue),
        Color::Magenta => Some(C::Magenta),
        Color::Cyan => Some(C::Cyan),
        Color::Gray => Some(C::White),
        Color::DarkGray => Some(C::BrightBlack),
        Color::LightRed => Some(C::BrightRed),
        Color::LightGreen => Some(C::BrightGreen),
        Color::LightYellow => Some(C::BrightYellow),
        Color::LightBlue => Some(C::BrightBlue),
        Color::LightMagenta => Some(C::BrightMagenta),
        Color::LightCyan => Some(C::BrightCyan),
        Color::White => Some(C::BrightWhite),
        Color::Rgb(r, g, b) => Some(C::TrueColor { r, g, b }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Source;
    use serial_test::serial;

    fn plan() -> PlanResult {
        PlanResult {
            plan_text: "## Detailed Itinerary\n\n**Day 1**: Eiffel Tower\n\nSecond paragraph".to_string(),
            sources: vec![
                Source::new("https://a.example", "Guide A"),
                Source::new("https://b.example", "Guide B"),
            ],
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    #[serial]
    fn test_render_terminal_contains_text_and_sources() {
        let out = render_terminal(&plan(), true);

        assert!(out.contains("Day 1"));
        assert!(out.contains("Eiffel Tower"));
        assert!(out.contains("Second paragraph"));
        assert!(out.contains("Sources:"));
        assert!(out.contains("Guide A"));
        assert!(out.find("Guide A").unwrap() < out.find("Guide B").unwrap());
    }

    #[test]
    #[serial]
    fn test_render_terminal_hides_sources() {
        let out = render_terminal(&plan(), false);
        assert!(!out.contains("Sources:"));
    }

    #[test]
    fn test_render_markdown() {
        let out = render_markdown(&plan(), true);

        assert!(out.starts_with("## Detailed Itinerary"));
        assert!(out.contains("**Day 1**"));
        assert!(out.ends_with("- [Guide A](https://a.example)\n- [Guide B](https://b.example)\n"));
    }

    #[test]
    fn test_render_markdown_without_sources() {
        let plan = PlanResult {
            plan_text: "Just text\n\n".to_string(),
            sources: vec![],
        };
        assert_eq!(render_markdown(&plan, true), "Just text\n");
    }

    #[test]
    fn test_render_json() {
        let out = render(&plan(), OutputFormat::Json, true).unwrap();
        let parsed: PlanResult = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, plan());
    }

    #[test]
    #[serial]
    fn test_styled_bold() {
        colored::control::set_override(true);
        let s = styled("x", Style::default().add_modifier(Modifier::BOLD)).to_string();
        assert!(s.contains("\u{1b}[1m"));
        colored::control::unset_override();
    }
}
