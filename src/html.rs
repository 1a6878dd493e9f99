//! HTML assembler: wraps rendered SVG in a minimal, self-contained page.
//!
//! All styling is inline in a single `<style>` element. The page references
//! no external stylesheet, script, font or image.

use crate::config::{RenderOptions, Theme};
use crate::svg::{escape_xml, RenderedMarkup};
use crate::types::VisualType;

/// Page colors per theme: (page gradient start, gradient end, card, header start, header end)
fn page_palette(theme: Theme) -> (&'static str, &'static str, &'static str, &'static str, &'static str) {
    match theme {
        Theme::Default => ("#667eea", "#764ba2", "#ffffff", "#2c3e50", "#34495e"),
        Theme::Dark => ("#14141f", "#2a2540", "#1e1e2e", "#0f0f18", "#232336"),
    }
}

fn style_block(theme: Theme) -> String {
    let (page_from, page_to, card, header_from, header_to) = page_palette(theme);
    format!(
        r#"<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{
    font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
    background: linear-gradient(135deg, {page_from} 0%, {page_to} 100%);
    min-height: 100vh;
    padding: 20px;
  }}
  .container {{
    max-width: 1600px;
    margin: 0 auto;
    background: {card};
    border-radius: 12px;
    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.1);
    overflow: hidden;
  }}
  .header {{
    background: linear-gradient(135deg, {header_from} 0%, {header_to} 100%);
    color: #ffffff;
    padding: 28px;
    text-align: center;
  }}
  .header h1 {{ font-size: 2.2rem; font-weight: 300; margin-bottom: 8px; }}
  .header p {{ opacity: 0.9; font-size: 1.05rem; }}
  .visual-container {{
    padding: 20px;
    display: flex;
    align-items: flex-start;
    justify-content: center;
    overflow: auto;
  }}
  .visual-container svg {{ display: block; max-width: 100%; height: auto; }}
  .visual-container .node:hover {{ filter: brightness(1.05); stroke-width: 3; }}
  .placeholder {{ padding: 60px 20px; text-align: center; color: #7f8c8d; font-size: 1.1rem; }}
</style>"#
    )
}

fn page(title: &str, subtitle: &str, body: &str, theme: Theme) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
{style}
</head>
<body>
<div class="container">
<div class="header">
<h1>{title}</h1>
<p>{subtitle}</p>
</div>
{body}
</div>
</body>
</html>
"#,
        title = escape_xml(title),
        subtitle = escape_xml(subtitle),
        style = style_block(theme),
        body = body
    )
}

/// Wrap rendered markup into a complete HTML document
pub fn assemble(markup: &RenderedMarkup, visual_type: VisualType, options: &RenderOptions) -> String {
    let title = format!("{} - {}", options.title, visual_type.title());
    let subtitle = if markup.is_truncated() {
        format!("{} generated from text, {} items not shown", visual_type.title(), markup.omitted)
    } else {
        format!("{} generated from text", visual_type.title())
    };
    let body = format!(
        "<div class=\"visual-container\" data-visual-type=\"{}\">\n{}\n</div>",
        visual_type.as_str(),
        markup.svg
    );
    page(&title, &subtitle, &body, options.theme)
}

/// The document returned when there is no text left to visualize
pub fn assemble_placeholder(options: &RenderOptions) -> String {
    let body = "<div class=\"placeholder\">No data to visualize. Provide some text describing steps, relationships or values.</div>";
    page(&options.title, "No data", body, options.theme)
}
