//! SVG text layers.
//!
//! Text is laid out as small SVG documents (one for the title, one for the
//! site label) that the backend rasterizes and pastes onto the canvas. Maud
//! builds the markup, so titles containing `&`, `<` or quotes come out
//! escaped instead of breaking the document.

use super::layout::{
    CANVAS_WIDTH, LABEL_BASELINE, LABEL_HEIGHT, TITLE_HEIGHT, line_offset,
};
use super::params::TextStyle;
use maud::{Markup, html};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn text_line(y: f32, text: &str, style: &TextStyle) -> Markup {
    html! {
        text x="50%" y=(y.to_string()) text-anchor="middle"
            font-family=(style.family) font-size=(style.size.to_string())
            font-weight=(style.weight.to_string()) fill=(style.fill) {
            (text)
        }
    }
}

fn document(width: u32, height: u32, body: Markup) -> String {
    html! {
        svg xmlns=(SVG_NS) width=(width.to_string()) height=(height.to_string())
            viewBox=(format!("0 0 {width} {height}")) {
            (body)
        }
    }
    .into_string()
}

/// The 1920×600 title layer with every line centred horizontally and the
/// block centred vertically.
pub fn title_layer(lines: &[String], style: &TextStyle) -> String {
    let body = html! {
        @for (index, line) in lines.iter().enumerate() {
            (text_line(
                line_offset(lines.len(), index, style.size, TITLE_HEIGHT as f32),
                line,
                style,
            ))
        }
    };
    document(CANVAS_WIDTH, TITLE_HEIGHT, body)
}

/// The 1920×80 site label layer.
pub fn label_layer(label: &str, style: &TextStyle) -> String {
    document(
        CANVAS_WIDTH,
        LABEL_HEIGHT,
        text_line(LABEL_BASELINE, label, style),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: TextStyle<'static> = TextStyle {
        family: "Inter",
        size: 80.0,
        weight: 700,
        fill: "#dddddd",
    };

    #[test]
    fn title_layer_places_two_lines() {
        let svg = title_layer(&["First half".into(), "second half".into()], &STYLE);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1920" height="600" viewBox="0 0 1920 600">"#));
        assert!(svg.contains(r#"y="250""#));
        assert!(svg.contains(r#"y="350""#));
        assert!(svg.contains(">First half</text>"));
        assert!(svg.contains(">second half</text>"));
        assert_eq!(svg.matches("<text ").count(), 2);
    }

    #[test]
    fn single_line_is_centred() {
        let svg = title_layer(&["Web Crypto (Series)".into()], &STYLE);
        assert!(svg.contains(r#"y="300""#));
    }

    #[test]
    fn text_attributes_follow_style() {
        let svg = title_layer(&["x".into()], &STYLE);
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-family="Inter""#));
        assert!(svg.contains(r#"font-size="80""#));
        assert!(svg.contains(r#"font-weight="700""#));
        assert!(svg.contains(r##"fill="#dddddd""##));
    }

    #[test]
    fn title_text_is_escaped() {
        let svg = title_layer(&["Tom & <Jerry>".into()], &STYLE);
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!svg.contains("<Jerry>"));
    }

    #[test]
    fn label_layer_uses_fixed_baseline() {
        let style = TextStyle {
            size: 60.0,
            weight: 400,
            fill: "#aaaaaa",
            ..STYLE
        };
        let svg = label_layer("voracious.dev", &style);
        assert!(svg.contains(r#"height="80""#));
        assert!(svg.contains(r#"y="50""#));
        assert!(svg.contains(">voracious.dev</text>"));
    }
}
