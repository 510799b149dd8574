//! Card, alert, badge and table widgets.

use super::util::{
    array_field, bool_field, color_field, number_field, text_field, value_to_string,
    variant_field,
};
use super::{RenderOptions, WidgetRenderer};
use crate::blocks::BlockType;
use crate::formats::html::dom::{append, create_element, create_text, element_with_text};
use markup5ever_rcdom::Handle;
use serde_json::Value;

pub struct CardRenderer;

impl WidgetRenderer for CardRenderer {
    fn block_type(&self) -> BlockType {
        BlockType::Card
    }

    fn render(&self, data: &Value, _options: &RenderOptions) -> Handle {
        let variant = variant_field(data, "variant", &["default", "outline", "secondary"]);
        let class = format!("folio-card folio-card-{variant}");
        let card = create_element("div", vec![("class", class.as_str())]);
        let title = text_field(data, "title").unwrap_or_default();

        if let Some(image) = text_field(data, "image") {
            append(
                &card,
                create_element(
                    "img",
                    vec![("class", "folio-card-image"), ("src", image.as_str()), ("alt", title.as_str())],
                ),
            );
        }

        let header = create_element("div", vec![("class", "folio-card-header")]);
        let heading = create_element("h3", vec![("class", "folio-card-title")]);
        match text_field(data, "href") {
            Some(href) => append(&heading, element_with_text("a", vec![("href", href.as_str())], &title)),
            None => append(&heading, create_text(&title)),
        }
        append(&header, heading);
        if let Some(description) = text_field(data, "description") {
            append(
                &header,
                element_with_text("p", vec![("class", "folio-card-description")], &description),
            );
        }
        append(&card, header);

        if let Some(content) = text_field(data, "content") {
            let body = create_element("div", vec![("class", "folio-card-content")]);
            append(&body, element_with_text("p", vec![], &content));
            append(&card, body);
        }
        if let Some(footer) = text_field(data, "footer") {
            append(
                &card,
                element_with_text("div", vec![("class", "folio-card-footer")], &footer),
            );
        }
        card
    }
}

pub struct AlertRenderer;

impl WidgetRenderer for AlertRenderer {
    fn block_type(&self) -> BlockType {
        BlockType::Alert
    }

    fn render(&self, data: &Value, _options: &RenderOptions) -> Handle {
        let variant = variant_field(
            data,
            "variant",
            &["default", "destructive", "warning", "success", "info"],
        );
        let class = format!("folio-alert folio-alert-{variant}");
        let alert = create_element("div", vec![("class", class.as_str()), ("role", "alert")]);

        if let Some(title) = text_field(data, "title") {
            append(
                &alert,
                element_with_text("h4", vec![("class", "folio-alert-title")], &title),
            );
        }
        let description = text_field(data, "description").unwrap_or_default();
        append(
            &alert,
            element_with_text("div", vec![("class", "folio-alert-description")], &description),
        );
        alert
    }
}

pub struct BadgeRenderer;

impl WidgetRenderer for BadgeRenderer {
    fn block_type(&self) -> BlockType {
        BlockType::Badge
    }

    fn render(&self, data: &Value, _options: &RenderOptions) -> Handle {
        let variant = variant_field(
            data,
            "variant",
            &["default", "secondary", "destructive", "outline"],
        );
        let class = format!("folio-badge folio-badge-{variant}");
        let label = text_field(data, "label").unwrap_or_default();

        let style = data
            .get("color")
            .map(|_| format!("background-color: {}", color_field(data, "color", "#18181b")));

        let mut attrs = vec![("class", class.as_str())];
        if let Some(style) = &style {
            attrs.push(("style", style.as_str()));
        }
        element_with_text("span", attrs, &label)
    }
}

/// Paged data table. Every row is emitted; rows past the first page carry `hidden` so the page
/// script (or a reader with CSS off) still has the full data.
pub struct TableRenderer;

impl WidgetRenderer for TableRenderer {
    fn block_type(&self) -> BlockType {
        BlockType::TableJson
    }

    fn render(&self, data: &Value, options: &RenderOptions) -> Handle {
        let page_size = number_field(data, "pageSize")
            .filter(|n| *n >= 1.0)
            .map(|n| n as usize)
            .unwrap_or(options.table_page_size)
            .max(1);
        let columns: Vec<String> = array_field(data, "columns")
            .iter()
            .map(value_to_string)
            .collect();
        let rows = array_field(data, "rows");
        let pages = rows.len().div_ceil(page_size).max(1);

        let page_size_attr = page_size.to_string();
        let wrapper = create_element(
            "div",
            vec![
                ("class", "folio-table-wrapper"),
                ("data-page-size", page_size_attr.as_str()),
            ],
        );
        if let Some(title) = text_field(data, "title") {
            append(
                &wrapper,
                element_with_text("h4", vec![("class", "folio-table-title")], &title),
            );
        }

        let class = if bool_field(data, "striped", false) {
            "folio-table folio-table-striped"
        } else {
            "folio-table"
        };
        let table = create_element("table", vec![("class", class)]);
        if let Some(caption) = text_field(data, "caption") {
            append(&table, element_with_text("caption", vec![], &caption));
        }

        let thead = create_element("thead", vec![]);
        let header_row = create_element("tr", vec![]);
        for column in &columns {
            append(&header_row, element_with_text("th", vec![("scope", "col")], column));
        }
        append(&thead, header_row);
        append(&table, thead);

        let tbody = create_element("tbody", vec![]);
        for (index, row) in rows.iter().enumerate() {
            let page = (index / page_size + 1).to_string();
            let mut attrs = vec![("data-page", page.as_str())];
            if index >= page_size {
                attrs.push(("hidden", ""));
            }
            let tr = create_element("tr", attrs);
            let cells = row.as_array().map(Vec::as_slice).unwrap_or(&[]);
            for column in 0..columns.len() {
                let text = cells.get(column).map(value_to_string).unwrap_or_default();
                append(&tr, element_with_text("td", vec![], &text));
            }
            append(&tbody, tr);
        }
        append(&table, tbody);
        append(&wrapper, table);

        if pages > 1 {
            let status = format!("Page 1 of {pages}");
            append(
                &wrapper,
                element_with_text(
                    "div",
                    vec![("class", "folio-table-pager"), ("aria-live", "polite")],
                    &status,
                ),
            );
        }
        wrapper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::html::dom::{has_class, is_element, serialize_children, text_content};
    use serde_json::json;

    fn render_html(renderer: &dyn WidgetRenderer, data: Value) -> String {
        let root = create_element("div", vec![]);
        append(&root, renderer.render(&data, &RenderOptions::default()));
        serialize_children(&root).unwrap()
    }

    #[test]
    fn card_renders_title_and_sections() {
        let html = render_html(
            &CardRenderer,
            json!({"title": "Hello", "description": "Intro", "footer": "Bye", "variant": "outline"}),
        );
        assert!(html.starts_with("<div class=\"folio-card folio-card-outline\">"));
        assert!(html.contains("<h3 class=\"folio-card-title\">Hello</h3>"));
        assert!(html.contains("<p class=\"folio-card-description\">Intro</p>"));
        assert!(html.contains("<div class=\"folio-card-footer\">Bye</div>"));
    }

    #[test]
    fn card_links_title_when_href_present() {
        let html = render_html(&CardRenderer, json!({"title": "Go", "href": "https://example.com"}));
        assert!(html.contains("<a href=\"https://example.com\">Go</a>"));
    }

    #[test]
    fn alert_has_role_and_variant() {
        let node = AlertRenderer.render(
            &json!({"variant": "warning", "description": "Careful"}),
            &RenderOptions::default(),
        );
        assert!(has_class(&node, "folio-alert-warning"));
        assert_eq!(text_content(&node), "Careful");
    }

    #[test]
    fn badge_ignores_malformed_color() {
        let html = render_html(&BadgeRenderer, json!({"label": "new", "color": "red"}));
        assert_eq!(
            html,
            "<span class=\"folio-badge folio-badge-default\" style=\"background-color: #18181b\">new</span>"
        );
    }

    #[test]
    fn table_pages_rows() {
        let rows: Vec<Value> = (0..5).map(|i| json!([format!("r{i}"), i])).collect();
        let node = TableRenderer.render(
            &json!({"columns": ["Name", "N"], "rows": rows, "pageSize": 2}),
            &RenderOptions::default(),
        );
        let html = {
            let root = create_element("div", vec![]);
            append(&root, node);
            serialize_children(&root).unwrap()
        };
        assert!(html.contains("data-page-size=\"2\""));
        assert!(html.contains("<tr data-page=\"1\"><td>r0</td><td>0</td></tr>"));
        assert!(html.contains("<tr data-page=\"2\" hidden=\"\"><td>r2</td><td>2</td></tr>"));
        assert!(html.contains("Page 1 of 3"));
    }

    #[test]
    fn table_tolerates_ragged_and_missing_rows() {
        let node = TableRenderer.render(
            &json!({"columns": ["A", "B"], "rows": [["only"], "not a row"]}),
            &RenderOptions::default(),
        );
        let table = crate::formats::html::dom::find_element(&node, "table").unwrap();
        assert!(is_element(&table, "table"));
        assert_eq!(text_content(&table), "ABonly");
    }
}
