//! Validation messages, one per failing constraint, in schema field order.

use folio_babel::{validate_block_data, BLOCK_TYPES};
use serde_json::{json, Value};

fn messages(block_type: &str, data: Value) -> String {
    validate_block_data(block_type, &data).errors().join("\n")
}

#[test]
fn card_requires_a_title() {
    let result = validate_block_data("card", &json!({}));
    assert!(!result.valid);
    insta::assert_snapshot!(result.errors().join("\n"), @"/title: is required");

    let result = validate_block_data("card", &json!({"title": "X"}));
    assert!(result.valid);
    assert_eq!(result.errors, None);
}

#[test]
fn unknown_types_are_rejected() {
    insta::assert_snapshot!(messages("unknowntype", json!({})), @"Unknown block type: unknowntype");
}

#[test]
fn non_object_payloads() {
    insta::assert_snapshot!(messages("badge", json!([1, 2])), @"/: expected an object");
    insta::assert_snapshot!(messages("alert", json!("text")), @"/: expected an object");
}

#[test]
fn bar_chart_reports_every_problem() {
    let data = json!({
        "data": [{"name": "a", "value": "x"}, {"value": 3}],
        "color": "blue",
        "height": 50.5
    });
    insta::assert_snapshot!(messages("barchart", data), @r"
    /data/0/value: expected a number
    /data/1/name: is required
    /color: must be a hex color like #1a2b3c
    /height: expected an integer
    /height: must be at least 100
    ");
}

#[test]
fn table_checks_columns_cells_and_page_size() {
    let data = json!({
        "columns": [],
        "rows": [["a", true], [1, null]],
        "pageSize": 500
    });
    insta::assert_snapshot!(messages("tablejson", data), @r"
    /columns: must contain at least 1 items
    /rows/0/1: expected a string or number
    /rows/1/1: expected a string or number
    /pageSize: must be at most 100
    ");
}

#[test]
fn enums_urls_and_booleans() {
    let data = json!({
        "title": "T",
        "href": "not a url",
        "image": "https://example.com/a.png",
        "variant": "loud"
    });
    insta::assert_snapshot!(messages("card", data), @r"
    /href: must be a valid URL
    /variant: must be one of: default, outline, secondary
    ");

    let data = json!({"data": [{"name": "a", "value": 1}, {"name": "b", "value": 2}], "showDots": "yes"});
    insta::assert_snapshot!(messages("linechart", data), @"/showDots: expected a boolean");
}

#[test]
fn chart_item_bounds() {
    let data = json!({"data": [{"subject": "a", "value": 1}, {"subject": "b", "value": -2}]});
    insta::assert_snapshot!(messages("radarchart", data), @r"
    /data: must contain at least 3 items
    /data/1/value: must be at least 0
    ");

    let data = json!({"data": [{"name": "a", "value": 1}], "fillOpacity": 1.5});
    insta::assert_snapshot!(messages("areachart", data), @r"
    /data: must contain at least 2 items
    /fillOpacity: must be at most 1
    ");
}

#[test]
fn result_serializes_without_errors_when_valid() {
    let valid = validate_block_data("badge", &json!({"label": "new", "color": "#16a34a"}));
    assert_eq!(serde_json::to_value(&valid).unwrap(), json!({"valid": true}));

    let invalid = validate_block_data("badge", &json!({"color": "#16a34a"}));
    assert_eq!(
        serde_json::to_value(&invalid).unwrap(),
        json!({"valid": false, "errors": ["/label: is required"]})
    );
}

#[test]
fn minimal_payloads_are_valid_for_every_type() {
    let point = json!({"name": "a", "value": 1});
    let minimal = |tag: &str| match tag {
        "card" => json!({"title": "T"}),
        "alert" => json!({"description": "D"}),
        "badge" => json!({"label": "L"}),
        "barchart" => json!({"data": [point]}),
        "linechart" | "areachart" => json!({"data": [point, point]}),
        "piechart" => json!({"data": [point]}),
        "radarchart" => json!({"data": [
            {"subject": "a", "value": 1},
            {"subject": "b", "value": 2},
            {"subject": "c", "value": 3}
        ]}),
        "scatterchart" => json!({"data": [{"x": 1, "y": 2}]}),
        "tablejson" => json!({"columns": ["A"], "rows": []}),
        other => panic!("no minimal payload for {other}"),
    };

    for block_type in BLOCK_TYPES {
        let tag = block_type.as_str();
        let result = validate_block_data(tag, &minimal(tag));
        assert!(result.valid, "{tag}: {:?}", result.errors());
    }
}
