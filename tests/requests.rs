use serde_json::json;
use terracotta_storefront::dto::products::UpdateProductRequest;

fn parse(body: serde_json::Value) -> UpdateProductRequest {
    serde_json::from_value(body).expect("valid update body")
}

#[test]
fn original_price_absent_null_and_set_are_distinct() {
    let keep = parse(json!({ "price": 900 }));
    assert_eq!(keep.price, Some(900));
    assert_eq!(keep.original_price, None);

    let clear = parse(json!({ "price": 900, "original_price": null }));
    assert_eq!(clear.original_price, Some(None));

    let set = parse(json!({ "original_price": 1200 }));
    assert_eq!(set.original_price, Some(Some(1200)));
    assert_eq!(set.price, None);
}

#[test]
fn other_fields_keep_their_plain_optional_meaning() {
    let body = parse(json!({ "name": "Tall Floor Planter", "tag": null }));
    assert_eq!(body.name.as_deref(), Some("Tall Floor Planter"));
    assert_eq!(body.tag, None);
    assert_eq!(body.stock, None);
}
