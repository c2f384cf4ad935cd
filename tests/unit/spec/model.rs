use super::*;
use serde_json::json;

#[test]
fn unknown_attributes_survive_a_roundtrip() {
    let src = json!({
        "$schema": "https://vega.github.io/schema/vega/v5.json",
        "width": 400,
        "data": [
            {"name": "table", "values": [{"x": 1}], "transform": [{"type": "filter", "expr": "true"}]},
            {"name": "remote", "url": "data/cars.json"}
        ],
        "marks": [{"type": "rect", "from": {"data": "table"}}]
    });

    let spec: Specification = serde_json::from_value(src.clone()).unwrap();
    assert_eq!(spec.table_names().collect::<Vec<_>>(), ["table", "remote"]);
    assert!(spec.table("remote").unwrap().values.is_none());
    assert_eq!(spec.table("remote").unwrap().extra["url"], json!("data/cars.json"));

    let back = serde_json::to_value(&spec).unwrap();
    assert_eq!(back, src);
}

#[test]
fn null_data_is_treated_as_absent() {
    let spec: Specification = serde_json::from_value(json!({"data": null, "width": 1})).unwrap();
    assert!(spec.data.is_none());
    assert_eq!(spec.rest["width"], json!(1));
}

#[test]
fn descriptor_without_name_is_rejected() {
    let res: Result<Specification, _> = serde_json::from_value(json!({"data": [{"values": []}]}));
    assert!(res.is_err());
}

#[test]
fn rows_only_for_inline_arrays() {
    let t = TableDescriptor::new("a", vec![json!(1), json!(2)]);
    assert_eq!(t.rows().unwrap().len(), 2);

    let t: TableDescriptor =
        serde_json::from_value(json!({"name": "b", "values": {"k": 1}})).unwrap();
    assert!(t.rows().is_none());
}

#[test]
fn null_values_stay_distinct_from_absent() {
    let src = json!({"data": [{"name": "n", "values": null}, {"name": "u", "url": "x.json"}]});
    let spec: Specification = serde_json::from_value(src.clone()).unwrap();
    assert_eq!(spec.table("n").unwrap().values, Some(Value::Null));
    assert!(spec.table("n").unwrap().rows().is_none());
    assert!(spec.table("u").unwrap().values.is_none());
    assert_eq!(serde_json::to_value(&spec).unwrap(), src);
}
