use rulekit::{
    attr, combine, create_rule, evaluate, evaluate_json, from_json_str, Attributes, Node, Value,
};
use serde_json::json;

fn applicant() -> Attributes {
    serde_json::from_value(json!({
        "age": 25,
        "salary": 50000,
        "experience": 3,
        "department": "Sales"
    }))
    .unwrap()
}

fn operand(value: serde_json::Value) -> serde_json::Value {
    json!({ "node_type": "operand", "left": null, "right": null, "value": value })
}

#[test]
fn created_rule_encodes_to_four_field_form() {
    let node = create_rule("salary > 20000").unwrap();
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "node_type": "operator",
            "left": operand(json!("salary")),
            "right": operand(json!("20000")),
            "value": ">"
        })
    );
}

#[test]
fn hand_written_tree_evaluates() {
    let ast = json!({
        "node_type": "operator",
        "value": "AND",
        "left": {
            "node_type": "operator",
            "value": ">",
            "left": operand(json!("age")),
            "right": operand(json!(20))
        },
        "right": {
            "node_type": "operator",
            "value": "=",
            "left": operand(json!("department")),
            "right": operand(json!("Sales"))
        }
    });
    assert_eq!(evaluate_json(&ast, &applicant()), Value::Bool(true));
}

#[test]
fn decoded_tree_matches_parsed_tree() {
    let text = "age > 30 AND (department = 'Sales' OR salary >= 60000)";
    let parsed = create_rule(text).unwrap();
    let wire = serde_json::to_string(&parsed).unwrap();
    let decoded: Node = serde_json::from_str(&wire).unwrap();
    assert_eq!(decoded, parsed);
}

#[test]
fn unknown_node_type_evaluates_false() {
    let ast = json!({ "node_type": "function", "value": "max", "left": null, "right": null });
    assert_eq!(evaluate_json(&ast, &applicant()), Value::Bool(false));
}

#[test]
fn unknown_node_type_deep_in_tree_fails_the_whole_tree() {
    let ast = json!({
        "node_type": "operator",
        "value": "OR",
        "left": {
            "node_type": "operator",
            "value": ">",
            "left": operand(json!("age")),
            "right": operand(json!("20"))
        },
        "right": { "node_type": "mystery", "value": "?" }
    });
    assert_eq!(evaluate_json(&ast, &applicant()), Value::Bool(false));
}

#[test]
fn unknown_operator_symbol_evaluates_false() {
    let ast = json!({
        "node_type": "operator",
        "value": "!=",
        "left": operand(json!("age")),
        "right": operand(json!("30"))
    });
    assert_eq!(evaluate_json(&ast, &applicant()), Value::Bool(false));
}

#[test]
fn non_object_ast_evaluates_false() {
    assert_eq!(evaluate_json(&json!("age > 30"), &applicant()), Value::Bool(false));
    assert_eq!(evaluate_json(&json!(null), &applicant()), Value::Bool(false));
}

#[test]
fn attributes_reject_nested_values() {
    let err = serde_json::from_value::<Attributes>(json!({ "address": { "city": "Pune" } }));
    assert!(err.is_err());
}

#[test]
fn attributes_keep_native_types() {
    let attrs: Attributes =
        serde_json::from_value(json!({ "age": 25, "ratio": 0.5, "active": true, "name": "a" }))
            .unwrap();
    assert_eq!(attrs.get("age"), Some(&Value::Int(25)));
    assert_eq!(attrs.get("ratio"), Some(&Value::Float(0.5)));
    assert_eq!(attrs.get("active"), Some(&Value::Bool(true)));
    assert_eq!(attrs.get("name"), Some(&Value::String("a".into())));
}

#[test]
fn builder_and_wire_agree() {
    let node: Node = serde_json::from_value(json!({
        "node_type": "operator",
        "value": "<=",
        "left": "experience",
        "right": 5
    }))
    .unwrap();
    assert_eq!(node, attr("experience").lte(5));
}

#[test]
fn long_combination_survives_the_wire() {
    let texts: Vec<String> = (0..300).map(|i| format!("f{i} >= 1")).collect();
    let combined = combine(&texts).unwrap().unwrap();
    let attrs: Attributes = (0..300).map(|i| (format!("f{i}"), 5_i64)).collect();
    assert_eq!(evaluate(&combined, &attrs), Value::Bool(true));

    let encoded = serde_json::to_string(&combined).unwrap();

    let decoded: Node = from_json_str(&encoded).unwrap();
    assert_eq!(decoded, combined);
    assert_eq!(evaluate(&decoded, &attrs), Value::Bool(true));

    let ast: serde_json::Value = from_json_str(&encoded).unwrap();
    assert_eq!(evaluate_json(&ast, &attrs), Value::Bool(true));

    let mut failing = attrs.clone();
    failing.insert("f299", Value::Int(0));
    assert_eq!(evaluate_json(&ast, &failing), Value::Bool(false));
}
