use rulekit::{combine, create_rule, is_valid_rule, Attributes, RuleBook};

fn main() {
    // A single condition goes through the validated creation path
    let mut book = RuleBook::new();
    let (id, rule) = book.create_rule("age > 30").expect("valid rule");
    println!("{id}: {rule}");

    // Compound rules skip the single-condition gate
    let text = "(department = 'Sales' OR department = 'Marketing') AND salary > 50000";
    println!("is_valid_rule({text:?}) = {}", is_valid_rule(text));
    let compound = create_rule(text).expect("failed to parse rule");

    let combined = combine(["age > 30", text])
        .expect("failed to combine rules")
        .expect("at least one rule");
    println!("combined: {combined}");

    let attrs = Attributes::new()
        .set("age", 35_i64)
        .set("department", "Sales")
        .set("salary", 60_000_i64);

    println!("{rule} => {}", rule.evaluate(&attrs));
    println!("{compound} => {}", compound.evaluate(&attrs));
    println!("{combined} => {}", combined.evaluate(&attrs));
}
