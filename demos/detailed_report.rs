use rulekit::{combine, evaluate_detailed, Attributes};

fn main() {
    let rule = combine([
        "(age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')",
        "salary > 50000 OR experience > 5",
    ])
    .expect("failed to combine rules")
    .expect("at least one rule");

    let attrs = Attributes::new()
        .set("age", 24_i64)
        .set("department", "Marketing")
        .set("salary", 40_000_i64)
        .set("experience", 7_i64);

    let report = evaluate_detailed(&rule, &attrs);

    println!("{report}");
    println!();
    for (i, step) in report.steps().iter().enumerate() {
        println!("{i:>2}: {step}");
    }
    println!("Operands resolved: {}", report.operands_resolved());
    println!("Duration: {:?}", report.duration());
}
