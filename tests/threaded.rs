use std::sync::Arc;
use std::thread;

use rulekit::{combine, Attributes, Evaluator, Node, TracingHook};

fn applicant(age: i64, department: &str, salary: i64, experience: i64) -> Attributes {
    Attributes::new()
        .set("age", age)
        .set("department", department)
        .set("salary", salary)
        .set("experience", experience)
}

#[test]
fn evaluate_across_threads() {
    let rule: Arc<Node> = Arc::new(
        combine([
            "(age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')",
            "salary > 50000 OR experience > 5",
        ])
        .unwrap()
        .unwrap(),
    );

    let cases = [
        (applicant(35, "Sales", 60_000, 3), true),
        (applicant(22, "Marketing", 20_000, 6), true),
        (applicant(22, "HR", 90_000, 10), false),
        (applicant(40, "Sales", 30_000, 2), false),
    ];

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(attrs, expected)| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || (rule.matches(&attrs), expected))
        })
        .collect();

    for handle in handles {
        let (got, expected) = handle.join().unwrap();
        assert_eq!(got, expected);
    }
}

#[test]
fn scoped_threads_share_a_borrowed_tree() {
    let rule = combine(["age >= 18", "salary > 0"]).unwrap().unwrap();

    let results: Vec<bool> = thread::scope(|s| {
        let handles: Vec<_> = (0..8_i64)
            .map(|i| {
                let rule = &rule;
                s.spawn(move || {
                    let attrs = applicant(14 + i, "HR", 1_000, 0);
                    Evaluator::new()
                        .with_hook(&TracingHook)
                        .evaluate(rule, &attrs)
                        .truthy()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, vec![false, false, false, false, true, true, true, true]);
}
