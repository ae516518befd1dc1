use std::sync::Arc;
use std::thread;

use rulekit::{combine, Attributes};

fn main() {
    let rule = Arc::new(
        combine(["age >= 18", "department = 'Sales'"])
            .expect("failed to combine rules")
            .expect("at least one rule"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let attrs = Attributes::new()
                    .set("age", 16_i64 + i64::from(i))
                    .set("department", "Sales");
                let result = rule.evaluate(&attrs);
                println!("Thread {i}: {result}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
