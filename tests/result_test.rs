#[cfg(test)]
mod tests {
    use graphql_converter::{Computation, ConverterError, LazyResult, SchemaType};
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn create_test_type() -> Arc<SchemaType> {
        Arc::new(
            SchemaType::new("TestType")
                .with_field("key1")
                .with_field("key2")
                .with_field("key3"),
        )
    }

    fn counted_computation(counter: &Arc<AtomicUsize>, value: Value) -> Computation {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value.clone())
        })
    }

    fn create_test_result(counter: &Arc<AtomicUsize>) -> LazyResult {
        let computations = vec![
            ("key1".to_string(), counted_computation(counter, json!("return value"))),
            ("key2".to_string(), counted_computation(counter, json!("return value"))),
            ("key3".to_string(), counted_computation(counter, json!("return value"))),
        ];
        LazyResult::new(create_test_type(), computations)
    }

    #[test]
    fn test_allows_access_to_schema_type() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        assert_eq!(result.schema_type().name(), "TestType");
    }

    #[test]
    fn test_exposes_all_given_fields_in_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        let names: Vec<&str> = result.field_names().collect();
        assert_eq!(names, vec!["key1", "key2", "key3"]);
    }

    #[test]
    fn test_does_not_compute_when_not_requested() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!result.is_computed("key1"));
    }

    #[test]
    fn test_computes_when_requested() {
        init_logging();
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        assert_eq!(result.get("key1").unwrap(), json!("return value"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(result.is_computed("key1"));
        // Other fields stay pending
        assert!(!result.is_computed("key2"));
    }

    #[test]
    fn test_computes_at_most_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        for _ in 0..5 {
            assert_eq!(result.get("key1").unwrap(), json!("return value"));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_memoizes_falsy_values() {
        // Computed-once semantics, not value-presence semantics: null, false
        // and empty values are cached like any other.
        for falsy in [json!(null), json!(false), json!(0), json!("")] {
            let counter = Arc::new(AtomicUsize::new(0));
            let result = LazyResult::new(
                create_test_type(),
                vec![("key1".to_string(), counted_computation(&counter, falsy.clone()))],
            );
            assert_eq!(result.get("key1").unwrap(), falsy);
            assert_eq!(result.get("key1").unwrap(), falsy);
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_set_before_read_suppresses_computation() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        result.set("key1", json!("written")).unwrap();
        assert_eq!(result.get("key1").unwrap(), json!("written"));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_set_after_read_overwrites_cached_value() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        assert_eq!(result.get("key1").unwrap(), json!("return value"));
        result.set("key1", json!("written")).unwrap();
        assert_eq!(result.get("key1").unwrap(), json!("written"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_field_fails() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = create_test_result(&counter);
        assert!(matches!(
            result.get("missing"),
            Err(ConverterError::UnknownField(name)) if name == "missing"
        ));
        assert!(matches!(
            result.set("missing", json!(1)),
            Err(ConverterError::UnknownField(_))
        ));
    }

    #[test]
    fn test_failed_computation_propagates_and_isolates() {
        let counter = Arc::new(AtomicUsize::new(0));
        let failing: Computation =
            Box::new(|| Err(ConverterError::MissingAccessor("key1".to_string())));
        let result = LazyResult::new(
            create_test_type(),
            vec![
                ("key1".to_string(), failing),
                ("key2".to_string(), counted_computation(&counter, json!("ok"))),
            ],
        );
        assert!(matches!(
            result.get("key1"),
            Err(ConverterError::MissingAccessor(_))
        ));
        assert!(!result.is_computed("key1"));
        // The failure does not touch other fields
        assert_eq!(result.get("key2").unwrap(), json!("ok"));
    }

    #[test]
    fn test_concurrent_first_access_computes_once() {
        // The field cell holds its lock across the computation, so readers
        // racing the first access still trigger exactly one invocation.
        let counter = Arc::new(AtomicUsize::new(0));
        let computation: Computation = {
            let counter = Arc::clone(&counter);
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(10));
                Ok(json!("return value"))
            })
        };
        let result = Arc::new(LazyResult::new(
            create_test_type(),
            vec![("key1".to_string(), computation)],
        ));
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let result = Arc::clone(&result);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    result.get("key1").unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), json!("return value"));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_independent_instances_share_no_state() {
        let counter = Arc::new(AtomicUsize::new(0));
        let first = create_test_result(&counter);
        let second = create_test_result(&counter);
        first.get("key1").unwrap();
        assert!(!second.is_computed("key1"));
        second.get("key1").unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
