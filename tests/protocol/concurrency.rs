//! Registries and decoded values shared across threads

use super::*;
use std::thread;

#[test]
fn test_shared_registry_parallel_decode() {
    let fx = fixtures();
    let registry = Arc::new(fx.registry);
    let point = fx.point;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let text = format!(r#"{{"$ref":{{"cls":"Point","ths":{{"x":{i},"y":{i}}}}}}}"#);
                let value = decode(&text, &registry).unwrap();
                let p = value.as_instance().unwrap().downcast_ref::<Point>().cloned();
                (value.as_instance().unwrap().class().clone(), p)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (class, p) = handle.join().unwrap();
        assert!(Arc::ptr_eq(&class, &point));
        let i = i as i64;
        assert_eq!(p, Some(Point { x: i, y: i }));
    }
}

#[test]
fn test_decoded_functions_cross_threads() {
    let fx = fixtures();
    let ada = Instance::new(&fx.greeter, Greeter { name: "Ada".into() }).unwrap();
    let text = encode(&ada.get("greet").unwrap()).unwrap();
    let greet = decode(&text, &fx.registry).unwrap();

    let result = thread::spawn(move || greet.call(&[Value::from("thread")]))
        .join()
        .unwrap()
        .unwrap();
    assert_eq!(result, Value::from("hello thread, from Ada"));
}
