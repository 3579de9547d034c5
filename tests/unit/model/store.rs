use super::*;

#[test]
fn mutations_are_deferred_until_apply() {
    let mut store = ParamStore::new(0i32);
    let m = store.mutator();
    assert!(m.enqueue(|v| *v += 5));
    assert_eq!(*store.get(), 0);

    assert_eq!(store.apply_pending(), 1);
    assert_eq!(*store.get(), 5);
    assert_eq!(store.apply_pending(), 0);
}

#[test]
fn apply_is_fifo_and_matches_sequential_application() {
    let mut store = ParamStore::new(Vec::<u32>::new());
    let m = store.mutator();
    for i in 0..10 {
        m.enqueue(move |v| v.push(i));
    }
    m.enqueue(|v| v.reverse());
    m.enqueue(|v| v.truncate(3));
    store.apply_pending();

    let mut expected: Vec<u32> = (0..10).collect();
    expected.reverse();
    expected.truncate(3);
    assert_eq!(store.get(), &expected);
}

#[test]
fn non_commuting_mutations_follow_enqueue_order() {
    let mut store = ParamStore::new(1.0f64);
    let m = store.mutator();
    m.enqueue(|v| *v += 1.0);
    m.enqueue(|v| *v *= 3.0);
    store.apply_pending();
    assert_eq!(*store.get(), 6.0);
}

#[test]
fn producers_on_many_threads_are_all_applied_once() {
    let mut store = ParamStore::new(0u64);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let m = store.mutator();
            std::thread::spawn(move || {
                for _ in 0..250 {
                    m.enqueue(|v| *v += 1);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.apply_pending(), 1000);
    assert_eq!(*store.get(), 1000);
}

#[test]
fn per_thread_order_is_preserved() {
    let mut store = ParamStore::new(Vec::<(u8, u32)>::new());
    let handles: Vec<_> = (0..3u8)
        .map(|t| {
            let m = store.mutator();
            std::thread::spawn(move || {
                for i in 0..100u32 {
                    m.enqueue(move |v| v.push((t, i)));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    store.apply_pending();

    for t in 0..3u8 {
        let seq: Vec<u32> = store
            .get()
            .iter()
            .filter(|(tt, _)| *tt == t)
            .map(|(_, i)| *i)
            .collect();
        assert_eq!(seq, (0..100).collect::<Vec<_>>());
    }
}

#[test]
fn enqueue_after_teardown_is_discarded() {
    let store = ParamStore::new(0i32);
    let m = store.mutator();
    assert_eq!(store.into_inner(), 0);
    assert!(!m.enqueue(|v| *v = 9));
}
