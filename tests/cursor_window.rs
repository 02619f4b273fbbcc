use std::cell::Cell;
use std::ops::ControlFlow;

use RecordKit::iterate::{self, consume, Spread, Window};
use RecordKit::{assert_key, metrics, Key, Obj, Record};

fn letters(n: usize) -> Obj<usize> {
    (0..n)
        .map(|i| (((b'a' + i as u8) as char).to_string(), i))
        .collect()
}

fn idx_of(o: &Obj<usize>, w: Window) -> Vec<usize> {
    iterate::values(o, w).copied().collect()
}

#[test]
fn skip_drops_prefix() {
    let o = letters(5);
    let full = idx_of(&o, Window::default());
    for k in 0..=5isize {
        let mut c = iterate::values(&o, Window::default());
        c.skip_next(k);
        let got: Vec<usize> = c.copied().collect();
        assert_eq!(got, full[k as usize..].to_vec(), "skip({k})");
    }
    let mut c = iterate::values(&o, Window::default());
    c.skip_next(10);
    assert_eq!(c.advance(), None);
    assert!(c.is_halted());
}

#[test]
fn limit_is_relative_to_current_position() {
    let o = letters(6);
    let mut c = iterate::values(&o, Window::default());
    c.skip_next(2).limit(3);
    assert_eq!(c.end_bound(), Some(5));
    let got: Vec<usize> = c.copied().collect();
    assert_eq!(got, vec![2, 3, 4]);

    let mut c = iterate::values(&o, Window::default());
    c.limit(0);
    assert_eq!(c.advance(), None);
}

#[test]
fn stride_takes_every_nth() {
    let o = letters(7);
    let mut c = iterate::values(&o, Window::default());
    c.skip_next(1).stride(3);
    let got: Vec<usize> = c.copied().collect();
    assert_eq!(got, vec![1, 4]);

    assert_eq!(idx_of(&o, Window::new().with_step(2)), vec![0, 2, 4, 6]);
}

#[test]
fn stride_zero_halts() {
    let o = letters(3);
    let mut c = iterate::values(&o, Window::default());
    assert_eq!(c.advance(), Some(&0));
    c.stride(0);
    assert!(c.is_halted());
    assert_eq!(c.advance(), None);
}

#[test]
fn stop_at_is_absolute_and_clamped() {
    let o = letters(4);
    let mut c = iterate::values(&o, Window::default());
    c.skip_next(1).stop_at(3);
    assert_eq!(c.copied().collect::<Vec<_>>(), vec![1, 2]);

    assert_eq!(idx_of(&o, Window::new().with_end(99)), vec![0, 1, 2, 3]);
    // inverted window
    assert!(idx_of(&o, Window::new().with_start(3).with_end(1)).is_empty());
    // start beyond length
    assert!(idx_of(&o, Window::new().with_start(40)).is_empty());
}

#[test]
fn stop_mid_drain_hides_the_rest() {
    let o = letters(5);
    let mut seen = Vec::new();
    let mut c = iterate::values(&o, Window::default());
    while let Some(v) = c.advance() {
        seen.push(*v);
        if seen.len() == 2 {
            c.stop();
        }
    }
    assert_eq!(seen, vec![0, 1]);

    // same through for_each's break signal
    let mut seen = Vec::new();
    consume::for_each(iterate::values(&o, Window::default()), |v, _| {
        seen.push(*v);
        if seen.len() == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(seen, vec![0, 1]);
}

#[test]
fn stop_is_final_even_when_rewound() {
    let o = letters(3);
    let mut c = iterate::keys(&o, Window::default());
    c.stop();
    c.skip_next(-1).stop_at(3);
    assert_eq!(c.current_position(), -1);
    assert_eq!(c.advance(), None);
    assert!(c.is_halted());
}

#[test]
fn draining_twice_yields_empty_second_time() {
    let o = letters(4);
    let mut c = iterate::entries(&o, Window::default());
    let first = consume::map(&mut c, |e, _, _| Some(e.key));
    assert_eq!(first, ["a", "b", "c", "d"]);
    let second = consume::map(&mut c, |e, _, _| Some(e.key));
    assert!(second.is_empty());

    let sum = consume::reduce(&mut c, 0usize, |acc, e, _| acc + e.value);
    assert_eq!(sum, 0);
    let mut calls = 0;
    consume::for_each(&mut c, |_, _| {
        calls += 1;
        ControlFlow::Continue(())
    });
    assert_eq!(calls, 0);
    assert!(consume::flat_map(&mut c, |e, _, _| Spread::One(e.index)).is_empty());
}

#[test]
fn negative_step_walks_backwards_from_last_index() {
    let o = letters(4);
    assert_eq!(idx_of(&o, Window::new().with_step(-1)), vec![3, 2, 1, 0]);
    assert_eq!(idx_of(&o, Window::new().with_step(-2)), vec![3, 1]);
    // explicit start is honored
    assert_eq!(idx_of(&o, Window::new().with_start(2).with_step(-1)), vec![2, 1, 0]);
    // end bound still caps from above
    assert_eq!(idx_of(&o, Window::new().with_start(3).with_end(3).with_step(-1)), Vec::<usize>::new());
    // empty record: starts at -1, halts at once
    let empty: Obj<usize> = Obj::new();
    assert!(idx_of(&empty, Window::new().with_step(-1)).is_empty());
}

#[test]
fn values_are_read_at_step_time() {
    let o: Obj<Cell<i32>> = Obj::from([("a", Cell::new(1)), ("b", Cell::new(2))]);
    let mut c = iterate::values(&o, Window::default());
    assert_eq!(c.advance().map(Cell::get), Some(1));
    // mutate a value the cursor has not reached yet
    o["b"].set(20);
    assert_eq!(c.advance().map(Cell::get), Some(20));
    assert!(c.advance().is_none());
}

#[test]
fn combinators_chain_on_the_same_instance() {
    let o = letters(10);
    let mut c = iterate::keys(&o, Window::default());
    let k: Option<Key> = c.skip_next(2).stride(2).stop_at(8).advance();
    assert_eq!(k.as_deref(), Some("c"));
    let rest: Vec<Key> = c.by_ref().collect();
    assert_eq!(rest, ["e", "g"]);
    assert!(c.is_halted());
}

#[test]
fn huge_arguments_saturate_instead_of_overflowing() {
    let o = letters(5);

    let mut c = iterate::values(&o, Window::default());
    assert_eq!(c.advance(), Some(&0));
    c.skip_next(isize::MAX);
    assert_eq!(c.current_position(), isize::MAX);
    assert_eq!(c.advance(), None);
    assert!(c.is_halted());

    let mut c = iterate::values(&o, Window::default());
    c.skip_next(1).limit(isize::MAX);
    assert_eq!(c.end_bound(), Some(isize::MAX));
    assert_eq!(c.size_hint(), (0, Some(4)));
    assert_eq!(c.copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);

    let mut c = iterate::values(&o, Window::new().with_start(1).with_step(isize::MAX));
    assert_eq!(c.size_hint(), (0, Some(1)));
    assert_eq!(c.advance(), Some(&1));
    assert_eq!(c.advance(), None);
    assert!(c.is_halted());

    // the same toward index 0
    let mut c = iterate::values(&o, Window::new().with_step(isize::MIN));
    assert_eq!(c.advance(), Some(&4));
    assert_eq!(c.advance(), None);

    let mut c = iterate::values(&o, Window::new().with_step(-1));
    c.limit(isize::MAX);
    assert_eq!(c.copied().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);

    let mut c = iterate::values(&o, Window::new().with_step(-1));
    c.skip_next(isize::MIN);
    assert_eq!(c.current_position(), isize::MAX);
    assert_eq!(c.advance(), None);
}

#[test]
fn reverse_cursor_limits_and_skips_toward_zero() {
    let o = letters(5);

    let mut c = iterate::values(&o, Window::new().with_step(-1));
    c.limit(2);
    assert_eq!(c.floor_bound(), Some(2));
    assert_eq!(c.end_bound(), None);
    assert_eq!(c.size_hint(), (0, Some(2)));
    assert_eq!(c.copied().collect::<Vec<_>>(), vec![4, 3]);

    let mut c = iterate::values(&o, Window::new().with_step(-1));
    assert_eq!(c.advance(), Some(&4));
    c.skip_next(1);
    assert_eq!(c.copied().collect::<Vec<_>>(), vec![2, 1, 0]);

    let mut c = iterate::values(&o, Window::new().with_step(-1));
    c.stop_at(1);
    assert_eq!(c.copied().collect::<Vec<_>>(), vec![4, 3, 2]);

    let mut c = iterate::values(&o, Window::new().with_step(-2));
    c.limit(3);
    assert_eq!(c.copied().collect::<Vec<_>>(), vec![4, 2]);
}

// Declares a fixed key set; only some of the keys carry a value.
struct Sparse {
    declared: Vec<&'static str>,
    filled: Obj<i32>,
}

impl Record for Sparse {
    type Value = i32;

    fn key_snapshot(&self) -> Vec<Key> {
        self.declared.iter().map(|k| assert_key(*k, self)).collect()
    }

    fn lookup(&self, key: &str) -> Option<&i32> {
        self.filled.get(key)
    }

    fn len(&self) -> usize {
        self.declared.len()
    }
}

#[test]
fn unresolved_keys_are_skipped_with_their_index() {
    let rec = Sparse {
        declared: vec!["a", "b", "c", "d"],
        filled: Obj::from([("a", 1), ("c", 3)]),
    };
    let before = metrics::snapshot().missing_keys_skipped;

    let got: Vec<(String, i32, usize)> = iterate::entries(&rec, Window::default())
        .map(|e| (e.key.into_string(), *e.value, e.index))
        .collect();
    assert_eq!(got, vec![("a".to_string(), 1, 0), ("c".to_string(), 3, 2)]);
    assert!(metrics::snapshot().missing_keys_skipped >= before + 2);

    let seen = consume::map(iterate::keys(&rec, Window::default()), |_, i, _| Some(i));
    assert_eq!(seen, vec![0, 2]);
}
