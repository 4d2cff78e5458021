mod common;

use common::trace;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use swipe_engine::SwipeEngine;

const DICT_A: &str = "cat\t5\ncar\t3\ncab\t1\n";
const DICT_B: &str = "cow\t4\ncod\t2\ncop\t2\ncoy\t1\n";

fn word_set(text: &str) -> BTreeSet<String> {
    text.lines()
        .filter_map(|l| l.split('\t').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn predictions_see_whole_dictionaries_during_reloads() {
    let engine = SwipeEngine::new();
    engine.load_dictionary(DICT_A).unwrap();

    let set_a = word_set(DICT_A);
    let set_b = word_set(DICT_B);
    let raw = trace("cat");
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut seen = 0usize;
                while !done.load(Ordering::Relaxed) || seen == 0 {
                    let preds = engine.predict(&raw, 0).unwrap();
                    let got: BTreeSet<String> = preds.into_iter().map(|p| p.word).collect();
                    assert!(got == set_a || got == set_b, "torn dictionary: {:?}", got);
                    seen += 1;
                }
            });
        }

        s.spawn(|| {
            for i in 0..200 {
                let text = if i % 2 == 0 { DICT_B } else { DICT_A };
                engine.load_dictionary(text).unwrap();
                engine.set_pop_weight((i % 11) as f64 / 10.0);
            }
            done.store(true, Ordering::Relaxed);
        });
    });

    assert_eq!(engine.word_count(), 3);
}

#[test]
fn concurrent_predictions_agree() {
    let engine = common::bundled_engine();
    let raw = trace("people");
    let expected = engine.predict(&raw, 5).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| engine.predict(&raw, 5).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
