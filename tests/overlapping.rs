use dictscan::{AhoCorasick, BuildError, Builder, Location};

fn ids_and_starts(locations: &[Location]) -> Vec<(usize, usize)> {
    locations.iter().map(|loc| (loc.r#match.pattern_id, loc.start())).collect()
}

#[test]
fn ushers_reports_all_three() {
    let ac = AhoCorasick::new(["he", "she", "hers"]).unwrap();
    let found = ids_and_starts(&ac.scan(b"ushers"));
    assert_eq!(found, vec![(1, 1), (0, 2), (2, 2)]);
}

#[test]
fn single_symbol_alphabet() {
    let ac = AhoCorasick::new(["a", "aa", "aaa"]).unwrap();
    let mut found = ids_and_starts(&ac.scan(b"aaaa"));
    found.sort();
    assert_eq!(
        found,
        vec![(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)],
    );
}

#[test]
fn disjoint_patterns_have_exact_positions() {
    let ac = AhoCorasick::new(["cat", "dog"]).unwrap();
    let locations = ac.scan(b"the cat and the dog");
    assert_eq!(ids_and_starts(&locations), vec![(0, 4), (1, 16)]);
    assert_eq!(locations[1].range(), 16..19);
}

#[test]
fn builder_matches_new() {
    let from_builder = Builder::new()
        .pattern("abra")
        .patterns(["cad", "bra"])
        .build()
        .unwrap();
    let from_new = AhoCorasick::new(["abra", "cad", "bra"]).unwrap();
    let haystack = b"abracadabra";
    assert_eq!(from_builder.scan(haystack), from_new.scan(haystack));
}

#[test]
fn rejected_sets_report_index() {
    assert_eq!(
        AhoCorasick::builder().build().unwrap_err(),
        BuildError::EmptyPatternSet,
    );
    let err = AhoCorasick::new(["x", "y", ""]).unwrap_err();
    assert_eq!(err, BuildError::InvalidPattern { index: 2 });
    assert_eq!(err.to_string(), "pattern 2 is empty");
}

#[test]
fn lazy_and_eager_agree() {
    let ac = AhoCorasick::new(["ab", "b", "bab"]).unwrap();
    let haystack = b"ababab";
    let lazy: Vec<Location> = ac.find_overlapping_iter(haystack).collect();
    assert_eq!(lazy, ac.scan(haystack));
    assert_eq!(ac.find_overlapping_iter(haystack).take(2).count(), 2);
}

#[test]
fn manual_stepping_matches_scan() {
    let ac = AhoCorasick::new(["he", "she", "hers"]).unwrap();
    let haystack = b"ushers";
    let mut state = ac.start_state();
    let mut stepped = Vec::new();
    for (i, &byte) in haystack.iter().enumerate() {
        state = ac.next_state(state, byte);
        for m in ac.matches(state) {
            stepped.push(Location { r#match: *m, end: i + 1 });
        }
    }
    assert_eq!(stepped, ac.scan(haystack));
}

#[test]
fn concurrent_scans_share_one_automaton() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AhoCorasick>();

    let ac = AhoCorasick::new(["needle", "dle", "hay"]).unwrap();
    let haystacks: [&[u8]; 4] = [b"haystack", b"needle", b"no match", b"hayneedlehay"];
    let expected: Vec<Vec<Location>> = haystacks.iter().map(|h| ac.scan(h)).collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = haystacks
            .iter()
            .map(|h| {
                let ac = &ac;
                s.spawn(move || ac.scan(h))
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn state_count_is_bounded_by_pattern_lengths() {
    let patterns = ["alpha", "alphabet", "beta", "bet", "gamma"];
    let ac = AhoCorasick::new(patterns).unwrap();
    let bound = 1 + patterns.iter().map(|p| p.len()).sum::<usize>();
    assert!(ac.state_count() <= bound);
    // alpha+bet share "alpha", bet is a prefix of beta.
    assert_eq!(ac.state_count(), 1 + 8 + 4 + 5);
}

#[test]
fn many_copies_of_one_long_pattern() {
    let pattern = vec![b'x'; 20_000];
    let ac = AhoCorasick::new(std::iter::repeat_n(&pattern, 1000)).unwrap();
    assert_eq!(ac.state_count(), pattern.len() + 1);

    let mut haystack = pattern.clone();
    haystack.push(b'x');
    let locations = ac.scan(&haystack);
    // Two end positions, every copy at each.
    assert_eq!(locations.len(), 2000);
    assert!(locations.iter().all(|loc| loc.r#match.pattern_len == 20_000));
}
