mod property_tests {
    use std::collections::BTreeMap;

    use proptest::{
        collection::vec,
        prelude::*,
        proptest,
    };

    use crate::{
        config::SkipListConfig,
        skiplist::{
            skipnode::Position,
            LevelGenerator,
            SkipList,
        },
    };

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u64, u32),
        Delete(u64),
    }

    // a narrow key space so deletes and overwrites actually hit
    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u64..64, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => (0u64..64).prop_map(Op::Delete),
        ]
    }

    /// Checks every structural invariant by walking the raw links.
    fn assert_structure<V, G: LevelGenerator>(list: &SkipList<V, G>) {
        let max_level = list.max_level();
        assert!(list.level() <= max_level, "level above max_level");
        assert_eq!(list.len() == 0, list.level() == 0, "empty iff level is zero");
        assert_eq!(list.len(), list.count_nodes(), "len counter drifted");
        assert_eq!(list.len(), list.arena.live(), "leaked or double-freed node");

        for i in list.level()..max_level {
            assert!(list.head[i].is_none(), "header linked above level on {}", i);
        }

        let level0: Vec<u64> = list.keys().collect();
        assert!(level0.windows(2).all(|w| w[0] < w[1]), "level 0 not strictly sorted");

        let mut below = level0;
        for i in 1..list.level() {
            let mut chain = Vec::new();
            let mut next = list.next_at(Position::Head, i);
            while let Some(id) = next {
                let node = &list.arena[id];
                assert!(node.height() > i, "node {} linked above its tower", node.key);
                chain.push(node.key);
                next = node.forward[i];
            }
            assert!(chain.windows(2).all(|w| w[0] < w[1]), "level {} not sorted", i);
            assert!(
                chain.iter().all(|k| below.binary_search(k).is_ok()),
                "level {} not a subset",
                i
            );
            below = chain;
        }

        if list.level() > 0 {
            let top = list.level() - 1;
            assert!(list.head[top].is_some(), "top level {} is empty", top);
        }

        for key in list.keys() {
            let height = list.arena[list.find(key).unwrap()].height();
            assert!((1..=max_level).contains(&height), "height {} out of range", height);
        }
    }

    proptest! {
        #[test]
        fn test_matches_btreemap(ops in vec(op(), 1..400), max_level in 1usize..10, seed in any::<u64>()) {
            let mut list = SkipList::with_config(SkipListConfig::new(max_level).with_seed(seed)).unwrap();
            let mut model = BTreeMap::new();

            for op in ops {
                match op {
                    | Op::Insert(k, v) => {
                        prop_assert_eq!(list.insert(k, v), model.insert(k, v));
                        prop_assert_eq!(list.search(k), Some(&v));
                    },
                    | Op::Delete(k) => {
                        prop_assert_eq!(list.delete(k), model.remove(&k).is_some());
                        prop_assert_eq!(list.search(k), None);
                    },
                }
                prop_assert_eq!(list.len(), model.len());
            }

            assert_structure(&list);
            let pairs: Vec<(u64, u32)> = list.iter().map(|(k, v)| (k, *v)).collect();
            let expected: Vec<(u64, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(pairs, expected);
            prop_assert_eq!(list.first().map(|(k, _)| k), model.keys().next().copied());
            prop_assert_eq!(list.last().map(|(k, _)| k), model.keys().next_back().copied());
        }

        #[test]
        fn test_inserts_iterate_sorted(keys in vec(any::<u64>(), 0..300)) {
            let list: SkipList<u64> = keys.iter().map(|&k| (k, k)).collect();
            let collected: Vec<u64> = list.keys().collect();
            prop_assert!(collected.windows(2).all(|w| w[0] < w[1]));

            let mut distinct = keys.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(collected, distinct);
            assert_structure(&list);
        }

        #[test]
        fn test_insert_then_search(key in any::<u64>(), value in any::<i64>()) {
            let mut list = SkipList::new(4).unwrap();
            list.insert(key, value);
            prop_assert_eq!(list.search(key), Some(&value));
        }

        #[test]
        fn test_drain_by_delete(keys in vec(0u64..1_000, 1..200), seed in any::<u64>()) {
            let mut list = SkipList::with_config(SkipListConfig::new(6).with_seed(seed)).unwrap();
            for &k in &keys {
                list.insert(k, ());
            }
            for &k in &keys {
                list.delete(k);
                assert_structure(&list);
            }
            prop_assert!(list.is_empty());
            prop_assert_eq!(list.level(), 0);
        }
    }
}
