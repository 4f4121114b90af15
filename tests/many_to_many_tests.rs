#[cfg(test)]
mod tests {
    use binary_relations::ManyToMany;

    fn construct_fruit_basket() -> ManyToMany<u64, String> {
        let mut relation = ManyToMany::new();
        relation.insert(1, "apple".to_string());
        relation.insert(1, "banana".to_string());
        relation.insert(2, "cherry".to_string());
        relation.insert(3, "cherry".to_string());
        relation
    }

    #[test]
    fn insert_test() {
        let relation = construct_fruit_basket();
        assert_eq!(relation.len(), 4);
        assert!(relation.contains(&1, "apple"));
        assert!(relation.contains(&1, "banana"));
        assert!(relation.contains(&2, "cherry"));
        assert!(relation.contains(&3, "cherry"));
        assert!(!relation.contains(&2, "apple"));
        assert!(!relation.contains(&4, "durian"));
    }

    #[test]
    fn insert_duplicate_test() {
        let mut relation = construct_fruit_basket();
        assert!(!relation.insert(1, "apple".to_string()));
        assert_eq!(relation.len(), 4);
        assert!(relation.insert(2, "apple".to_string()));
        assert_eq!(relation.len(), 5);
        assert_eq!(relation.get_lefts("apple"), &[1, 2]);
    }

    #[test]
    fn remove_test() {
        let mut relation = construct_fruit_basket();
        assert!(relation.remove(&1, "banana"));
        assert!(!relation.remove(&1, "banana"));
        assert_eq!(relation.len(), 3);
        assert!(relation.contains(&1, "apple"));
        assert!(!relation.contains(&1, "banana"));
        assert!(!relation.contains_right("banana"));
        assert!(relation.contains(&2, "cherry"));
        assert!(relation.contains(&3, "cherry"));
    }

    #[test]
    fn remove_last_pair_test() {
        let mut relation = construct_fruit_basket();
        assert!(relation.remove(&2, "cherry"));
        assert!(!relation.contains_left(&2));
        assert!(relation.get_rights(&2).is_empty());
        assert_eq!(relation.get_lefts("cherry"), &[3]);
        assert_eq!(relation.len_left(), 2);
    }

    #[test]
    fn remove_left_test() {
        let mut relation = construct_fruit_basket();
        assert_eq!(
            relation.remove_left(&1),
            Some((1, vec!["apple".to_string(), "banana".to_string()]))
        );
        assert_eq!(relation.remove_left(&1), None);
        assert!(!relation.contains_right("apple"));
        assert!(!relation.contains_right("banana"));
        assert_eq!(relation.len(), 2);
        assert_eq!(relation.len_right(), 1);
    }

    #[test]
    fn remove_right_test() {
        let mut relation = construct_fruit_basket();
        assert_eq!(
            relation.remove_right("cherry"),
            Some((vec![2, 3], "cherry".to_string()))
        );
        assert_eq!(relation.remove_right("cherry"), None);
        assert!(!relation.contains_left(&2));
        assert!(!relation.contains_left(&3));
        assert_eq!(relation.len(), 2);
        assert_eq!(relation.len_left(), 1);
    }

    #[test]
    fn borrowed_remove_left_right_test() {
        let mut relation: ManyToMany<String, String> = ManyToMany::new();
        relation.insert("1".into(), "apple".into());
        relation.insert("1".into(), "cherry".into());
        relation.insert("2".into(), "cherry".into());
        assert_eq!(
            relation.remove_left("1"),
            Some(("1".into(), vec!["apple".into(), "cherry".into()]))
        );
        assert_eq!(relation.get_lefts("cherry"), &["2".to_string()]);
        assert_eq!(
            relation.remove_right("cherry"),
            Some((vec!["2".into()], "cherry".into()))
        );
        assert!(relation.is_empty());
        assert_eq!(relation.len_left(), 0);
        assert_eq!(relation.len_right(), 0);
    }

    #[test]
    fn iterate_test() {
        let relation = construct_fruit_basket();
        let mut count = 0;
        for _ in &relation {
            count += 1;
        }
        assert_eq!(count, 4);
        assert_eq!(relation.iter().len(), 4);
        for (left, right) in relation.iter() {
            assert!(relation.get_rights(left).contains(right));
            assert!(relation.get_lefts(right).contains(left));
        }
    }

    #[test]
    fn find_test() {
        let mut relation: ManyToMany<u64, &str> = ManyToMany::new();
        relation.insert(1, "cherry");
        relation.insert(1, "apple");
        relation.insert(1, "banana");
        relation.insert(3, "date");
        relation.insert(2, "date");

        assert_eq!(relation.get_rights(&1), &["apple", "banana", "cherry"]);
        assert_eq!(relation.get_lefts("date"), &[2, 3]);
        assert!(relation.get_lefts("elderberry").is_empty());
        assert_eq!(relation.iter_left().count(), 3);
        assert_eq!(relation.iter_right().count(), 4);
    }

    #[test]
    fn bulk_remove_test() {
        let mut relation: ManyToMany<u64, &str> =
            [(1, "x"), (1, "y"), (2, "y")].into_iter().collect();
        let other: ManyToMany<u64, &str> = [(1, "y")].into_iter().collect();
        relation.remove_all(&other);
        assert_eq!(relation.len(), 2);
        assert!(relation.contains(&1, "x"));
        assert!(relation.contains(&2, "y"));
        assert!(!relation.contains(&1, "y"));
        assert_eq!(relation.get_lefts("y"), &[2]);
    }

    #[test]
    fn insert_many_test() {
        let mut relation: ManyToMany<u64, &str> = ManyToMany::new();
        relation.insert(1, "b");
        relation.insert_many([(1, "c"), (2, "a"), (1, "a"), (1, "b"), (2, "a")]);
        assert_eq!(relation.len(), 4);
        assert_eq!(relation.get_rights(&1), &["a", "b", "c"]);
        assert_eq!(relation.get_lefts("a"), &[1, 2]);

        let mut pairwise: ManyToMany<u64, &str> = ManyToMany::new();
        for (l, r) in [(1, "b"), (1, "c"), (2, "a"), (1, "a")] {
            pairwise.insert(l, r);
        }
        assert_eq!(relation, pairwise);
    }

    #[test]
    fn insert_all_test() {
        let mut relation = construct_fruit_basket();
        let mut other = ManyToMany::new();
        other.insert(1, "apple".to_string());
        other.insert(4, "durian".to_string());
        other.insert(4, "cherry".to_string());
        relation.insert_all(&other);
        assert_eq!(relation.len(), 6);
        assert_eq!(relation.get_lefts("cherry"), &[2, 3, 4]);
        assert_eq!(
            relation.get_rights(&4),
            &["cherry".to_string(), "durian".to_string()]
        );
    }

    #[test]
    fn remove_many_test() {
        let mut relation = construct_fruit_basket();
        let doomed = vec![
            (1, "banana".to_string()),
            (2, "cherry".to_string()),
            (2, "cherry".to_string()),
            (4, "durian".to_string()),
        ];
        relation.remove_many(&doomed);
        assert_eq!(relation.len(), 2);
        assert!(!relation.contains_left(&2));
        assert!(!relation.contains_right("banana"));
        assert_eq!(relation.get_lefts("cherry"), &[3]);
    }

    #[test]
    fn clear_test() {
        let mut relation = construct_fruit_basket();
        relation.clear();
        assert!(relation.is_empty());
        assert_eq!(relation.len_left(), 0);
        assert_eq!(relation.len_right(), 0);
        assert_eq!(relation.iter().next(), None);
        assert!(relation.insert(1, "apple".to_string()));
    }

    #[test]
    fn capacity_test() {
        let mut relation: ManyToMany<u64, u64> = ManyToMany::with_capacity(32);
        assert!(relation.capacity_left() >= 32);
        assert!(relation.capacity_right() >= 32);
        relation.reserve_left(64);
        assert!(relation.capacity_left() >= 64);
        assert!(relation.try_reserve_right(usize::MAX).is_err());
        relation.insert(1, 1);
        relation.shrink_to_fit();
        assert!(relation.contains(&1, &1));
    }

    #[test]
    fn equality_test() {
        let relation = construct_fruit_basket();
        let mut other = ManyToMany::with_capacity(100);
        other.insert(3, "cherry".to_string());
        other.insert(2, "cherry".to_string());
        other.insert(1, "banana".to_string());
        other.insert(1, "apple".to_string());
        assert_eq!(relation, other);
        other.remove(&3, "cherry");
        assert_ne!(relation, other);
        assert_eq!(relation.clone(), relation);
    }
}
