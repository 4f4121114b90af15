#[cfg(test)]
mod tests {
    use binary_relations::{OneToOne, OptionalPair::*};

    #[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
    enum ObjectId {
        Jill,
        Zeke,
        Sean,
        Xena,
    }

    use ObjectId::*;

    fn construct_id_to_name() -> OneToOne<ObjectId, &'static str> {
        let mut relation = OneToOne::new();
        relation.insert(Jill, "JILL");
        relation.insert(Zeke, "ZEKE");
        relation.insert(Sean, "SEAN");
        relation.insert(Xena, "XENA");
        relation
    }

    #[test]
    fn insert_test() {
        let relation = construct_id_to_name();
        assert_eq!(relation.len(), 4);
        assert!(relation.contains(&Jill, "JILL"));
        assert!(relation.contains(&Zeke, "ZEKE"));
        assert!(relation.contains(&Sean, "SEAN"));
        assert!(relation.contains(&Xena, "XENA"));
        assert!(!relation.contains(&Jill, "ZEKE"));
    }

    #[test]
    fn insert_duplicate_test() {
        let mut relation = construct_id_to_name();
        assert_eq!(relation.insert(Jill, "JILL"), Neither);
        assert_eq!(relation.len(), 4);
    }

    #[test]
    fn insert_overwrite_test() {
        let mut relation = construct_id_to_name();
        assert_eq!(relation.insert(Zeke, "ALEX"), SomeLeft((Zeke, "ZEKE")));
        assert!(!relation.contains(&Zeke, "ZEKE"));
        assert!(relation.contains(&Zeke, "ALEX"));
        assert!(!relation.contains_right("ZEKE"));
        assert_eq!(relation.len(), 4);
    }

    #[test]
    fn insert_overwrite_right_test() {
        let mut relation: OneToOne<&str, u64> = OneToOne::new();
        assert_eq!(relation.insert("a", 1), Neither);
        assert_eq!(relation.insert("b", 1), SomeRight(("a", 1)));
        assert_eq!(relation.get_right("a"), None);
        assert_eq!(relation.get_right("b"), Some(&1));
        assert_eq!(relation.get_left(&1), Some(&"b"));
        assert_eq!(relation.len(), 1);
    }

    #[test]
    fn insert_overwrite_both_test() {
        let mut relation: OneToOne<&str, u64> = OneToOne::new();
        relation.insert("a", 1);
        relation.insert("b", 2);
        assert_eq!(relation.insert("a", 2), SomeBoth(("a", 1), ("b", 2)));
        assert_eq!(relation.len(), 1);
        assert!(relation.contains("a", &2));
        assert!(!relation.contains_left("b"));
        assert!(!relation.contains_right(&1));
    }

    #[test]
    fn remove_test() {
        let mut relation = construct_id_to_name();
        assert!(relation.remove(&Jill, "JILL"));
        assert!(!relation.remove(&Jill, "JILL"));
        assert!(!relation.remove(&Zeke, "SEAN"));
        assert!(!relation.contains(&Jill, "JILL"));
        assert!(relation.contains(&Zeke, "ZEKE"));
        assert!(relation.contains(&Sean, "SEAN"));
        assert!(relation.contains(&Xena, "XENA"));
        assert_eq!(relation.len(), 3);
    }

    #[test]
    fn remove_left_test() {
        let mut relation = construct_id_to_name();
        assert_eq!(relation.remove_left(&Jill), Some((Jill, "JILL")));
        assert_eq!(relation.remove_left(&Jill), None);
        assert!(!relation.contains(&Jill, "JILL"));
        assert!(!relation.contains_right("JILL"));
        assert!(relation.contains(&Zeke, "ZEKE"));
        assert_eq!(relation.len(), 3);
    }

    #[test]
    fn remove_right_test() {
        let mut relation = construct_id_to_name();
        assert_eq!(relation.remove_right("JILL"), Some((Jill, "JILL")));
        assert_eq!(relation.remove_right("JILL"), None);
        assert!(!relation.contains(&Jill, "JILL"));
        assert!(!relation.contains_left(&Jill));
        assert!(relation.contains(&Xena, "XENA"));
        assert_eq!(relation.len(), 3);
    }

    #[test]
    fn bulk_test() {
        let mut relation = construct_id_to_name();
        relation.insert_many([(Jill, "JILLIAN"), (Sean, "JILLIAN")]);
        assert_eq!(relation.get_left("JILLIAN"), Some(&Sean));
        assert!(!relation.contains_left(&Jill));
        assert_eq!(relation.len(), 3);

        relation.remove_many(&[(Sean, "JILLIAN"), (Zeke, "XENA")]);
        assert_eq!(relation.len(), 2);
        assert!(relation.contains(&Zeke, "ZEKE"));

        let other = construct_id_to_name();
        relation.insert_all(&other);
        assert_eq!(relation, other);

        relation.remove_all(&other);
        assert!(relation.is_empty());
    }

    #[test]
    fn iter_test() {
        let relation = construct_id_to_name();
        assert_eq!(relation.iter().len(), 4);
        for (id, name) in relation.iter() {
            assert_eq!(relation.get_right(id), Some(name));
            assert_eq!(relation.get_left(name), Some(id));
        }
        let mut lefts: Vec<ObjectId> = relation.iter_left().copied().collect();
        lefts.sort();
        assert_eq!(lefts, vec![Jill, Zeke, Sean, Xena]);
        let mut rights: Vec<&str> = relation.iter_right().copied().collect();
        rights.sort();
        assert_eq!(rights, vec!["JILL", "SEAN", "XENA", "ZEKE"]);
        assert_eq!((&relation).into_iter().count(), 4);
    }

    #[test]
    fn clear_test() {
        let mut relation = construct_id_to_name();
        relation.clear();
        assert!(relation.is_empty());
        assert_eq!(relation.len_left(), 0);
        assert_eq!(relation.len_right(), 0);
        assert!(relation.capacity_left() >= 4);
        assert_eq!(relation.iter().next(), None);
    }

    #[test]
    fn capacity_test() {
        let mut relation: OneToOne<u64, u64> = OneToOne::with_capacity(100);
        assert!(relation.capacity_left() >= 100);
        assert!(relation.capacity_right() >= 100);
        relation.reserve_left(200);
        assert!(relation.capacity_left() >= 200);
        assert!(relation.try_reserve_right(200).is_ok());
        assert!(relation.try_reserve_left(usize::MAX).is_err());
        relation.insert(1, 1);
        relation.shrink_to_fit();
        assert!(relation.contains(&1, &1));
    }

    #[test]
    fn equality_test() {
        let relation = construct_id_to_name();
        let mut cloned = relation.clone();
        assert_eq!(relation, cloned);
        cloned.insert(Jill, "ALEX");
        assert_ne!(relation, cloned);
        let collected: OneToOne<ObjectId, &str> = relation.iter().map(|(l, r)| (*l, *r)).collect();
        assert_eq!(relation, collected);
    }

    #[test]
    fn debug_test() {
        let mut relation: OneToOne<u64, &str> = OneToOne::new();
        relation.insert(1, "one");
        assert_eq!(format!("{relation:?}"), r#"{(1, "one")}"#);
    }
}
