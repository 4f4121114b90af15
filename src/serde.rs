use crate::{ManyToMany, OneToMany, OneToOne};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};
use serde::{
    de::{SeqAccess, Visitor},
    ser::{SerializeSeq, Serializer},
    Deserializer, {Deserialize, Serialize},
};

/// A relation that can be rebuilt one pair at a time.
trait FromPairs<L, R> {
    const NAME: &'static str;

    fn with_capacity(capacity: usize) -> Self;

    fn push(&mut self, pair: (L, R));
}

impl<L, R, S> FromPairs<L, R> for OneToOne<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    const NAME: &'static str = "a OneToOne";

    fn with_capacity(capacity: usize) -> Self {
        OneToOne::with_capacity_and_hasher(capacity, Default::default())
    }

    fn push(&mut self, pair: (L, R)) {
        self.insert_pair(pair);
    }
}

impl<L, R, S> FromPairs<L, R> for OneToMany<L, R, S>
where
    L: Eq + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    const NAME: &'static str = "a OneToMany";

    fn with_capacity(capacity: usize) -> Self {
        OneToMany::with_capacity_and_hasher(capacity, Default::default())
    }

    fn push(&mut self, pair: (L, R)) {
        self.insert_pair(pair);
    }
}

impl<L, R, S> FromPairs<L, R> for ManyToMany<L, R, S>
where
    L: Ord + Hash + Clone,
    R: Ord + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    const NAME: &'static str = "a ManyToMany";

    fn with_capacity(capacity: usize) -> Self {
        ManyToMany::with_capacity_and_hasher(capacity, Default::default())
    }

    fn push(&mut self, pair: (L, R)) {
        self.insert_pair(pair);
    }
}

struct RelationVisitor<T, L, R> {
    marker: PhantomData<fn() -> (T, L, R)>,
}

impl<T, L, R> RelationVisitor<T, L, R> {
    fn new() -> Self {
        RelationVisitor {
            marker: PhantomData,
        }
    }
}

impl<'de, T, L, R> Visitor<'de> for RelationVisitor<T, L, R>
where
    T: FromPairs<L, R>,
    L: Deserialize<'de>,
    R: Deserialize<'de>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(T::NAME)
    }

    fn visit_seq<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: SeqAccess<'de>,
    {
        let mut relation = T::with_capacity(access.size_hint().unwrap_or(0));

        while let Some(pair) = access.next_element::<(L, R)>()? {
            relation.push(pair);
        }

        Ok(relation)
    }
}

impl<'de, L, R, S> Deserialize<'de> for OneToOne<L, R, S>
where
    L: Deserialize<'de> + Eq + Hash + Clone,
    R: Deserialize<'de> + Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RelationVisitor::<Self, L, R>::new())
    }
}

impl<'de, L, R, S> Deserialize<'de> for OneToMany<L, R, S>
where
    L: Deserialize<'de> + Eq + Hash + Clone,
    R: Deserialize<'de> + Ord + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RelationVisitor::<Self, L, R>::new())
    }
}

impl<'de, L, R, S> Deserialize<'de> for ManyToMany<L, R, S>
where
    L: Deserialize<'de> + Ord + Hash + Clone,
    R: Deserialize<'de> + Ord + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RelationVisitor::<Self, L, R>::new())
    }
}

impl<L, R, H> Serialize for OneToOne<L, R, H>
where
    L: Serialize,
    R: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;

        for pair in self.iter() {
            seq.serialize_element(&pair)?;
        }

        seq.end()
    }
}

impl<L, R, H> Serialize for OneToMany<L, R, H>
where
    L: Serialize,
    R: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;

        for pair in self.iter() {
            seq.serialize_element(&pair)?;
        }

        seq.end()
    }
}

impl<L, R, H> Serialize for ManyToMany<L, R, H>
where
    L: Serialize,
    R: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;

        for pair in self.iter() {
            seq.serialize_element(&pair)?;
        }

        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::{ManyToMany, OneToMany, OneToOne};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
    struct TestingStruct {
        pub(crate) value: u64,
        pub(crate) data: String,
    }

    impl TestingStruct {
        pub(crate) fn from_value(value: u64) -> Self {
            Self {
                value,
                data: value.to_string(),
            }
        }
    }

    #[test]
    fn one_to_one_round_trip_test() {
        let relation: OneToOne<String, TestingStruct> = (0..10)
            .map(|i| (i.to_string(), TestingStruct::from_value(i)))
            .collect();
        let jsonified: String =
            serde_json::to_string(&relation).expect("Unable to convert data to json!");
        println!("JSON: {jsonified}");
        let reconsituted: OneToOne<String, TestingStruct> =
            serde_json::from_str(&jsonified).expect("Unable to convert json to relation!");
        assert_eq!(relation, reconsituted);
    }

    #[test]
    fn one_to_many_round_trip_test() {
        let relation: OneToMany<u64, TestingStruct> = (0..20)
            .map(|i| (i % 3, TestingStruct::from_value(i)))
            .collect();
        let jsonified: String =
            serde_json::to_string(&relation).expect("Unable to convert data to json!");
        let reconsituted: OneToMany<u64, TestingStruct> =
            serde_json::from_str(&jsonified).expect("Unable to convert json to relation!");
        assert_eq!(relation, reconsituted);
        assert_eq!(reconsituted.get_rights(&1).len(), 7);
    }

    #[test]
    fn many_to_many_round_trip_test() {
        let relation: ManyToMany<u64, u64> = (0..10)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .collect();
        let jsonified: String =
            serde_json::to_string(&relation).expect("Unable to convert data to json!");
        let reconsituted: ManyToMany<u64, u64> =
            serde_json::from_str(&jsonified).expect("Unable to convert json to relation!");
        assert_eq!(relation, reconsituted);
        assert_eq!(reconsituted.len(), 45);
    }

    #[test]
    fn later_pairs_win_test() {
        let relation: OneToOne<String, u64> =
            serde_json::from_str(r#"[["a", 1], ["b", 2], ["a", 2]]"#)
                .expect("Unable to convert json to relation!");
        assert_eq!(relation.len(), 1);
        assert_eq!(relation.get_right("a"), Some(&2));

        let relation: OneToMany<String, u64> =
            serde_json::from_str(r#"[["a", 1], ["b", 1], ["a", 2]]"#)
                .expect("Unable to convert json to relation!");
        assert_eq!(relation.get_rights("a"), &[2]);
        assert_eq!(relation.get_rights("b"), &[1]);
    }

    #[test]
    fn not_a_sequence_test() {
        let result: Result<ManyToMany<u64, u64>, _> = serde_json::from_str(r#"{"a": 1}"#);
        assert!(result.is_err());
    }
}
