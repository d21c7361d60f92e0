use crate::SparseMultiset;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

impl<T, H> Serialize for SparseMultiset<T, H>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.counts())
    }
}

/// Reads `(element, count)` entries into `set`, summing repeated elements.
fn insert_entries<'de, T, S, A>(set: &mut SparseMultiset<T, S>, mut map: A) -> Result<(), A::Error>
where
    T: Deserialize<'de> + Eq + Hash,
    S: BuildHasher,
    A: MapAccess<'de>,
{
    while let Some((value, count)) = map.next_entry::<T, isize>()? {
        set.insert_count(value, count).map_err(de::Error::custom)?;
    }
    Ok(())
}

impl<'de, T, S> Deserialize<'de> for SparseMultiset<T, S>
where
    T: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor<T, S> {
            marker: PhantomData<SparseMultiset<T, S>>,
        }

        impl<'de, T, S> Visitor<'de> for CountsVisitor<T, S>
        where
            T: Deserialize<'de> + Eq + Hash,
            S: BuildHasher + Default,
        {
            type Value = SparseMultiset<T, S>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of elements to non-negative counts")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = SparseMultiset::with_capacity_and_hasher(
                    map.size_hint().unwrap_or(0),
                    S::default(),
                );
                insert_entries(&mut set, map)?;
                Ok(set)
            }
        }

        let visitor = CountsVisitor {
            marker: PhantomData,
        };
        deserializer.deserialize_map(visitor)
    }

    fn deserialize_in_place<D>(deserializer: D, place: &mut Self) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsInPlaceVisitor<'a, T, S>(&'a mut SparseMultiset<T, S>);

        impl<'a, 'de, T, S> Visitor<'de> for CountsInPlaceVisitor<'a, T, S>
        where
            T: Deserialize<'de> + Eq + Hash,
            S: BuildHasher,
        {
            type Value = ();

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of elements to non-negative counts")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                self.0.clear();
                self.0.reserve(map.size_hint().unwrap_or(0));
                insert_entries(self.0, map)
            }
        }

        deserializer.deserialize_map(CountsInPlaceVisitor(place))
    }
}

#[cfg(test)]
mod tests {
    use crate::SparseMultiset;
    use serde::Deserialize;

    #[test]
    fn serializes_as_a_count_map() {
        let set = SparseMultiset::from_counts([(String::from("hi"), 2)]).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"{"hi":2}"#);
    }

    #[test]
    fn round_trips_through_json() {
        let set = SparseMultiset::from_counts([
            (String::from("hi"), 2),
            (String::from("bye"), 8),
            (String::from("hehe"), 4),
        ])
        .unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let back: SparseMultiset<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn zero_counts_leave_no_entry() {
        let set: SparseMultiset<String> = serde_json::from_str(r#"{"hi":0,"bye":3}"#).unwrap();
        assert_eq!(set.distinct_len(), 1);
        assert_eq!(set.get("bye"), 3);
    }

    #[test]
    fn repeated_keys_are_summed() {
        let set: SparseMultiset<String> = serde_json::from_str(r#"{"a":1,"a":2}"#).unwrap();
        assert_eq!(set.get("a"), 3);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn deserialize_in_place_replaces_the_contents() {
        let mut set =
            SparseMultiset::from_counts([(String::from("old"), 5), (String::from("a"), 4)])
                .unwrap();
        let mut de = serde_json::Deserializer::from_str(r#"{"a":1,"b":2,"a":1}"#);
        SparseMultiset::deserialize_in_place(&mut de, &mut set).unwrap();
        de.end().unwrap();

        assert_eq!(set.get("old"), 0);
        assert_eq!(set.get("a"), 2);
        assert_eq!(set.get("b"), 2);
        assert_eq!(set.len(), 4);
        assert_eq!(set.distinct_len(), 2);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let result = serde_json::from_str::<SparseMultiset<String>>(r#"{"hi":-1}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("non-negative"), "{err}");
    }
}
