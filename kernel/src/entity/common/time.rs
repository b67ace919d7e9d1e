use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use error_stack::ResultExt;
use time::{Duration, OffsetDateTime};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Creation instant, held at millisecond precision so it survives a store round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(truncate_to_millis(time.into()), PhantomData)
    }

    pub fn now() -> Self {
        Self::new(OffsetDateTime::now_utc())
    }

    pub fn from_unix_millis(millis: i64) -> error_stack::Result<Self, KernelError> {
        let time = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .change_context(KernelError::Internal)
            .attach_printable_lazy(|| format!("invalid timestamp: {millis}"))?;
        Ok(Self(time, PhantomData))
    }

    pub fn unix_millis(&self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }
}

fn truncate_to_millis(time: OffsetDateTime) -> OffsetDateTime {
    time - Duration::nanoseconds(i64::from(time.nanosecond() % 1_000_000))
}

impl<T> Serialize for CreatedAt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.unix_millis().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for CreatedAt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        Self::from_unix_millis(millis).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;

    use super::CreatedAt;

    #[test]
    fn drops_sub_millisecond_precision() {
        let time = OffsetDateTime::from_unix_timestamp_nanos(1_704_164_645_123_456_789)
            .expect("valid timestamp");
        let created = CreatedAt::<()>::new(time);
        assert_eq!(created.unix_millis(), 1_704_164_645_123);
        assert_eq!(
            CreatedAt::<()>::from_unix_millis(created.unix_millis()).ok(),
            Some(created)
        );
    }
}
