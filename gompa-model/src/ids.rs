use std::{fmt, str::FromStr};

use uuid::Uuid;

/// Strongly typed identifier for a heritage site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct SiteId(pub Uuid);

impl Default for SiteId {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteId {
    pub fn new() -> Self {
        SiteId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for SiteId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SiteId {
    fn from(value: Uuid) -> Self {
        SiteId(value)
    }
}

impl FromStr for SiteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(SiteId)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
